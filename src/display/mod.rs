/*
 *  display/mod.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Panel driver layer
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

// Panel hardware: drivers, the factory that picks one, and panel geometry
pub mod drivers;
pub mod error;
pub mod factory;
pub mod layout;
pub mod traits;

pub use error::{DisplayError, DisplayFactoryError};
pub use factory::{BoxedDriver, DisplayDriverFactory};
pub use layout::PanelLayout;
pub use traits::{DisplayCapabilities, DisplayDriver};
