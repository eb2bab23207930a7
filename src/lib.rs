/*
 *  lib.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Library root
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

//! Parking distance monitor: polls a distance endpoint, classifies each
//! reading into a proximity band and draws it on a console or OLED panel.

pub mod classifier;
pub mod config;
pub mod display;
pub mod httpsource;
pub mod monitor;
pub mod prefs;
pub mod reading;
pub mod renderer;
pub mod sampler;
pub mod surface;
pub mod theme;
pub mod vframebuf;

pub use classifier::{classify, Classification, State};
pub use monitor::{Monitor, MonitorSettings, UiEvent};
pub use reading::Reading;
