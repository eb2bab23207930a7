/*
 *  surface/mod.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Visual surface abstraction
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

// Visual surface abstraction
pub mod console;
pub mod panel;

#[cfg(test)]
pub mod mock;

pub use console::{ConsoleSurface, SurfaceState};
pub use panel::PanelSurface;

use crate::classifier::ColorToken;
use crate::display::error::DisplayError;

/// Stable identifiers of everything the dashboard draws or listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetId {
    Root,
    Readout,
    Status,
    LampStop,
    LampSlow,
    LampGo,
    MeterFill,
    ThemeToggle,
    SunIcon,
    MoonIcon,
}

impl TargetId {
    pub const ALL: [TargetId; 10] = [
        TargetId::Root,
        TargetId::Readout,
        TargetId::Status,
        TargetId::LampStop,
        TargetId::LampSlow,
        TargetId::LampGo,
        TargetId::MeterFill,
        TargetId::ThemeToggle,
        TargetId::SunIcon,
        TargetId::MoonIcon,
    ];
}

/// Style properties a target can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Color(ColorToken),
    /// Fill width, percent of the target's extent
    Width(u8),
}

/// Boolean visual flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    Active,
    Hidden,
    Dark,
}

/// Anything the dashboard can be drawn on.
///
/// Mutations are buffered by the implementation; `present` pushes them out
/// in one go (a panel flush, a log line).
pub trait Surface {
    fn contains(&self, target: TargetId) -> bool;

    fn set_text(&mut self, target: TargetId, text: &str);

    fn set_style(&mut self, target: TargetId, style: Style);

    fn set_flag(&mut self, target: TargetId, flag: Flag, on: bool);

    fn present(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Blank the output on shutdown.
    fn blank(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// A target known to exist on the surface it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target(TargetId);

impl Target {
    pub fn resolve<S: Surface + ?Sized>(surface: &S, id: TargetId) -> Option<Target> {
        surface.contains(id).then_some(Target(id))
    }

    pub fn id(&self) -> TargetId {
        self.0
    }
}
