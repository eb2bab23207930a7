/*
 *  surface/console.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Headless surface that logs each frame
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

use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::classifier::ColorToken;
use crate::display::error::DisplayError;
use super::{Flag, Style, Surface, TargetId};

/// Snapshot of every target's visible state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub texts: BTreeMap<TargetId, String>,
    pub colors: BTreeMap<TargetId, ColorToken>,
    pub widths: BTreeMap<TargetId, u8>,
    pub flags: BTreeSet<(TargetId, Flag)>,
}

impl SurfaceState {
    pub fn text(&self, target: TargetId) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    pub fn color(&self, target: TargetId) -> Option<ColorToken> {
        self.colors.get(&target).copied()
    }

    pub fn width(&self, target: TargetId) -> Option<u8> {
        self.widths.get(&target).copied()
    }

    pub fn flag(&self, target: TargetId, flag: Flag) -> bool {
        self.flags.contains(&(target, flag))
    }

    pub(super) fn apply_text(&mut self, target: TargetId, text: &str) {
        self.texts.insert(target, text.to_string());
    }

    pub(super) fn apply_style(&mut self, target: TargetId, style: Style) {
        match style {
            Style::Color(c) => { self.colors.insert(target, c); }
            Style::Width(w) => { self.widths.insert(target, w.min(100)); }
        }
    }

    pub(super) fn apply_flag(&mut self, target: TargetId, flag: Flag, on: bool) {
        if on {
            self.flags.insert((target, flag));
        } else {
            self.flags.remove(&(target, flag));
        }
    }
}

/// Headless surface: keeps target state in memory and logs each frame.
#[derive(Debug, Clone)]
pub struct ConsoleSurface {
    targets: BTreeSet<TargetId>,
    state: SurfaceState,
    frames: usize,
    quiet: bool,
}

impl ConsoleSurface {
    /// Surface exposing every target.
    pub fn new() -> Self {
        Self::with_targets(TargetId::ALL)
    }

    /// Surface exposing only the given targets.
    pub fn with_targets<I: IntoIterator<Item = TargetId>>(targets: I) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            state: SurfaceState::default(),
            frames: 0,
            quiet: false,
        }
    }

    /// Suppress the per-frame log line.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn lamp_glyph(&self, target: TargetId, glyph: char) -> char {
        if self.state.flag(target, Flag::Active) { glyph } else { '.' }
    }

    /// One-line text rendition of the current frame.
    pub fn line(&self) -> String {
        let lamps: String = [
            self.lamp_glyph(TargetId::LampStop, 'R'),
            self.lamp_glyph(TargetId::LampSlow, 'Y'),
            self.lamp_glyph(TargetId::LampGo, 'G'),
        ]
        .iter()
        .collect();
        let fill = self.state.width(TargetId::MeterFill).unwrap_or(0);
        let filled = (fill as usize + 5) / 10;
        let meter = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
        let theme = if self.state.flag(TargetId::Root, Flag::Dark) { "dark" } else { "light" };

        format!(
            "[{}] {:>8} [{}] {:>3}% {} ({})",
            lamps,
            self.state.text(TargetId::Readout).unwrap_or(""),
            meter,
            fill,
            self.state.text(TargetId::Status).unwrap_or(""),
            theme,
        )
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ConsoleSurface {
    fn contains(&self, target: TargetId) -> bool {
        self.targets.contains(&target)
    }

    fn set_text(&mut self, target: TargetId, text: &str) {
        if self.contains(target) {
            self.state.apply_text(target, text);
        }
    }

    fn set_style(&mut self, target: TargetId, style: Style) {
        if self.contains(target) {
            self.state.apply_style(target, style);
        }
    }

    fn set_flag(&mut self, target: TargetId, flag: Flag, on: bool) {
        if self.contains(target) {
            self.state.apply_flag(target, flag, on);
        }
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.frames += 1;
        if !self.quiet {
            info!("{}", self.line());
        }
        Ok(())
    }
}
