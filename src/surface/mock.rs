/*
 *  surface/mock.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Recording surface for tests
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

use std::sync::{Arc, Mutex};

use crate::display::error::DisplayError;
use super::{ConsoleSurface, Flag, Style, Surface, SurfaceState, TargetId};

/// Counters shared with the test that owns the surface
#[derive(Debug, Default)]
pub struct MockSurfaceState {
    pub present_count: usize,
    pub text_writes: usize,
    pub style_writes: usize,
    pub flag_writes: usize,
    pub blank_count: usize,

    /// Number of lamps lit at each present, in order
    pub lit_per_frame: Vec<usize>,

    pub simulate_present_failure: bool,
}

/// Recording surface for unit tests.
#[derive(Debug, Clone)]
pub struct MockSurface {
    inner: ConsoleSurface,
    state: Arc<Mutex<MockSurfaceState>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::with_targets(TargetId::ALL)
    }

    pub fn with_targets<I: IntoIterator<Item = TargetId>>(targets: I) -> Self {
        Self {
            inner: ConsoleSurface::with_targets(targets).quiet(),
            state: Arc::new(Mutex::new(MockSurfaceState::default())),
        }
    }

    pub fn without(missing: TargetId) -> Self {
        Self::with_targets(TargetId::ALL.into_iter().filter(|t| *t != missing))
    }

    pub fn counters(&self) -> Arc<Mutex<MockSurfaceState>> {
        Arc::clone(&self.state)
    }

    pub fn view(&self) -> &SurfaceState {
        self.inner.state()
    }

    pub fn presents(&self) -> usize {
        self.state.lock().unwrap().present_count
    }

    pub fn lit_lamps(&self) -> usize {
        [TargetId::LampStop, TargetId::LampSlow, TargetId::LampGo]
            .iter()
            .filter(|t| self.view().flag(**t, Flag::Active))
            .count()
    }
}

impl Surface for MockSurface {
    fn contains(&self, target: TargetId) -> bool {
        self.inner.contains(target)
    }

    fn set_text(&mut self, target: TargetId, text: &str) {
        self.state.lock().unwrap().text_writes += 1;
        self.inner.set_text(target, text);
    }

    fn set_style(&mut self, target: TargetId, style: Style) {
        self.state.lock().unwrap().style_writes += 1;
        self.inner.set_style(target, style);
    }

    fn set_flag(&mut self, target: TargetId, flag: Flag, on: bool) {
        self.state.lock().unwrap().flag_writes += 1;
        self.inner.set_flag(target, flag, on);
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        let lit = self.lit_lamps();
        let mut state = self.state.lock().unwrap();
        if state.simulate_present_failure {
            return Err(DisplayError::Other("Simulated present failure".to_string()));
        }
        state.present_count += 1;
        state.lit_per_frame.push(lit);
        Ok(())
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        self.state.lock().unwrap().blank_count += 1;
        Ok(())
    }
}
