/*
 *  sampler.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Render cache and duplicate suppression
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

use log::debug;

use crate::classifier::{classify, Classification};
use crate::httpsource::SourceError;
use crate::reading::Reading;
use crate::renderer::Renderer;
use crate::surface::Surface;

/// Last reading actually drawn.
///
/// Starts empty, which no reading can match, so the first sample always
/// renders. Never cleared afterwards.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    last: Option<Reading>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Reading> {
        self.last
    }

    pub fn matches(&self, reading: &Reading) -> bool {
        self.last.is_some_and(|last| last.same_bits(reading))
    }

    pub fn store(&mut self, reading: Reading) {
        self.last = Some(reading);
    }
}

/// Map one poll outcome to a reading. Failures become "no signal".
pub fn reading_from(result: Result<f64, SourceError>) -> Reading {
    match result {
        Ok(cm) => Reading::from_cm(cm),
        Err(e) => {
            debug!("Poll failed, showing no signal: {}", e);
            Reading::NO_SIGNAL
        }
    }
}

/// Dedupes readings and drives classify + render.
#[derive(Debug, Clone)]
pub struct Sampler {
    cache: RenderCache,
    renderer: Renderer,
    renders: u64,
}

impl Sampler {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            cache: RenderCache::new(),
            renderer,
            renders: 0,
        }
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Render passes performed so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Apply one reading. Returns the classification when it was drawn,
    /// `None` when it matched the last one.
    pub fn observe<S: Surface + ?Sized>(&mut self, reading: Reading, surface: &mut S) -> Option<Classification> {
        if self.cache.matches(&reading) {
            return None;
        }
        self.cache.store(reading);

        let class = classify(reading);
        debug!("Reading {:?} -> {:?} ({}%)", reading.distance(), class.state, class.fill_percent);
        self.renderer.render(surface, &class, reading);
        self.renders += 1;
        Some(class)
    }
}
