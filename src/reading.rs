/*
 *  reading.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Distance readings and the no-signal marker
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

use serde::Deserialize;

/// One sampled distance, in centimeters.
///
/// The raw value is kept as received so that render suppression can compare
/// readings bit for bit. Anything that is not a finite positive number reads
/// as "no signal".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading(f64);

impl Reading {
    /// Canonical marker substituted when a poll fails.
    pub const NO_SIGNAL: Reading = Reading(-1.0);

    pub fn from_cm(cm: f64) -> Self {
        Reading(cm)
    }

    /// Distance when a signal is present.
    pub fn distance(&self) -> Option<f64> {
        if self.0.is_finite() && self.0 > 0.0 {
            Some(self.0)
        } else {
            None
        }
    }

    pub fn has_signal(&self) -> bool {
        self.distance().is_some()
    }

    /// Bitwise identity, `-0.0 != 0.0` and `NaN == NaN` (same payload).
    pub fn same_bits(&self, other: &Reading) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map(Reading::from_cm).unwrap_or(Reading::NO_SIGNAL)
    }
}

/// Body returned by the sensor backend: `{"distance": 23.4}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistancePayload {
    #[serde(default)]
    pub distance: Option<f64>,
}
