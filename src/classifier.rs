/*
 *  classifier.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Distance to proximity band classification
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

use crate::reading::Reading;

/// Distances at or beyond this read as an empty meter.
pub const METER_RANGE_CM: f64 = 60.0;

/// Upper bounds (inclusive) of the STOP, SLOW and GO bands.
pub const STOP_MAX_CM: f64 = 15.0;
pub const SLOW_MAX_CM: f64 = 25.0;
pub const GO_MAX_CM: f64 = 45.0;

/// Indicator lamps, one per band colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lamp {
    Red,
    Yellow,
    Green,
}

impl Lamp {
    pub const ALL: [Lamp; 3] = [Lamp::Red, Lamp::Yellow, Lamp::Green];
}

/// Semantic colour applied to the numeric readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    TextPrimary,
    Danger,
    Warning,
    Success,
}

/// Discrete safety state derived from a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NoSignal,
    Stop,
    Slow,
    Go,
    Clear,
}

impl State {
    pub fn headline(&self) -> &'static str {
        match self {
            State::NoSignal => "NO SIGNAL",
            State::Stop => "STOP",
            State::Slow => "SLOW",
            State::Go => "GO",
            State::Clear => "CLEAR",
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            State::NoSignal => None,
            State::Stop => Some("Too close!"),
            State::Slow => Some("Careful approach"),
            State::Go => Some("Safe distance"),
            State::Clear => Some("Optimal spacing"),
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            State::NoSignal | State::Clear => ColorToken::TextPrimary,
            State::Stop => ColorToken::Danger,
            State::Slow => ColorToken::Warning,
            State::Go => ColorToken::Success,
        }
    }

    /// GO and CLEAR share the green lamp.
    pub fn lamp(&self) -> Option<Lamp> {
        match self {
            State::NoSignal => None,
            State::Stop => Some(Lamp::Red),
            State::Slow => Some(Lamp::Yellow),
            State::Go | State::Clear => Some(Lamp::Green),
        }
    }

    /// Full status line, e.g. "SLOW - Careful approach".
    pub fn status_text(&self) -> String {
        match self.label() {
            Some(label) => format!("{} - {}", self.headline(), label),
            None => self.headline().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub state: State,
    /// 0..=100, closer is fuller
    pub fill_percent: u8,
}

/// Map a reading onto its state and meter fill.
pub fn classify(reading: Reading) -> Classification {
    let Some(cm) = reading.distance() else {
        return Classification { state: State::NoSignal, fill_percent: 0 };
    };

    let clamped = cm.clamp(0.0, METER_RANGE_CM);
    let fill = (100.0 - (clamped / METER_RANGE_CM) * 100.0).round();

    let state = if cm <= STOP_MAX_CM {
        State::Stop
    } else if cm <= SLOW_MAX_CM {
        State::Slow
    } else if cm <= GO_MAX_CM {
        State::Go
    } else {
        State::Clear
    };

    Classification { state, fill_percent: fill.clamp(0.0, 100.0) as u8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(cm: f64) -> Classification {
        classify(Reading::from_cm(cm))
    }

    #[test]
    fn test_reference_scenarios() {
        let a = at(10.0);
        assert_eq!(a.state, State::Stop);
        assert_eq!(a.state.label(), Some("Too close!"));
        assert_eq!(a.fill_percent, 83);

        assert_eq!(at(20.0), Classification { state: State::Slow, fill_percent: 67 });
        assert_eq!(at(30.0), Classification { state: State::Go, fill_percent: 50 });
        assert_eq!(at(50.0), Classification { state: State::Clear, fill_percent: 17 });
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(at(0.01).state, State::Stop);
        assert_eq!(at(15.0).state, State::Stop);
        assert_eq!(at(15.01).state, State::Slow);
        assert_eq!(at(25.0).state, State::Slow);
        assert_eq!(at(25.01).state, State::Go);
        assert_eq!(at(45.0).state, State::Go);
        assert_eq!(at(45.01).state, State::Clear);
        assert_eq!(at(400.0).state, State::Clear);
    }

    #[test]
    fn test_no_signal() {
        for cm in [0.0, -1.0, -999.0, f64::NAN] {
            let c = at(cm);
            assert_eq!(c.state, State::NoSignal);
            assert_eq!(c.fill_percent, 0);
        }
        assert_eq!(classify(Reading::NO_SIGNAL).state, State::NoSignal);
    }

    #[test]
    fn test_fill_is_monotone() {
        let mut last = 100u8;
        let mut cm = 0.1;
        while cm <= 80.0 {
            let fill = at(cm).fill_percent;
            assert!(fill <= last, "fill rose at {cm}: {fill} > {last}");
            last = fill;
            cm += 0.1;
        }
        assert_eq!(at(60.0).fill_percent, 0);
        assert_eq!(at(75.0).fill_percent, 0);
    }

    #[test]
    fn test_lamp_per_state() {
        assert_eq!(State::NoSignal.lamp(), None);
        assert_eq!(State::Stop.lamp(), Some(Lamp::Red));
        assert_eq!(State::Slow.lamp(), Some(Lamp::Yellow));
        assert_eq!(State::Go.lamp(), State::Clear.lamp());
        assert_ne!(State::Go.color(), State::Clear.color());
        assert_ne!(State::Go.label(), State::Clear.label());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(State::Stop.status_text(), "STOP - Too close!");
        assert_eq!(State::Clear.status_text(), "CLEAR - Optimal spacing");
        assert_eq!(State::NoSignal.status_text(), "NO SIGNAL");
    }
}
