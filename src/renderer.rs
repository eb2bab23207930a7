/*
 *  renderer.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Pushes a classification onto a surface
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

use arrayvec::ArrayString;
use core::fmt::Write;
use log::{error, warn};

use crate::classifier::{Classification, Lamp};
use crate::reading::Reading;
use crate::surface::{Flag, Style, Surface, Target, TargetId};

/// Readout shown while there is no signal.
pub const READOUT_PLACEHOLDER: &str = "-- cm";

/// Largest distance printed as a number.
pub const READOUT_MAX_CM: f64 = 999.9;

/// Readout for anything past `READOUT_MAX_CM`.
pub const READOUT_OVERFLOW: &str = "999+ cm";

/// Handles for every target a render touches, resolved once.
#[derive(Debug, Clone, Copy)]
pub struct RenderTargets {
    readout: Target,
    status: Target,
    lamp_stop: Target,
    lamp_slow: Target,
    lamp_go: Target,
    meter: Target,
}

impl RenderTargets {
    /// `None` when any required target is missing from the surface.
    pub fn resolve<S: Surface + ?Sized>(surface: &S) -> Option<Self> {
        Some(Self {
            readout: Target::resolve(surface, TargetId::Readout)?,
            status: Target::resolve(surface, TargetId::Status)?,
            lamp_stop: Target::resolve(surface, TargetId::LampStop)?,
            lamp_slow: Target::resolve(surface, TargetId::LampSlow)?,
            lamp_go: Target::resolve(surface, TargetId::LampGo)?,
            meter: Target::resolve(surface, TargetId::MeterFill)?,
        })
    }

    fn lamp(&self, lamp: Lamp) -> Target {
        match lamp {
            Lamp::Red => self.lamp_stop,
            Lamp::Yellow => self.lamp_slow,
            Lamp::Green => self.lamp_go,
        }
    }
}

/// Pushes a classification onto a surface.
#[derive(Debug, Clone)]
pub struct Renderer {
    targets: Option<RenderTargets>,
}

impl Renderer {
    pub fn new<S: Surface + ?Sized>(surface: &S) -> Self {
        let targets = RenderTargets::resolve(surface);
        if targets.is_none() {
            let missing: Vec<TargetId> = [
                TargetId::Readout,
                TargetId::Status,
                TargetId::LampStop,
                TargetId::LampSlow,
                TargetId::LampGo,
                TargetId::MeterFill,
            ]
            .into_iter()
            .filter(|t| !surface.contains(*t))
            .collect();
            warn!("Surface lacks {:?}, readings will not be drawn", missing);
        }
        Self { targets }
    }

    /// False when the surface was missing a target at construction.
    pub fn is_active(&self) -> bool {
        self.targets.is_some()
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, class: &Classification, reading: Reading) {
        let Some(t) = self.targets.as_ref() else {
            return;
        };

        surface.set_text(t.readout.id(), &format_readout(reading));

        for lamp in Lamp::ALL {
            surface.set_flag(t.lamp(lamp).id(), Flag::Active, false);
        }
        if let Some(lamp) = class.state.lamp() {
            surface.set_flag(t.lamp(lamp).id(), Flag::Active, true);
        }

        surface.set_style(t.meter.id(), Style::Width(class.fill_percent));
        surface.set_text(t.status.id(), &class.state.status_text());
        surface.set_style(t.readout.id(), Style::Color(class.state.color()));

        if let Err(e) = surface.present() {
            error!("Failed to present frame for {:?}: {}", class.state, e);
        }
    }
}

/// Round to tenths with exact halves going up, not to even.
fn round_tenths(cm: f64) -> f64 {
    // a double sits exactly on a half tenth only when 4x is an odd integer
    let quarters = cm * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        (cm * 10.0).ceil() / 10.0
    } else {
        cm
    }
}

/// "23.4 cm", or the placeholder without a signal.
pub fn format_readout(reading: Reading) -> ArrayString<32> {
    let mut s = ArrayString::<32>::new();
    match reading.distance() {
        Some(cm) if cm > READOUT_MAX_CM => s.push_str(READOUT_OVERFLOW),
        Some(cm) => {
            // at most "999.9 cm"
            if write!(s, "{:.1} cm", round_tenths(cm)).is_err() {
                s.clear();
                s.push_str(READOUT_OVERFLOW);
            }
        }
        None => s.push_str(READOUT_PLACEHOLDER),
    }
    s
}
