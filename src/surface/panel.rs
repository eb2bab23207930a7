/*
 *  surface/panel.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Dashboard drawn on a monochrome panel
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

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use log::debug;

use crate::classifier::ColorToken;
use crate::display::error::DisplayError;
use crate::display::factory::BoxedDriver;
use crate::display::layout::PanelLayout;
use crate::vframebuf::VarFrameBuf;
use super::{Flag, Style, Surface, SurfaceState, TargetId};

const LAMPS: [TargetId; 3] = [TargetId::LampStop, TargetId::LampSlow, TargetId::LampGo];

/// Dashboard drawn onto a monochrome panel.
///
/// Every `present` redraws the whole frame from the buffered target state
/// and hands it to the driver.
pub struct PanelSurface {
    driver: BoxedDriver,
    layout: PanelLayout,
    fb: VarFrameBuf<BinaryColor>,
    state: SurfaceState,
}

impl PanelSurface {
    pub fn new(driver: BoxedDriver) -> Self {
        let (w, h) = driver.dimensions();
        debug!("panel surface {}x{}", w, h);
        Self {
            driver,
            layout: PanelLayout::for_size(w, h),
            fb: VarFrameBuf::new(w, h, BinaryColor::Off),
            state: SurfaceState::default(),
        }
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Last frame drawn
    pub fn frame(&self) -> &VarFrameBuf<BinaryColor> {
        &self.fb
    }

    fn draw(&mut self) -> Result<(), Infallible> {
        let dark = self.state.flag(TargetId::Root, Flag::Dark);
        let (fg, bg) = if dark {
            (BinaryColor::On, BinaryColor::Off)
        } else {
            (BinaryColor::Off, BinaryColor::On)
        };
        let layout = &self.layout;
        let state = &self.state;
        let fb = &mut self.fb;

        fb.clear(bg)?;

        // status line stops short of the theme icon
        let status_area = Rectangle::new(
            layout.status_origin,
            Size::new(layout.icon.top_left.x.max(1) as u32 - 1, layout.status_font.character_size.height),
        );
        if let Some(status) = state.text(TargetId::Status) {
            Text::with_baseline(
                status,
                layout.status_origin,
                MonoTextStyle::new(layout.status_font, fg),
                Baseline::Top,
            )
            .draw(&mut fb.clipped(&status_area))?;
        }

        let readout = state.text(TargetId::Readout).unwrap_or("");
        let boxed = layout.readout_box;
        let text_at = boxed.top_left + Point::new(2, 2);
        let mut ink = fg;
        match state.color(TargetId::Readout) {
            Some(ColorToken::Danger) => {
                boxed.into_styled(PrimitiveStyle::with_fill(fg)).draw(fb)?;
                ink = bg;
            }
            Some(ColorToken::Warning) => {
                let y = boxed.top_left.y + boxed.size.height as i32 - 1;
                Line::new(Point::new(boxed.top_left.x, y), Point::new(boxed.top_left.x + boxed.size.width as i32 - 1, y))
                    .into_styled(PrimitiveStyle::with_stroke(fg, 1))
                    .draw(fb)?;
            }
            Some(ColorToken::Success) => {
                boxed.into_styled(PrimitiveStyle::with_stroke(fg, 1)).draw(fb)?;
            }
            Some(ColorToken::TextPrimary) | None => {}
        }
        Text::with_baseline(readout, text_at, MonoTextStyle::new(layout.readout_font, ink), Baseline::Top)
            .draw(&mut fb.clipped(&boxed))?;

        for (id, corner) in LAMPS.iter().zip(layout.lamps) {
            let style = if state.flag(*id, Flag::Active) {
                PrimitiveStyle::with_fill(fg)
            } else {
                PrimitiveStyle::with_stroke(fg, 1)
            };
            Circle::new(corner, layout.lamp_diameter).into_styled(style).draw(fb)?;
        }

        layout.meter.into_styled(PrimitiveStyle::with_stroke(fg, 1)).draw(fb)?;
        let percent = state.width(TargetId::MeterFill).unwrap_or(0);
        layout.meter_fill(percent).into_styled(PrimitiveStyle::with_fill(fg)).draw(fb)?;

        let icon = layout.icon;
        if !state.flag(TargetId::SunIcon, Flag::Hidden) {
            Circle::with_center(icon.center(), 5)
                .into_styled(PrimitiveStyle::with_fill(fg))
                .draw(fb)?;
            for (dx, dy) in [(0, 4), (4, 0), (0, -4), (-4, 0)] {
                Pixel(icon.center() + Point::new(dx, dy), fg).draw(fb)?;
            }
        }
        if !state.flag(TargetId::MoonIcon, Flag::Hidden) {
            Circle::with_center(icon.center(), 9)
                .into_styled(PrimitiveStyle::with_fill(fg))
                .draw(fb)?;
            Circle::with_center(icon.center() + Point::new(3, -2), 7)
                .into_styled(PrimitiveStyle::with_fill(bg))
                .draw(fb)?;
        }
        Ok(())
    }
}

impl Surface for PanelSurface {
    fn contains(&self, _target: TargetId) -> bool {
        true
    }

    fn set_text(&mut self, target: TargetId, text: &str) {
        self.state.apply_text(target, text);
    }

    fn set_style(&mut self, target: TargetId, style: Style) {
        self.state.apply_style(target, style);
    }

    fn set_flag(&mut self, target: TargetId, flag: Flag, on: bool) {
        self.state.apply_flag(target, flag, on);
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.draw().unwrap_or_else(|e| match e {});
        self.driver.write_frame(self.fb.as_slice())?;
        self.driver.flush()
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        self.driver.clear()
    }
}
