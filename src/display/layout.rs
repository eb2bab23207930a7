/*
 *  display/layout.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Panel geometry presets
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

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_5X8, FONT_9X15},
    MonoFont,
};
use embedded_graphics::primitives::Rectangle;

/// Where each dashboard element sits on a panel of a given size
#[derive(Debug, Clone)]
pub struct PanelLayout {
    /// Status line, top left
    pub status_origin: Point,
    pub status_font: &'static MonoFont<'static>,

    /// Box holding the distance readout
    pub readout_box: Rectangle,
    pub readout_font: &'static MonoFont<'static>,

    /// Top-left corners of the stop, slow and go lamps
    pub lamps: [Point; 3],
    pub lamp_diameter: u32,

    /// Outline of the proximity meter; the fill is drawn inside it
    pub meter: Rectangle,

    /// Theme icon square, top right
    pub icon: Rectangle,
}

impl PanelLayout {
    /// Pick a preset by height: 64 rows and up get the large readout
    pub fn for_size(width: u32, height: u32) -> Self {
        if height >= 64 {
            Self::tall(width, height)
        } else {
            Self::compact(width, height)
        }
    }

    fn tall(width: u32, height: u32) -> Self {
        let lamp_diameter = 12;
        Self {
            status_origin: Point::new(0, 0),
            status_font: &FONT_5X8,
            readout_box: Rectangle::new(Point::new(0, 13), Size::new(82, 24)),
            readout_font: &FONT_10X20,
            lamps: Self::lamp_row(width, 18, lamp_diameter),
            lamp_diameter,
            meter: Rectangle::new(Point::new(0, height as i32 - 16), Size::new(width, 12)),
            icon: Rectangle::new(Point::new(width as i32 - 9, 0), Size::new(9, 9)),
        }
    }

    fn compact(width: u32, height: u32) -> Self {
        let lamp_diameter = 9;
        Self {
            status_origin: Point::new(0, 0),
            status_font: &FONT_5X8,
            readout_box: Rectangle::new(Point::new(0, 10), Size::new(74, 16)),
            readout_font: &FONT_9X15,
            lamps: Self::lamp_row(width, 13, lamp_diameter),
            lamp_diameter,
            meter: Rectangle::new(Point::new(0, height as i32 - 5), Size::new(width, 5)),
            icon: Rectangle::new(Point::new(width as i32 - 9, 0), Size::new(9, 9)),
        }
    }

    /// Three lamps flush right, two pixels apart
    fn lamp_row(width: u32, y: i32, diameter: u32) -> [Point; 3] {
        let pitch = diameter as i32 + 2;
        let x0 = width as i32 - 3 * pitch;
        [
            Point::new(x0, y),
            Point::new(x0 + pitch, y),
            Point::new(x0 + 2 * pitch, y),
        ]
    }

    /// Inner fill rectangle for a meter at `percent`
    pub fn meter_fill(&self, percent: u8) -> Rectangle {
        let inner_w = self.meter.size.width.saturating_sub(4);
        let inner_h = self.meter.size.height.saturating_sub(4);
        let w = inner_w * percent.min(100) as u32 / 100;
        Rectangle::new(self.meter.top_left + Point::new(2, 2), Size::new(w, inner_h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::ContainsPoint;

    fn inside(outer: &Rectangle, inner: &Rectangle) -> bool {
        inner.size.width == 0
            || (outer.contains(inner.top_left)
                && outer.contains(inner.top_left + inner.size - Size::new(1, 1)))
    }

    #[test]
    fn test_presets_fit_panel() {
        for (w, h) in [(128, 64), (128, 32)] {
            let layout = PanelLayout::for_size(w, h);
            let panel = Rectangle::new(Point::zero(), Size::new(w, h));
            assert!(inside(&panel, &layout.meter), "{}x{} meter", w, h);
            assert!(inside(&panel, &layout.readout_box), "{}x{} readout", w, h);
            assert!(inside(&panel, &layout.icon), "{}x{} icon", w, h);
            for lamp in layout.lamps {
                let r = Rectangle::new(lamp, Size::new_equal(layout.lamp_diameter));
                assert!(inside(&panel, &r), "{}x{} lamp", w, h);
                assert!(r.top_left.x >= layout.readout_box.top_left.x
                    + layout.readout_box.size.width as i32);
            }
        }
    }

    #[test]
    fn test_meter_fill_scales() {
        let layout = PanelLayout::for_size(128, 64);
        assert_eq!(layout.meter_fill(0).size.width, 0);
        assert_eq!(layout.meter_fill(100).size.width, 124);
        assert_eq!(layout.meter_fill(50).size.width, 62);
        assert_eq!(layout.meter_fill(250).size.width, 124);
        assert!(inside(&layout.meter, &layout.meter_fill(100)));
    }
}
