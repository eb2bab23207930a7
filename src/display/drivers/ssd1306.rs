/*
 *  display/drivers/ssd1306.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  SSD1306 OLED driver over I2C
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

use linux_embedded_hal::I2cdev;
use ssd1306::{
    mode::{BufferedGraphicsMode, DisplayConfig as _},
    prelude::*,
    size::{DisplaySize128x32, DisplaySize128x64},
    I2CDisplayInterface,
    Ssd1306,
};

use embedded_graphics::pixelcolor::BinaryColor;

use crate::config::DisplayConfig;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

use log::info;

type Panel<SIZE> = Ssd1306<I2CInterface<I2cdev>, SIZE, BufferedGraphicsMode<SIZE>>;

/// The two SSD1306 geometries we drive
enum Ssd1306Variants {
    Size128x64(Panel<DisplaySize128x64>),
    Size128x32(Panel<DisplaySize128x32>),
}

/// Run the same body against whichever geometry is wired up
macro_rules! with_panel {
    ($variants:expr, $d:ident => $body:expr) => {
        match $variants {
            Ssd1306Variants::Size128x64($d) => $body,
            Ssd1306Variants::Size128x32($d) => $body,
        }
    };
}

/// SSD1306 OLED over I2C
pub struct Ssd1306Driver {
    display: Ssd1306Variants,
    capabilities: DisplayCapabilities,
}

impl Ssd1306Driver {
    /// Open the bus and bind the controller at `address` (typically 0x3C or 0x3D)
    pub fn new_i2c(
        i2c_bus_path: &str,
        address: u8,
        config: &DisplayConfig,
    ) -> Result<Self, DisplayError> {
        info!("Initializing SSD1306 on {} at address 0x{:02X}", i2c_bus_path, address);

        let i2c = I2cdev::new(i2c_bus_path)
            .map_err(|e| DisplayError::I2cError(format!("Failed to open {}: {}", i2c_bus_path, e)))?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);

        let width = config.width.unwrap_or(128);
        let height = config.height.unwrap_or(64);

        let display = match (width, height) {
            (128, 64) => Ssd1306Variants::Size128x64(
                Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                    .into_buffered_graphics_mode(),
            ),
            (128, 32) => Ssd1306Variants::Size128x32(
                Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
                    .into_buffered_graphics_mode(),
            ),
            _ => {
                return Err(DisplayError::InvalidConfiguration(
                    format!("Unsupported SSD1306 size: {}x{}", width, height)
                ));
            }
        };

        let mut driver = Self {
            display,
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_rotation: true,
                supports_brightness: true,
            },
        };
        driver.init()?;

        info!("SSD1306 ready ({}x{})", width, height);
        Ok(driver)
    }
}

fn brightness_step(value: u8) -> Brightness {
    match value {
        0..=63 => Brightness::DIMMEST,
        64..=127 => Brightness::DIM,
        128..=191 => Brightness::NORMAL,
        _ => Brightness::BRIGHTEST,
    }
}

impl DisplayDriver for Ssd1306Driver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        with_panel!(&mut self.display, d => d.init()
            .map_err(|e| DisplayError::InitializationFailed(format!("{:?}", e))))
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError> {
        let step = brightness_step(value);
        with_panel!(&mut self.display, d => d.set_brightness(step))?;
        Ok(())
    }

    fn write_frame(&mut self, pixels: &[BinaryColor]) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        if pixels.len() != (w * h) as usize {
            return Err(DisplayError::DrawingError(
                format!("frame has {} pixels, panel needs {}", pixels.len(), w * h)
            ));
        }
        with_panel!(&mut self.display, d => {
            d.clear_buffer();
            for (i, px) in pixels.iter().enumerate() {
                if *px == BinaryColor::On {
                    let i = i as u32;
                    d.set_pixel(i % w, i / w, true);
                }
            }
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        with_panel!(&mut self.display, d => d.flush())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        with_panel!(&mut self.display, d => d.clear_buffer());
        self.flush()
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        let rotation = match degrees {
            0 => DisplayRotation::Rotate0,
            90 => DisplayRotation::Rotate90,
            180 => DisplayRotation::Rotate180,
            270 => DisplayRotation::Rotate270,
            _ => return Err(DisplayError::InvalidRotation(degrees)),
        };
        with_panel!(&mut self.display, d => d.set_rotation(rotation))?;
        let (w, h) = with_panel!(&self.display, d => d.dimensions());
        self.capabilities.width = w as u32;
        self.capabilities.height = h as u32;
        Ok(())
    }
}
