/*
 *  display/drivers/mock.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Mock panel driver for tests
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

use embedded_graphics::pixelcolor::BinaryColor;

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

use std::sync::{Arc, Mutex};

/// Panel stand-in that keeps the last frame it was handed
#[derive(Debug, Clone)]
pub struct MockDriver {
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

/// Shared so a test can keep a handle after the driver is boxed
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub flush_count: usize,
    pub clear_count: usize,
    pub frames_written: usize,
    pub last_brightness: Option<u8>,
    pub last_rotation: Option<u16>,
    /// Frame as of the most recent flush
    pub flushed: Vec<BinaryColor>,
    pending: Vec<BinaryColor>,
    pub simulate_flush_failure: bool,
}

impl MockDriver {
    pub fn new_with_size(width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_rotation: true,
                supports_brightness: true,
            },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }
}

impl MockDriverState {
    pub fn pixel(&self, width: u32, x: u32, y: u32) -> Option<BinaryColor> {
        self.flushed.get((y * width + x) as usize).copied()
    }

    pub fn lit(&self) -> usize {
        self.flushed.iter().filter(|p| **p == BinaryColor::On).count()
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError> {
        self.state.lock().unwrap().last_brightness = Some(value);
        Ok(())
    }

    fn write_frame(&mut self, pixels: &[BinaryColor]) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        if pixels.len() != (w * h) as usize {
            return Err(DisplayError::DrawingError(format!("bad frame length {}", pixels.len())));
        }
        let mut state = self.state.lock().unwrap();
        state.pending = pixels.to_vec();
        state.frames_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();
        if state.simulate_flush_failure {
            return Err(DisplayError::Other("Simulated flush failure".to_string()));
        }
        state.flushed = state.pending.clone();
        state.flush_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        let mut state = self.state.lock().unwrap();
        state.pending = vec![BinaryColor::Off; (w * h) as usize];
        state.clear_count += 1;
        drop(state);
        self.flush()
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        if !matches!(degrees, 0 | 90 | 180 | 270) {
            return Err(DisplayError::InvalidRotation(degrees));
        }
        self.state.lock().unwrap().last_rotation = Some(degrees);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_only_visible_after_flush() {
        let mut driver = MockDriver::new_with_size(4, 2);
        let state = driver.state();

        let mut frame = vec![BinaryColor::Off; 8];
        frame[5] = BinaryColor::On;
        driver.write_frame(&frame).unwrap();
        assert_eq!(state.lock().unwrap().lit(), 0);

        driver.flush().unwrap();
        let s = state.lock().unwrap();
        assert_eq!(s.lit(), 1);
        assert_eq!(s.pixel(4, 1, 1), Some(BinaryColor::On));
    }

    #[test]
    fn test_rejects_wrong_frame_size() {
        let mut driver = MockDriver::new_with_size(4, 2);
        assert!(matches!(
            driver.write_frame(&[BinaryColor::On; 3]),
            Err(DisplayError::DrawingError(_))
        ));
    }

    #[test]
    fn test_rotation_validation() {
        let mut driver = MockDriver::new_with_size(4, 2);
        assert!(driver.set_rotation(180).is_ok());
        assert!(matches!(driver.set_rotation(45), Err(DisplayError::InvalidRotation(45))));
        assert_eq!(driver.state().lock().unwrap().last_rotation, Some(180));
    }
}
