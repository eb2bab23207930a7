/*
 *  display/factory.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Builds the configured panel driver
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

use crate::config::{DisplayConfig, DriverKind};
use crate::display::error::DisplayFactoryError;
use crate::display::traits::DisplayDriver;
use log::{info, warn};

#[cfg(feature = "driver-ssd1306")]
use crate::config::BusConfig;
#[cfg(feature = "driver-ssd1306")]
use crate::display::drivers::ssd1306::Ssd1306Driver;

/// Type alias for boxed display driver trait objects
pub type BoxedDriver = Box<dyn DisplayDriver>;

/// Builds the panel driver a config names
pub struct DisplayDriverFactory;

impl DisplayDriverFactory {
    /// Open the configured panel, then apply rotation and brightness.
    ///
    /// Returns `Ok(None)` when the config asks for the console, which has no driver.
    pub fn create_from_config(
        config: &DisplayConfig
    ) -> Result<Option<BoxedDriver>, DisplayFactoryError> {
        let kind = config.driver.unwrap_or(DriverKind::Console);
        let mut driver = match kind {
            DriverKind::Console => return Ok(None),
            DriverKind::Ssd1306 => Self::create_ssd1306(config)?,
        };
        Self::configure(driver.as_mut(), config)?;

        let (w, h) = driver.dimensions();
        info!("Display driver {:?} ready, {}x{}", kind, w, h);
        Ok(Some(driver))
    }

    /// Apply the configured rotation and brightness to an open driver.
    pub fn configure(
        driver: &mut dyn DisplayDriver,
        config: &DisplayConfig
    ) -> Result<(), DisplayFactoryError> {
        if let Some(degrees) = config.rotate_deg.filter(|d| *d != 0) {
            driver.set_rotation(degrees)?;
        }
        if let Some(level) = config.brightness {
            if driver.capabilities().supports_brightness {
                driver.set_brightness(level)?;
            } else {
                warn!("Driver ignores brightness {}", level);
            }
        }
        Ok(())
    }

    #[cfg(feature = "driver-ssd1306")]
    fn create_ssd1306(config: &DisplayConfig) -> Result<BoxedDriver, DisplayFactoryError> {
        match config.bus.as_ref() {
            Some(BusConfig::I2c { bus, address }) => {
                Ok(Box::new(Ssd1306Driver::new_i2c(bus, *address, config)?))
            }
            None => Err(DisplayFactoryError::NoBusConfiguration),
        }
    }

    #[cfg(not(feature = "driver-ssd1306"))]
    fn create_ssd1306(_config: &DisplayConfig) -> Result<BoxedDriver, DisplayFactoryError> {
        Err(DisplayFactoryError::DriverNotEnabled("driver-ssd1306"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockDriver;
    use crate::display::error::DisplayError;

    #[test]
    fn test_configure_applies_rotation_and_brightness() {
        let mut driver = MockDriver::new_with_size(128, 64);
        let config = DisplayConfig {
            rotate_deg: Some(180),
            brightness: Some(40),
            ..Default::default()
        };
        DisplayDriverFactory::configure(&mut driver, &config).unwrap();

        let state = driver.state();
        let st = state.lock().unwrap();
        assert_eq!(st.last_rotation, Some(180));
        assert_eq!(st.last_brightness, Some(40));
    }

    #[test]
    fn test_configure_skips_zero_rotation() {
        let mut driver = MockDriver::new_with_size(128, 64);
        let config = DisplayConfig {
            rotate_deg: Some(0),
            ..Default::default()
        };
        DisplayDriverFactory::configure(&mut driver, &config).unwrap();

        let state = driver.state();
        let st = state.lock().unwrap();
        assert_eq!(st.last_rotation, None);
        assert_eq!(st.last_brightness, None);
    }

    #[test]
    fn test_configure_rejects_bad_rotation() {
        let mut driver = MockDriver::new_with_size(128, 64);
        let config = DisplayConfig {
            rotate_deg: Some(45),
            ..Default::default()
        };
        assert!(matches!(
            DisplayDriverFactory::configure(&mut driver, &config),
            Err(DisplayFactoryError::DriverInitFailed(DisplayError::InvalidRotation(45)))
        ));
    }

    #[test]
    fn test_console_has_no_driver() {
        let config = DisplayConfig::default();
        assert!(DisplayDriverFactory::create_from_config(&config).unwrap().is_none());
    }

    #[cfg(feature = "driver-ssd1306")]
    #[test]
    fn test_ssd1306_without_bus() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Ssd1306),
            ..Default::default()
        };
        assert!(matches!(
            DisplayDriverFactory::create_from_config(&config),
            Err(DisplayFactoryError::NoBusConfiguration)
        ));
    }

    #[cfg(not(feature = "driver-ssd1306"))]
    #[test]
    fn test_ssd1306_not_compiled_in() {
        let config = DisplayConfig {
            driver: Some(DriverKind::Ssd1306),
            ..Default::default()
        };
        assert!(matches!(
            DisplayDriverFactory::create_from_config(&config),
            Err(DisplayFactoryError::DriverNotEnabled(_))
        ));
    }
}
