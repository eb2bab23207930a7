/*
 *  config.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  YAML configuration layered with command line overrides
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

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SOURCE_URL: &str = "http://127.0.0.1:8080/data";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_MS: u64 = 800;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub source: Option<SourceConfig>,
    pub display: Option<DisplayConfig>,
    pub prefs: Option<PrefsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub ordering: Option<Ordering>,
}

/// Which late response may overwrite the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Whatever resolves last is shown.
    #[default]
    Arrival,
    /// Responses older than one already shown are dropped.
    Issue,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotate_deg: Option<u16>,
    pub brightness: Option<u8>,     // 0-255
    pub driver: Option<DriverKind>,
    pub bus: Option<BusConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrefsConfig {
    pub path: Option<PathBuf>,
    /// false keeps the theme in memory only
    pub persist: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BusConfig {
    I2c {
        bus: String,        // e.g. "/dev/i2c-1"
        address: u8,        // e.g. 0x3C (I2C addresses are 7-bit, stored in u8)
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Headless, frames go to the log
    Console,
    Ssd1306,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "parkmon", version, about = "Parking distance status monitor")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(short = 'c', long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Enable debug log level
    #[arg(short = 'v', long, alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Sensor endpoint returning {"distance": <cm>}
    #[arg(short = 'u', long, value_hint = ValueHint::Url)]
    pub url: Option<String>,
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    #[arg(long, value_enum)]
    pub ordering: Option<Ordering>,
    /// Log frames instead of driving a panel
    #[arg(long, action = ArgAction::SetTrue)]
    pub headless: bool,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_rotate_deg: Option<u16>,
    #[arg(long)]
    pub i2c_bus: Option<String>,
    /// Theme preference file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub prefs: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML (explicit path or search), layer the CLI on top, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of the effective config.
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/parkmon/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/parkmon/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/parkmon.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["parkmon.yaml", "config.yaml", "config/parkmon.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }

    match (&mut dst.source, src.source) {
        (None, Some(s)) => dst.source = Some(s),
        (Some(d), Some(s)) => merge_source(d, s),
        _ => {}
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.prefs, src.prefs) {
        (None, Some(p)) => dst.prefs = Some(p),
        (Some(d), Some(s)) => {
            if s.path.is_some()    { d.path = s.path; }
            if s.persist.is_some() { d.persist = s.persist; }
        }
        _ => {}
    }
}

fn merge_source(dst: &mut SourceConfig, src: SourceConfig) {
    if src.url.is_some()              { dst.url = src.url; }
    if src.poll_interval_ms.is_some() { dst.poll_interval_ms = src.poll_interval_ms; }
    if src.timeout_ms.is_some()       { dst.timeout_ms = src.timeout_ms; }
    if src.ordering.is_some()         { dst.ordering = src.ordering; }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.rotate_deg.is_some()  { dst.rotate_deg = src.rotate_deg; }
    if src.brightness.is_some()  { dst.brightness = src.brightness; }
    if src.driver.is_some()      { dst.driver = src.driver; }
    if src.bus.is_some()         { dst.bus = src.bus; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.debug { cfg.log_level = Some("debug".to_string()); }
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    let any_source = cli.url.is_some()
        || cli.poll_interval_ms.is_some()
        || cli.timeout_ms.is_some()
        || cli.ordering.is_some();
    if any_source {
        let source = cfg.source.get_or_insert_with(SourceConfig::default);
        if cli.url.is_some()              { source.url = cli.url.clone(); }
        if cli.poll_interval_ms.is_some() { source.poll_interval_ms = cli.poll_interval_ms; }
        if cli.timeout_ms.is_some()       { source.timeout_ms = cli.timeout_ms; }
        if cli.ordering.is_some()         { source.ordering = cli.ordering; }
    }

    let any_display = cli.headless
        || cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_rotate_deg.is_some()
        || cli.i2c_bus.is_some();
    if any_display {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.headless                      { display.driver = Some(DriverKind::Console); }
        if cli.display_width.is_some()       { display.width = cli.display_width; }
        if cli.display_height.is_some()      { display.height = cli.display_height; }
        if cli.display_rotate_deg.is_some()  { display.rotate_deg = cli.display_rotate_deg; }
        if let Some(bus) = cli.i2c_bus.as_ref() {
            let address = match display.bus.as_ref() {
                Some(BusConfig::I2c { address, .. }) => *address,
                None => 0x3C,
            };
            display.bus = Some(BusConfig::I2c { bus: bus.clone(), address });
        }
    }

    if cli.prefs.is_some() {
        cfg.prefs.get_or_insert_with(PrefsConfig::default).path = cli.prefs.clone();
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(source) = cfg.source.as_ref() {
        if let Some(url) = source.url.as_ref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!("source url must be http(s): {}", url)));
            }
        }
        if source.poll_interval_ms == Some(0) {
            return Err(ConfigError::Validation("source poll_interval_ms must be > 0".into()));
        }
        if source.timeout_ms == Some(0) {
            return Err(ConfigError::Validation("source timeout_ms must be > 0".into()));
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if let (Some(w), Some(h)) = (display.width, display.height) {
            if w == 0 || h == 0 {
                return Err(ConfigError::Validation("display width/height must be > 0".into()));
            }
        }
        if let Some(rot) = display.rotate_deg {
            match rot {
                0 | 90 | 180 | 270 => {},
                _ => return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()))
            }
        }
        if display.driver == Some(DriverKind::Ssd1306) && display.bus.is_none() {
            return Err(ConfigError::Validation("ssd1306 driver needs a bus".into()));
        }
    }
    Ok(())
}

impl Config {
    pub fn source_url(&self) -> &str {
        self.source.as_ref()
            .and_then(|s| s.url.as_deref())
            .unwrap_or(DEFAULT_SOURCE_URL)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.source.as_ref()
                .and_then(|s| s.poll_interval_ms)
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.source.as_ref()
                .and_then(|s| s.timeout_ms)
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        )
    }

    pub fn ordering(&self) -> Ordering {
        self.source.as_ref().and_then(|s| s.ordering).unwrap_or_default()
    }

    pub fn driver(&self) -> DriverKind {
        self.display.as_ref()
            .and_then(|d| d.driver)
            .unwrap_or(DriverKind::Console)
    }

    pub fn persist_prefs(&self) -> bool {
        self.prefs.as_ref().and_then(|p| p.persist).unwrap_or(true)
    }

    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.prefs.as_ref().and_then(|p| p.path.clone())
    }
}
