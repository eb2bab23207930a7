/*
 *  prefs.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Persisted key/value preference stores
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

use dirs_next::config_dir;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the theme preference lives under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Single-value persistence capability.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> Result<(), PrefsError>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for Box<P> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&mut self, value: &str) -> Result<(), PrefsError> {
        (**self).save(value)
    }
}

/// Keeps the value for the life of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self { value: Some(value.to_string()) }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) -> Result<(), PrefsError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// One key inside a small YAML map on disk. Other keys are left alone.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P, key: &str) -> Self {
        Self { path: path.into(), key: key.to_string() }
    }

    /// ~/.config/parkmon/prefs.yaml
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|d| d.join("parkmon").join("prefs.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        match fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(s) => Ok(serde_yaml::from_str(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Option<String> {
        match self.read_map() {
            Ok(mut map) => map.remove(&self.key),
            Err(e) => {
                debug!("Ignoring unreadable preferences {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, value: &str) -> Result<(), PrefsError> {
        // a corrupt file is replaced rather than blocking the write
        let mut map = self.read_map().unwrap_or_default();
        map.insert(self.key.clone(), value.to_string());

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, serde_yaml::to_string(&map)?)?;
        Ok(())
    }
}
