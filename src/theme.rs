/*
 *  theme.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Light/dark theme preference
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

use log::{debug, info, warn};
use std::fmt;

use crate::prefs::PreferenceStore;
use crate::surface::{Flag, Surface, Target, TargetId};

/// Persisted display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Exact persisted spelling only; anything else is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme handles. The icons only matter as a pair.
#[derive(Debug, Clone, Copy)]
struct ThemeTargets {
    root: Option<Target>,
    icons: Option<(Target, Target)>,
}

impl ThemeTargets {
    fn resolve<S: Surface + ?Sized>(surface: &S) -> Self {
        let sun = Target::resolve(surface, TargetId::SunIcon);
        let moon = Target::resolve(surface, TargetId::MoonIcon);
        Self {
            root: Target::resolve(surface, TargetId::Root),
            icons: sun.zip(moon),
        }
    }
}

/// Loads, applies and persists the light/dark preference.
pub struct ThemeStore<P> {
    store: P,
    targets: ThemeTargets,
    current: ThemePreference,
}

impl<P: PreferenceStore> ThemeStore<P> {
    pub fn new<S: Surface + ?Sized>(store: P, surface: &S) -> Self {
        Self {
            store,
            targets: ThemeTargets::resolve(surface),
            current: ThemePreference::default(),
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Persisted preference, light when absent or unrecognized.
    pub fn load(&self) -> ThemePreference {
        match self.store.load() {
            Some(v) => ThemePreference::parse(&v).unwrap_or_else(|| {
                debug!("Unrecognized theme preference {:?}, using light", v);
                ThemePreference::Light
            }),
            None => ThemePreference::Light,
        }
    }

    /// Load then apply, for startup.
    pub fn restore<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ThemePreference {
        let pref = self.load();
        self.apply(pref, surface);
        pref
    }

    pub fn apply<S: Surface + ?Sized>(&mut self, pref: ThemePreference, surface: &mut S) {
        self.current = pref;
        let dark = pref == ThemePreference::Dark;

        if let Some(root) = self.targets.root {
            surface.set_flag(root.id(), Flag::Dark, dark);
        }
        if let Some((sun, moon)) = self.targets.icons {
            surface.set_flag(sun.id(), Flag::Hidden, dark);
            surface.set_flag(moon.id(), Flag::Hidden, !dark);
        }
        if let Err(e) = surface.present() {
            warn!("Failed to present {} theme: {}", pref, e);
        }
    }

    pub fn toggle<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ThemePreference {
        let next = self.current.flipped();
        self.persist(next);
        self.apply(next, surface);
        info!("Theme switched to {}", next);
        next
    }

    /// Force light mode whatever the current state.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.persist(ThemePreference::Light);
        self.apply(ThemePreference::Light, surface);
        info!("Theme reset to light");
    }

    fn persist(&mut self, pref: ThemePreference) {
        if let Err(e) = self.store.save(pref.as_str()) {
            warn!("Could not save theme preference: {}", e);
        }
    }
}
