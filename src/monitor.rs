/*
 *  monitor.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Periodic polling task and theme gesture handling
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

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};

use crate::classifier::Classification;
use crate::config::Ordering;
use crate::httpsource::DistanceSource;
use crate::prefs::PreferenceStore;
use crate::reading::Reading;
use crate::renderer::Renderer;
use crate::sampler::{reading_from, Sampler};
use crate::surface::{Surface, TargetId};
use crate::theme::ThemeStore;

/// User gestures aimed at the theme control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Single activation: flip light/dark
    ToggleTheme,
    /// Double activation: back to light
    ResetTheme,
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub ordering: Ordering,
}

/// Owns everything on the render path: the sampler, the theme and the surface.
///
/// Requests are issued on every tick without waiting for earlier ones and
/// their results come back over a channel tagged with the tick number.
pub struct Monitor<D, S, P> {
    source: D,
    surface: S,
    sampler: Sampler,
    theme: ThemeStore<P>,
    settings: MonitorSettings,
    issued: u64,
    newest_applied: Option<u64>,
    stale_dropped: u64,
}

impl<D, S, P> Monitor<D, S, P>
where
    D: DistanceSource,
    S: Surface,
    P: PreferenceStore,
{
    pub fn new(source: D, surface: S, theme: ThemeStore<P>, settings: MonitorSettings) -> Self {
        let sampler = Sampler::new(Renderer::new(&surface));
        Self {
            source,
            surface,
            sampler,
            theme,
            settings,
            issued: 0,
            newest_applied: None,
            stale_dropped: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn theme(&self) -> &ThemeStore<P> {
        &self.theme
    }

    /// Requests issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Responses discarded under `Ordering::Issue`
    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }

    /// Whether the surface has a theme control to receive gestures on
    pub fn accepts_gestures(&self) -> bool {
        self.surface.contains(TargetId::ThemeToggle)
    }

    /// Restore the persisted theme onto the surface.
    pub fn restore_theme(&mut self) {
        let pref = self.theme.restore(&mut self.surface);
        info!("Theme restored: {}", pref);
    }

    /// Apply the response to request `seq`.
    pub fn apply(&mut self, seq: u64, reading: Reading) -> Option<Classification> {
        if self.settings.ordering == Ordering::Issue
            && self.newest_applied.is_some_and(|newest| seq < newest)
        {
            debug!("Dropping stale response #{} (newest #{:?})", seq, self.newest_applied);
            self.stale_dropped += 1;
            return None;
        }
        self.newest_applied = Some(self.newest_applied.map_or(seq, |n| n.max(seq)));
        self.sampler.observe(reading, &mut self.surface)
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        if !self.accepts_gestures() {
            debug!("Ignoring {:?}, no theme control", event);
            return;
        }
        match event {
            UiEvent::ToggleTheme => {
                self.theme.toggle(&mut self.surface);
            }
            UiEvent::ResetTheme => {
                self.theme.reset(&mut self.surface);
            }
        }
    }

    fn issue(&mut self, results: &mpsc::UnboundedSender<(u64, Reading)>) {
        self.issued += 1;
        let seq = self.issued;
        let source = self.source.clone();
        let results = results.clone();
        tokio::spawn(async move {
            let reading = reading_from(source.fetch().await);
            // receiver gone means we are shutting down
            let _ = results.send((seq, reading));
        });
    }

    /// Tick until `shutdown` changes. The first tick fires immediately.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<UiEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Self {
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let mut ticker = interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Polling every {:?}, {:?} ordering", self.settings.poll_interval, self.settings.ordering);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.issue(&results_tx),
                Some((seq, reading)) = results_rx.recv() => {
                    self.apply(seq, reading);
                }
                Some(event) = events.recv() => self.handle_event(event),
                _ = shutdown.changed() => {
                    debug!("Monitor received stop signal. Exiting.");
                    break;
                }
            }
        }

        if let Err(e) = self.surface.blank() {
            warn!("Failed to blank surface: {}", e);
        }
        info!("Monitor stopped after {} requests, {} renders", self.issued, self.sampler.renders());
        self
    }
}
