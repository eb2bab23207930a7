/*
 *  main.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  Entry point: config, logging, signals and the monitor task
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

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{mpsc, watch};

use parkmon::config::{self, Cli, Config};
use parkmon::display::DisplayDriverFactory;
use parkmon::httpsource::DistanceClient;
use parkmon::prefs::{FileStore, MemoryStore, PreferenceStore, THEME_KEY};
use parkmon::surface::{ConsoleSurface, PanelSurface, Surface};
use parkmon::theme::ThemeStore;
use parkmon::{Monitor, MonitorSettings, UiEvent};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// SIGUSR1 toggles the theme, SIGUSR2 resets it to light.
async fn gesture_listener(events: mpsc::Sender<UiEvent>) -> anyhow::Result<()> {
    let mut usr1 = signal(SignalKind::user_defined1())?;
    let mut usr2 = signal(SignalKind::user_defined2())?;

    loop {
        let event = tokio::select! {
            _ = usr1.recv() => UiEvent::ToggleTheme,
            _ = usr2.recv() => UiEvent::ResetTheme,
        };
        if events.send(event).await.is_err() {
            break;
        }
    }
    Ok(())
}

fn preference_store(cfg: &Config) -> Box<dyn PreferenceStore> {
    if !cfg.persist_prefs() {
        info!("Theme preference kept in memory");
        return Box::new(MemoryStore::new());
    }
    match cfg.prefs_path().or_else(FileStore::default_path) {
        Some(path) => {
            info!("Theme preference stored in {}", path.display());
            Box::new(FileStore::new(path, THEME_KEY))
        }
        None => {
            warn!("No config directory, theme preference kept in memory");
            Box::new(MemoryStore::new())
        }
    }
}

async fn run<S: Surface>(cfg: &Config, source: DistanceClient, surface: S) -> anyhow::Result<()> {
    let theme = ThemeStore::new(preference_store(cfg), &surface);
    let settings = MonitorSettings {
        poll_interval: cfg.poll_interval(),
        ordering: cfg.ordering(),
    };
    let mut monitor = Monitor::new(source, surface, theme, settings);
    monitor.restore_theme();

    let (ui_tx, ui_rx) = mpsc::channel(8);
    if monitor.accepts_gestures() {
        tokio::spawn(async move {
            if let Err(e) = gesture_listener(ui_tx).await {
                warn!("Theme gestures unavailable: {}", e);
            }
        });
        info!("SIGUSR1 toggles the theme, SIGUSR2 resets it");
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = signal_handler().await {
            error!("Signal handling failed: {}", e);
        }
        let _ = stop_tx.send(true);
    });

    let monitor = monitor.run(ui_rx, stop_rx).await;
    info!("Last reading {:?}", monitor.sampler().cache().last().and_then(|r| r.distance()));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let source = DistanceClient::new(cfg.source_url(), cfg.request_timeout())
        .context("building HTTP client")?;
    info!("Watching {}", source.url());

    let display = cfg.display.clone().unwrap_or_default();
    info!("Display: {:?}", cfg.driver());
    match DisplayDriverFactory::create_from_config(&display).context("opening display")? {
        Some(driver) => run(&cfg, source, PanelSurface::new(driver)).await?,
        None => run(&cfg, source, ConsoleSurface::new()).await?,
    }

    info!("Shutdown complete");
    Ok(())
}
