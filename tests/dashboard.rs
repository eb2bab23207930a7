/*
 *  tests/dashboard.rs
 *
 *  End-to-end checks of the dashboard through the public API
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 */

use std::time::Duration;

use parkmon::classifier::ColorToken;
use parkmon::config::Ordering;
use parkmon::httpsource::{DistanceClient, SourceError};
use parkmon::prefs::{MemoryStore, PreferenceStore};
use parkmon::renderer::Renderer;
use parkmon::sampler::{reading_from, Sampler};
use parkmon::surface::{ConsoleSurface, Flag, TargetId};
use parkmon::theme::{ThemePreference, ThemeStore};
use parkmon::{Monitor, MonitorSettings, Reading, State};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};

fn dashboard() -> (Sampler, ConsoleSurface) {
    let surface = ConsoleSurface::new().quiet();
    (Sampler::new(Renderer::new(&surface)), surface)
}

fn lit(surface: &ConsoleSurface) -> Vec<TargetId> {
    [TargetId::LampStop, TargetId::LampSlow, TargetId::LampGo]
        .into_iter()
        .filter(|t| surface.state().flag(*t, Flag::Active))
        .collect()
}

#[test]
fn test_scenarios_a_to_d() {
    let cases = [
        (10.0, State::Stop, 83, TargetId::LampStop, "STOP - Too close!", ColorToken::Danger),
        (20.0, State::Slow, 67, TargetId::LampSlow, "SLOW - Careful approach", ColorToken::Warning),
        (30.0, State::Go, 50, TargetId::LampGo, "GO - Safe distance", ColorToken::Success),
        (50.0, State::Clear, 17, TargetId::LampGo, "CLEAR - Optimal spacing", ColorToken::TextPrimary),
    ];

    let (mut sampler, mut surface) = dashboard();
    for (cm, state, fill, lamp, status, color) in cases {
        let class = sampler.observe(Reading::from_cm(cm), &mut surface).unwrap();
        assert_eq!(class.state, state, "{} cm", cm);
        assert_eq!(class.fill_percent, fill, "{} cm", cm);

        let view = surface.state();
        assert_eq!(view.text(TargetId::Status), Some(status));
        assert_eq!(view.color(TargetId::Readout), Some(color));
        assert_eq!(view.width(TargetId::MeterFill), Some(fill));
        assert_eq!(lit(&surface), vec![lamp]);
    }
    assert_eq!(surface.frames(), 4);
}

#[test]
fn test_scenario_e_transport_failure() {
    let (mut sampler, mut surface) = dashboard();
    sampler.observe(Reading::from_cm(20.0), &mut surface);

    let reading = reading_from(Err(SourceError::MissingDistance));
    let class = sampler.observe(reading, &mut surface).unwrap();

    assert_eq!(class.state, State::NoSignal);
    assert_eq!(surface.state().text(TargetId::Readout), Some("-- cm"));
    assert_eq!(surface.state().text(TargetId::Status), Some("NO SIGNAL"));
    assert!(lit(&surface).is_empty());

    // a repeat failure draws nothing new
    let frames = surface.frames();
    assert!(sampler.observe(reading_from(Err(SourceError::MissingDistance)), &mut surface).is_none());
    assert_eq!(surface.frames(), frames);
}

#[test]
fn test_scenario_f_fresh_theme() {
    let mut surface = ConsoleSurface::new().quiet();
    let mut theme = ThemeStore::new(MemoryStore::new(), &surface);

    assert_eq!(theme.restore(&mut surface), ThemePreference::Light);
    assert!(!surface.state().flag(TargetId::Root, Flag::Dark));
    assert!(!surface.state().flag(TargetId::SunIcon, Flag::Hidden));
    assert!(surface.state().flag(TargetId::MoonIcon, Flag::Hidden));
}

#[test]
fn test_theme_survives_restart() {
    let mut surface = ConsoleSurface::new().quiet();
    let mut theme = ThemeStore::new(MemoryStore::new(), &surface);
    theme.restore(&mut surface);
    theme.toggle(&mut surface);

    let saved = theme.store().load();
    assert_eq!(saved.as_deref(), Some("dark"));

    let mut fresh = ConsoleSurface::new().quiet();
    let mut reloaded = ThemeStore::new(MemoryStore::with_value("dark"), &fresh);
    assert_eq!(reloaded.restore(&mut fresh), ThemePreference::Dark);
    assert!(fresh.state().flag(TargetId::Root, Flag::Dark));
    assert!(fresh.state().flag(TargetId::SunIcon, Flag::Hidden));
}

/// One canned JSON body per connection.
async fn serve(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else { break };
            let mut buf = [0u8; 1024];
            let _ = sock.read(&mut buf).await;
            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = sock.write_all(reply.as_bytes()).await;
        }
    });
    format!("http://{}/data", addr)
}

#[tokio::test]
async fn test_monitor_against_http_endpoint() {
    let url = serve(r#"{"distance": 20}"#).await;
    let client = DistanceClient::new(&url, Duration::from_millis(500)).unwrap();

    let surface = ConsoleSurface::new().quiet();
    let theme = ThemeStore::new(MemoryStore::new(), &surface);
    let settings = MonitorSettings {
        poll_interval: Duration::from_millis(40),
        ordering: Ordering::Arrival,
    };
    let mut monitor = Monitor::new(client, surface, theme, settings);
    monitor.restore_theme();

    let (_ui_tx, ui_rx) = mpsc::channel(1);
    let (stop_tx, stop_rx) = watch::channel(false);
    let stopper = async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        stop_tx.send(true).unwrap();
    };
    let (monitor, ()) = tokio::join!(monitor.run(ui_rx, stop_rx), stopper);

    assert!(monitor.issued() >= 2);
    // same value every tick, drawn once
    assert_eq!(monitor.sampler().renders(), 1);
    let view = monitor.surface().state();
    assert_eq!(view.text(TargetId::Readout), Some("20.0 cm"));
    assert_eq!(view.text(TargetId::Status), Some("SLOW - Careful approach"));
}
