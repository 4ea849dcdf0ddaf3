//! Tracker — Main Entry Point
//!
//! Hexagonal architecture with a single callback-fed processing loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ReplayModem        ReplayGnss          LogReportSink          │
//! │  (ModemPort)        (PositioningPort)   (ReportSink)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            TrackerService (pure logic)                 │    │
//! │  │  Geofence engine · Classifiers · Verbosity gate        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  InboundQueue (bounded MPSC, fed from subsystem threads)       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use tracker::adapters::log_sink::LogReportSink;
use tracker::adapters::replay_gnss::ReplayGnss;
use tracker::adapters::replay_modem::ReplayModem;
use tracker::app::ports::{ModemPort, PositioningPort};
use tracker::app::service::TrackerService;
use tracker::config::TrackerConfig;
use tracker::events::InboundQueue;

/// Environment variable naming an optional JSON configuration file.
const CONFIG_ENV: &str = "TRACKER_CONFIG";

static INBOUND: InboundQueue = InboundQueue::new();

fn init_logging() -> Result<()> {
    #[cfg(feature = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(all(not(feature = "espidf"), not(target_os = "espidf")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

fn load_config() -> Result<TrackerConfig> {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        info!("Config: built-in defaults");
        return Ok(TrackerConfig::default());
    };
    let display = path.to_string_lossy().into_owned();
    let bytes = std::fs::read(&path).with_context(|| format!("reading config file {display}"))?;
    let config = TrackerConfig::from_json(&bytes)
        .with_context(|| format!("parsing config file {display}"))?;
    info!("Config loaded from {}", display);
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Tracker v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config()?;
    let interval = Duration::from_millis(u64::from(config.replay_interval_ms));

    // ── 2. Application core ───────────────────────────────────
    let mut service = TrackerService::new(&config).context("building tracker service")?;
    let mut sink = LogReportSink::new();
    INBOUND.set_verbosity(config.verbosity);

    // ── 3. Radio subsystem ────────────────────────────────────
    let mut modem = ReplayModem::new(ReplayModem::boot_sequence(), interval);
    modem
        .start(&config.modem, &INBOUND)
        .context("modem initialisation failed")?;
    service.start(&mut sink);

    // ── 4. Positioning subsystem ──────────────────────────────
    let (lat, lng) = config
        .fences
        .first()
        .map_or((0.0, 0.0), |f| (f.lat, f.lng));
    let mut gnss = ReplayGnss::new(ReplayGnss::round_trip(lat, lng), interval);
    gnss.start(&config.gnss, &INBOUND)
        .context("GNSS initialisation failed")?;
    info!("System Initialization finished");

    // ── 5. Processing loop ────────────────────────────────────
    futures_lite::future::block_on(service.run(&INBOUND, &mut sink));
    Ok(())
}
