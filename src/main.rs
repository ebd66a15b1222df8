// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! hazwatch - Disaster Early-Warning Engine
//!
//! Headless runner: starts the engine, subscribes to its update stream,
//! and narrates state changes to the log until interrupted.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use hazwatch::{
    Config, Engine, OpenWeatherMap, SensorSimulator, SimulatedWeather, Update, UpdateKind,
    WeatherProvider, VERSION,
};

/// hazwatch - Disaster Early-Warning Engine
#[derive(Parser, Debug)]
#[command(name = "hazwatch")]
#[command(author = "hazwatch project")]
#[command(version = VERSION)]
#[command(about = "Weather-coupled flood and earthquake monitoring with threshold alerts")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key (overrides the configured one)
    #[arg(long)]
    api_key: Option<String>,

    /// Demo mode with a simulated weather provider (no credential needed)
    #[arg(long)]
    demo: bool,

    /// Location to monitor at startup (defaults to the first configured)
    #[arg(short, long)]
    location: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🌍 hazwatch v{} - Disaster Early-Warning Engine", VERSION);

    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args, then the environment
    if args.demo {
        config.demo_mode = true;
    }
    if let Some(api_key) = args.api_key.or_else(|| std::env::var("HAZWATCH_API_KEY").ok()) {
        config.weather.api_key = api_key;
    }
    config.validate()?;

    info!("Configuration loaded from {:?}", config_path);
    info!("Demo mode: {}", config.demo_mode);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config, args.location))
}

async fn run(config: Config, start_location: Option<String>) -> Result<()> {
    let provider: Arc<dyn WeatherProvider> = if config.demo_mode {
        Arc::new(SimulatedWeather::new())
    } else {
        if config.weather.api_key.is_empty() {
            anyhow::bail!(
                "weather.api_key is not set; pass --api-key, set HAZWATCH_API_KEY, or run with --demo"
            );
        }
        Arc::new(OpenWeatherMap::new(&config.weather)?)
    };

    let engine = Engine::new(&config, provider, SensorSimulator::new())?;
    let handle = engine.handle();

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    // Presentation stand-in: narrate every update the engine publishes.
    let mut updates = handle.subscribe();
    let narrator = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(update) => narrate(&update),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Narrator fell behind, skipped {} updates", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    if let Some(name) = start_location {
        handle.change_location(&name).await?;
    }

    info!("🚀 hazwatch engine running");
    info!("   Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, cleaning up...");

    let _ = shutdown_tx.send(());
    engine_task.await??;
    narrator.abort();

    info!("hazwatch shutdown complete");
    Ok(())
}

fn narrate(update: &Update) {
    match &update.kind {
        UpdateKind::Weather(w) => info!(
            "weather: {:.1}°C, {}% humidity, {}, rain {:.1} mm/h",
            w.temperature_c, w.humidity_pct, w.condition, w.rainfall_1h_mm
        ),
        UpdateKind::Sensors(s) => info!(
            "sensors: water {:.0} cm ({}), magnitude {:.1} ({})",
            s.flood.water_level_cm, s.flood.status, s.seismic.magnitude, s.seismic.status
        ),
        UpdateKind::Risk(r) => info!(
            "risk: flood {:.1}% [{}], quake {:.1}% [{}]",
            r.flood_pct,
            r.flood_band.as_str(),
            r.quake_pct,
            r.quake_band.as_str()
        ),
        UpdateKind::AlertRaised(alert) => warn!("ALERT {}", alert),
        UpdateKind::LocationChanged(l) => info!(
            "location: {} ({:.4}, {:.4})",
            l.name, l.latitude, l.longitude
        ),
    }
}
