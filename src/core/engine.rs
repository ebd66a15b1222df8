//! Scheduling engine - weather and sensor cadences over the shared store
//!
//! Two independent loops write into the store: a slow external weather
//! poll and a fast synthetic sensor feed. Location switches arrive over a
//! command channel and are handled on the weather task, so they serialize
//! with refreshes but never delay a sensor tick.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{Config, Location, LocationCatalog};
use crate::detection::{evaluate, AlertEntry, RiskAssessment};
use crate::error::FetchError;
use crate::sensors::{
    SensorReading, SensorSimulator, StreamStatus, FLOOD_DANGER_CM, SEISMIC_DANGER_MAGNITUDE,
};
use crate::weather::{WeatherProvider, WeatherReading};

use super::event_bus::{EventBus, Update, UpdateKind};
use super::state::StateStore;

const EVENT_CAPACITY: usize = 256;
const COMMAND_CAPACITY: usize = 16;

/// Requests accepted from the presentation side.
#[derive(Debug)]
enum Command {
    ChangeLocation(String),
}

/// Read, subscribe, and request surface handed to the presentation layer.
///
/// Cheap to clone; everything behind it is shared. Holding a handle never
/// grants mutation, only snapshots of the store and a command queue.
#[derive(Clone)]
pub struct EngineHandle {
    store: Arc<StateStore>,
    events: Arc<EventBus>,
    commands: mpsc::Sender<Command>,
    catalog: Arc<LocationCatalog>,
}

impl EngineHandle {
    /// Currently selected location.
    pub fn location(&self) -> Location {
        self.store.selected_location()
    }

    /// Latest weather reading; `None` before the first successful fetch.
    pub fn weather(&self) -> Option<WeatherReading> {
        self.store.weather()
    }

    /// Latest sensor tick output.
    pub fn sensors(&self) -> SensorReading {
        self.store.sensors()
    }

    /// Latest risk assessment.
    pub fn risk(&self) -> RiskAssessment {
        self.store.risk()
    }

    /// Retained alerts, newest first.
    pub fn alerts(&self) -> Vec<AlertEntry> {
        self.store.alerts()
    }

    /// Location plus flood stream condition, for the hazard map.
    pub fn flood_overlay(&self) -> (Location, StreamStatus) {
        self.store.flood_overlay()
    }

    /// All monitored locations in catalog order, for selection menus.
    pub fn locations(&self) -> Vec<Location> {
        self.catalog.iter().cloned().collect()
    }

    /// Subscribe to the update stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.events.subscribe()
    }

    /// Request a switch to the named location.
    ///
    /// The switch itself runs on the engine task: selection update, an
    /// immediate weather refresh, a risk recompute, one informational
    /// alert, in that order. Requesting the already selected location is
    /// not special-cased; the refresh still happens.
    pub async fn change_location(&self, name: &str) -> Result<()> {
        if self.catalog.get(name).is_none() {
            bail!("unknown location: {name}");
        }
        self.commands
            .send(Command::ChangeLocation(name.to_string()))
            .await
            .map_err(|_| anyhow!("engine is no longer running"))?;
        Ok(())
    }
}

/// Owns the background loops and the shared state they feed.
pub struct Engine {
    poll_interval: Duration,
    tick_interval: Duration,
    fetch_timeout: Duration,
    catalog: Arc<LocationCatalog>,
    store: Arc<StateStore>,
    events: Arc<EventBus>,
    provider: Arc<dyn WeatherProvider>,
    simulator: SensorSimulator,
    commands_tx: mpsc::Sender<Command>,
    commands_rx: mpsc::Receiver<Command>,
}

impl Engine {
    /// Wire the store, update bus, and command channel. The startup
    /// location is the catalog's first entry.
    pub fn new(
        config: &Config,
        provider: Arc<dyn WeatherProvider>,
        simulator: SensorSimulator,
    ) -> Result<Self> {
        let catalog = Arc::new(config.catalog());
        let initial = catalog
            .default_location()
            .cloned()
            .ok_or_else(|| anyhow!("location catalog is empty"))?;
        let store = Arc::new(StateStore::new(initial, config.alerts.capacity));
        let events = Arc::new(EventBus::new(EVENT_CAPACITY));
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);

        Ok(Self {
            poll_interval: config.weather.poll_interval(),
            tick_interval: config.sensors.tick_interval(),
            fetch_timeout: config.weather.request_timeout(),
            catalog,
            store,
            events,
            provider,
            simulator,
            commands_tx,
            commands_rx,
        })
    }

    /// Presentation-side handle, valid for the engine's lifetime.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            store: self.store.clone(),
            events: self.events.clone(),
            commands: self.commands_tx.clone(),
            catalog: self.catalog.clone(),
        }
    }

    /// Run both loops until `shutdown` fires.
    ///
    /// The first weather fetch and the first sensor tick happen
    /// immediately on entry; the configured intervals apply after that.
    /// Shutdown is observed by the orchestrator and relayed to the sensor
    /// task, so a signal sent before this future is first polled still
    /// stops both loops.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let Engine {
            poll_interval,
            tick_interval,
            fetch_timeout,
            catalog,
            store,
            events,
            provider,
            simulator,
            commands_tx,
            mut commands_rx,
        } = self;
        // Held so the command channel stays open for late handles.
        let _commands_tx = commands_tx;

        info!(location = %store.selected_location().name, "engine started");

        // The sensor loop stops over a relay owned by this task. A receiver
        // resubscribed from `shutdown` here would miss a signal sent before
        // this future was first polled.
        let (stop_tx, stop_rx) = broadcast::channel(1);
        let sensor_task = spawn_sensor_loop(
            tick_interval,
            simulator,
            store.clone(),
            events.clone(),
            stop_rx,
        );

        let mut ticks = interval(poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    refresh_weather(provider.as_ref(), fetch_timeout, &store, &events).await;
                }
                Some(command) = commands_rx.recv() => match command {
                    Command::ChangeLocation(name) => {
                        change_location(&catalog, &name, provider.as_ref(), fetch_timeout, &store, &events).await;
                    }
                },
                _ = shutdown.recv() => {
                    info!("engine stopping");
                    break;
                }
            }
        }

        let _ = stop_tx.send(());
        sensor_task.await?;
        Ok(())
    }
}

/// One weather refresh against the currently selected location.
///
/// On success the reading replaces the previous one and the risk is
/// recomputed against it. On failure nothing is written: the previous
/// reading stays current and the next tick tries again.
pub(crate) async fn refresh_weather(
    provider: &dyn WeatherProvider,
    fetch_timeout: Duration,
    store: &StateStore,
    events: &EventBus,
) -> bool {
    let location = store.selected_location();
    let fetched = match timeout(fetch_timeout, provider.fetch_current(&location)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout { limit: fetch_timeout }),
    };

    match fetched {
        Ok(reading) => {
            debug!(
                location = %location.name,
                temp_c = reading.temperature_c,
                rain_mm = reading.rainfall_1h_mm,
                "weather refreshed"
            );
            store.set_weather(reading.clone());
            let assessment = evaluate(&location, Some(&reading), &store.sensors());
            store.set_risk(assessment);
            events.publish(UpdateKind::Weather(reading));
            events.publish(UpdateKind::Risk(assessment));
            true
        }
        Err(err) => {
            warn!(location = %location.name, error = %err, "weather refresh failed, keeping previous reading");
            false
        }
    }
}

/// Apply one sensor tick: store the reading, recompute risk with the
/// latest weather (stale or absent), and fire one alert per stream in
/// danger.
pub(crate) fn apply_sensor_reading(
    store: &StateStore,
    events: &EventBus,
    reading: SensorReading,
) -> RiskAssessment {
    let location = store.selected_location();
    let weather = store.weather();

    store.set_sensors(reading.clone());
    let assessment = evaluate(&location, weather.as_ref(), &reading);
    store.set_risk(assessment);

    if reading.flood.status.is_danger() {
        let entry = store.append_alert(format!(
            "Flood water level {:.0} cm exceeds the {:.0} cm danger threshold",
            reading.flood.water_level_cm, FLOOD_DANGER_CM
        ));
        warn!(alert = %entry, "flood threshold crossed");
        events.publish(UpdateKind::AlertRaised(entry));
    }
    if reading.seismic.status.is_danger() {
        let entry = store.append_alert(format!(
            "Seismic magnitude {:.1} exceeds the {:.1} danger threshold",
            reading.seismic.magnitude, SEISMIC_DANGER_MAGNITUDE
        ));
        warn!(alert = %entry, "seismic threshold crossed");
        events.publish(UpdateKind::AlertRaised(entry));
    }

    events.publish(UpdateKind::Sensors(reading));
    events.publish(UpdateKind::Risk(assessment));
    assessment
}

/// Handle a location switch on the engine task.
///
/// Order matters: selection first, then an immediate refresh (a failure
/// keeps the stale reading), then a recompute so the risk reflects the new
/// static factors either way, then exactly one informational alert.
pub(crate) async fn change_location(
    catalog: &LocationCatalog,
    name: &str,
    provider: &dyn WeatherProvider,
    fetch_timeout: Duration,
    store: &StateStore,
    events: &EventBus,
) {
    let Some(location) = catalog.get(name).cloned() else {
        warn!(name, "ignoring switch to unknown location");
        return;
    };

    info!(from = %store.selected_location().name, to = %location.name, "location changed");
    store.set_selected(location.clone());
    events.publish(UpdateKind::LocationChanged(location.clone()));

    let refreshed = refresh_weather(provider, fetch_timeout, store, events).await;
    if !refreshed {
        // The fetch recomputes on success; cover the failure path so the
        // assessment never keeps pointing at the previous location.
        let assessment = evaluate(&location, store.weather().as_ref(), &store.sensors());
        store.set_risk(assessment);
        events.publish(UpdateKind::Risk(assessment));
    }

    let entry = store.append_alert(format!("Location changed to {}", location.name));
    events.publish(UpdateKind::AlertRaised(entry));
}

fn spawn_sensor_loop(
    tick_interval: Duration,
    mut simulator: SensorSimulator,
    store: Arc<StateStore>,
    events: Arc<EventBus>,
    mut stop: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    let rainfall = store.weather().map(|w| w.rainfall_1h_mm).unwrap_or(0.0);
                    let reading = simulator.sample(rainfall);
                    apply_sensor_reading(&store, &events, reading);
                }
                _ = stop.recv() => {
                    debug!("sensor loop stopping");
                    break;
                }
            }
        }
    })
}
