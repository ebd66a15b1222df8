// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Shared application state behind field-scoped locks

use parking_lot::RwLock;

use crate::config::Location;
use crate::detection::{AlertEntry, AlertLog, RiskAssessment};
use crate::sensors::{SensorReading, StreamStatus};
use crate::weather::WeatherReading;

/// The one shared mutable resource in the system.
///
/// Each logical field sits behind its own lock, so the weather path, the
/// sensor path, and presentation reads only contend when they touch the
/// same field. Every write replaces its field wholesale: a reader always
/// sees a complete value from exactly one writer, never a blend of two.
///
/// Mutation is crate-internal. Everything outside the engine reads
/// clone-snapshots and owes the store nothing afterwards.
pub struct StateStore {
    selected: RwLock<Location>,
    weather: RwLock<Option<WeatherReading>>,
    sensors: RwLock<SensorReading>,
    risk: RwLock<RiskAssessment>,
    alerts: RwLock<AlertLog>,
}

impl StateStore {
    /// Fresh store: the given startup location, no weather yet, quiet
    /// sensors, zero risk, an empty alert log.
    pub fn new(initial: Location, alert_capacity: usize) -> Self {
        Self {
            selected: RwLock::new(initial),
            weather: RwLock::new(None),
            sensors: RwLock::new(SensorReading::default()),
            risk: RwLock::new(RiskAssessment::default()),
            alerts: RwLock::new(AlertLog::with_capacity(alert_capacity)),
        }
    }

    /// Currently selected location.
    pub fn selected_location(&self) -> Location {
        self.selected.read().clone()
    }

    /// Latest successfully fetched weather; `None` before the first success.
    pub fn weather(&self) -> Option<WeatherReading> {
        self.weather.read().clone()
    }

    /// Latest sensor tick output.
    pub fn sensors(&self) -> SensorReading {
        self.sensors.read().clone()
    }

    /// Latest risk assessment.
    pub fn risk(&self) -> RiskAssessment {
        *self.risk.read()
    }

    /// Retained alerts, newest first.
    pub fn alerts(&self) -> Vec<AlertEntry> {
        self.alerts.read().snapshot()
    }

    /// The pair the hazard-map collaborator needs: where we are and
    /// whether the flood stream is in danger.
    pub fn flood_overlay(&self) -> (Location, StreamStatus) {
        (self.selected_location(), self.sensors.read().flood.status)
    }

    pub(crate) fn set_selected(&self, location: Location) {
        *self.selected.write() = location;
    }

    pub(crate) fn set_weather(&self, reading: WeatherReading) {
        *self.weather.write() = Some(reading);
    }

    pub(crate) fn set_sensors(&self, reading: SensorReading) {
        *self.sensors.write() = reading;
    }

    pub(crate) fn set_risk(&self, assessment: RiskAssessment) {
        *self.risk.write() = assessment;
    }

    pub(crate) fn append_alert(&self, message: impl Into<String>) -> AlertEntry {
        self.alerts.write().append(message)
    }
}
