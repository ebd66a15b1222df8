// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! hazwatch - Disaster Early-Warning Engine
//!
//! A concurrent monitoring core that:
//! - polls an external weather provider for the selected location
//! - samples synthetic flood and seismic sensor streams
//! - derives banded flood/earthquake probabilities from both
//! - raises threshold alerts into a bounded, newest-first log
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      hazwatch Engine                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐ 30 min          ┌─────────────┐ 5 s       │
//! │  │ Weather     │────────┐        │ Sensor      │─────┐     │
//! │  │ loop        │        │        │ loop        │     │     │
//! │  └─────────────┘        ↓        └─────────────┘     ↓     │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │          StateStore (field-scoped RwLocks)           │  │
//! │  │  location · weather · sensors · risk · alert log     │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │        │ snapshots                    │ broadcast          │
//! │        ↓                              ↓                    │
//! │  presentation reads             EventBus updates           │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod sensors;
pub mod weather;

// Re-exports for convenience
pub use config::{Config, Location, LocationCatalog};
pub use core::{Engine, EngineHandle, EventBus, StateStore, Update, UpdateKind};
pub use detection::{evaluate, AlertEntry, AlertLog, RiskAssessment, RiskBand};
pub use error::FetchError;
pub use sensors::{
    FloodReading, SeismicReading, SensorReading, SensorSimulator, StreamStatus,
};
pub use weather::{OpenWeatherMap, SimulatedWeather, WeatherProvider, WeatherReading};

/// hazwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// hazwatch name
pub const NAME: &str = "hazwatch";
