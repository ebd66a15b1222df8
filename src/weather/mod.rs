//! Weather ingestion - provider contract and reading type

mod openweather;
mod simulated;

pub use openweather::OpenWeatherMap;
pub use simulated::SimulatedWeather;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Location;
use crate::error::FetchError;

/// Current conditions at the selected location.
///
/// One reading is current at a time; each successful fetch replaces it
/// wholesale. A failed fetch leaves the previous reading in place, so
/// `fetched_at` doubles as the staleness indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity_pct: u8,
    /// Short textual description, first letter capitalized.
    pub condition: String,
    /// Rainfall over the last hour in millimetres; 0.0 when the provider
    /// reports none.
    pub rainfall_1h_mm: f64,
    /// When this reading was obtained.
    pub fetched_at: DateTime<Utc>,
}

/// An external source of current weather conditions.
///
/// Implementations perform whatever I/O they need; callers treat them as
/// opaque. Failures surface as [`FetchError`] and must leave no partial
/// state behind.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for `location`.
    async fn fetch_current(&self, location: &Location) -> Result<WeatherReading, FetchError>;
}
