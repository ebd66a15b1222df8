// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Simulated weather provider for demo mode

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::prelude::*;
use rand_distr::Normal;

use super::{WeatherProvider, WeatherReading};
use crate::config::Location;
use crate::error::FetchError;

/// Generates plausible current conditions so the engine can run without a
/// provider credential.
///
/// Temperature follows a latitude-dependent baseline with Gaussian jitter;
/// roughly one refresh in four carries rain.
pub struct SimulatedWeather {
    rng: Mutex<StdRng>,
}

impl SimulatedWeather {
    /// Provider seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic provider for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for SimulatedWeather {
    async fn fetch_current(&self, location: &Location) -> Result<WeatherReading, FetchError> {
        let mut rng = self.rng.lock();

        // Warmer near the equator, a few degrees of noise on top
        let baseline = 32.0 - location.latitude.abs() * 0.25;
        let temperature_c = baseline + rng.sample::<f64, _>(Normal::new(0.0, 2.0).unwrap());
        let humidity_pct: u8 = rng.gen_range(40..=95);

        let raining = rng.gen::<f64>() < 0.25;
        let rainfall_1h_mm = if raining { rng.gen_range(0.5..30.0) } else { 0.0 };
        let condition = if rainfall_1h_mm > 10.0 {
            "Heavy rain"
        } else if raining {
            "Light rain"
        } else if humidity_pct > 80 {
            "Overcast clouds"
        } else {
            "Clear sky"
        };

        Ok(WeatherReading {
            temperature_c,
            humidity_pct,
            condition: condition.to_string(),
            rainfall_1h_mm,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocationCatalog;

    #[tokio::test]
    async fn test_readings_stay_in_plausible_ranges() {
        let provider = SimulatedWeather::seeded(7);
        let catalog = LocationCatalog::builtin();
        let location = catalog.default_location().unwrap();

        for _ in 0..200 {
            let reading = provider.fetch_current(location).await.unwrap();
            assert!((40..=95).contains(&reading.humidity_pct));
            assert!(reading.rainfall_1h_mm >= 0.0 && reading.rainfall_1h_mm < 30.0);
            assert!(reading.temperature_c > -10.0 && reading.temperature_c < 50.0);
            assert!(!reading.condition.is_empty());
        }
    }

    #[tokio::test]
    async fn test_seeded_providers_agree() {
        let catalog = LocationCatalog::builtin();
        let location = catalog.get("Chennai").unwrap();

        let a = SimulatedWeather::seeded(42);
        let b = SimulatedWeather::seeded(42);
        for _ in 0..10 {
            let ra = a.fetch_current(location).await.unwrap();
            let rb = b.fetch_current(location).await.unwrap();
            assert_eq!(ra.temperature_c, rb.temperature_c);
            assert_eq!(ra.rainfall_1h_mm, rb.rainfall_1h_mm);
            assert_eq!(ra.condition, rb.condition);
        }
    }
}
