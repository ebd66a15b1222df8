// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Configuration module

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub mod locations;

pub use locations::{Location, LocationCatalog};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Run against the simulated weather provider (no credential needed)
    pub demo_mode: bool,

    /// Weather polling configuration
    pub weather: WeatherConfig,

    /// Sensor sampling configuration
    pub sensors: SensorConfig,

    /// Alert log configuration
    pub alerts: AlertConfig,

    /// Monitored locations in display order; the first is the startup default
    pub locations: Vec<Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            weather: WeatherConfig::default(),
            sensors: SensorConfig::default(),
            alerts: AlertConfig::default(),
            locations: locations::default_locations(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("hazwatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            bail!("at least one monitored location is required");
        }
        for loc in &self.locations {
            if !(0.0..=1.0).contains(&loc.flood_risk) {
                bail!("location {}: flood_risk {} outside [0, 1]", loc.name, loc.flood_risk);
            }
            if !(0.0..=1.0).contains(&loc.quake_risk) {
                bail!("location {}: quake_risk {} outside [0, 1]", loc.name, loc.quake_risk);
            }
        }
        if self.weather.poll_interval_secs == 0 {
            bail!("weather.poll_interval_secs must be positive");
        }
        if self.weather.request_timeout_secs == 0 {
            bail!("weather.request_timeout_secs must be positive");
        }
        if self.sensors.tick_interval_secs == 0 {
            bail!("sensors.tick_interval_secs must be positive");
        }
        if self.alerts.capacity == 0 {
            bail!("alerts.capacity must be positive");
        }
        Ok(())
    }

    /// The configured locations as a lookup catalog.
    pub fn catalog(&self) -> LocationCatalog {
        LocationCatalog::new(self.locations.clone())
    }
}

/// Weather polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; may stay empty in demo mode
    pub api_key: String,

    /// Provider base URL
    pub base_url: String,

    /// Seconds between scheduled refreshes
    pub poll_interval_secs: u64,

    /// Upper bound on a single fetch in seconds
    pub request_timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            poll_interval_secs: 1800,
            request_timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    /// Interval between scheduled refreshes.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Bound on a single fetch.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Sensor sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Seconds between sensor ticks
    pub tick_interval_secs: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { tick_interval_secs: 5 }
    }
}

impl SensorConfig {
    /// Interval between sensor ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

/// Alert log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Maximum retained alert entries
    pub capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { capacity: 11 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weather.poll_interval(), Duration::from_secs(1800));
        assert_eq!(config.sensors.tick_interval(), Duration::from_secs(5));
        assert_eq!(config.alerts.capacity, 11);
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_toml_round_trip_preserves_locations() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.locations, config.locations);
        assert_eq!(parsed.weather.base_url, config.weather.base_url);
    }

    #[test]
    fn test_empty_location_list_is_rejected() {
        let mut config = Config::default();
        config.locations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_risk_factor_is_rejected() {
        let mut config = Config::default();
        config.locations[0].flood_risk = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        let mut config = Config::default();
        config.weather.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sensors.tick_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.alerts.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = std::env::temp_dir().join(format!("hazwatch-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.locations.len(), 5);

        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded.locations, created.locations);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
