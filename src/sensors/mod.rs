//! Synthetic sensor feeds - flood gauge and seismometer streams

mod simulator;

pub use simulator::SensorSimulator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Water level above which the flood stream reports danger, in centimetres.
pub const FLOOD_DANGER_CM: f64 = 200.0;

/// Magnitude above which the seismic stream reports danger.
pub const SEISMIC_DANGER_MAGNITUDE: f64 = 4.5;

/// Condition of a single stream relative to its fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamStatus {
    /// At or below the threshold.
    Normal,
    /// Strictly above the threshold.
    Danger,
}

impl StreamStatus {
    /// True when the stream has crossed its threshold.
    pub fn is_danger(self) -> bool {
        matches!(self, StreamStatus::Danger)
    }
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamStatus::Normal => write!(f, "Normal"),
            StreamStatus::Danger => write!(f, "DANGER"),
        }
    }
}

/// Flood gauge sample.
///
/// Status is derived from the level at construction, so the pair can
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodReading {
    /// Simulated water column in centimetres.
    pub water_level_cm: f64,
    /// Condition relative to [`FLOOD_DANGER_CM`].
    pub status: StreamStatus,
}

impl FloodReading {
    /// Grade a water level. Danger is strictly above the threshold;
    /// exactly 200 cm is still Normal.
    pub fn from_level(water_level_cm: f64) -> Self {
        let status = if water_level_cm > FLOOD_DANGER_CM {
            StreamStatus::Danger
        } else {
            StreamStatus::Normal
        };
        Self { water_level_cm, status }
    }
}

/// Seismometer sample, graded the same way as [`FloodReading`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeismicReading {
    /// Simulated magnitude on the Richter scale.
    pub magnitude: f64,
    /// Condition relative to [`SEISMIC_DANGER_MAGNITUDE`].
    pub status: StreamStatus,
}

impl SeismicReading {
    /// Grade a magnitude. Danger is strictly above the threshold.
    pub fn from_magnitude(magnitude: f64) -> Self {
        let status = if magnitude > SEISMIC_DANGER_MAGNITUDE {
            StreamStatus::Danger
        } else {
            StreamStatus::Normal
        };
        Self { magnitude, status }
    }
}

/// One tick's worth of sensor output, both streams regenerated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Flood gauge stream.
    pub flood: FloodReading,
    /// Seismometer stream.
    pub seismic: SeismicReading,
    /// When this tick was sampled.
    pub sampled_at: DateTime<Utc>,
    /// Tick counter, 1 for the first sample.
    pub sequence: u64,
}

impl Default for SensorReading {
    /// The pre-first-tick placeholder: dry, quiet, Normal on both streams.
    fn default() -> Self {
        Self {
            flood: FloodReading::from_level(0.0),
            seismic: SeismicReading::from_magnitude(0.0),
            sampled_at: Utc::now(),
            sequence: 0,
        }
    }
}
