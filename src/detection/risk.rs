// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Disaster probability scoring
//!
//! Heuristic, not hydrology. Static susceptibility dominates and the live
//! signals nudge; the point is stable, explainable numbers for a dashboard.

use serde::{Deserialize, Serialize};

use crate::config::Location;
use crate::sensors::SensorReading;
use crate::weather::WeatherReading;

/// Weight of the location's static flood susceptibility.
const FLOOD_STATIC_WEIGHT: f64 = 0.6;
/// Weight of last-hour rainfall, normalized against a 50 mm/h downpour.
const FLOOD_RAIN_WEIGHT: f64 = 0.4;
const FLOOD_RAIN_SCALE_MM: f64 = 50.0;
/// Weight of the water gauge, normalized against a 300 cm column.
const FLOOD_LEVEL_WEIGHT: f64 = 0.3;
const FLOOD_LEVEL_SCALE_CM: f64 = 300.0;

/// Weight of the location's static quake susceptibility.
const QUAKE_STATIC_WEIGHT: f64 = 0.7;
/// Weight of live magnitude, normalized against the top of the 0-6 range.
const QUAKE_MAGNITUDE_WEIGHT: f64 = 0.5;
const QUAKE_MAGNITUDE_SCALE: f64 = 6.0;

/// Severity bucket for a probability percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// Within normal bounds.
    Green,
    /// Elevated, worth watching.
    Orange,
    /// Act now.
    Red,
}

impl RiskBand {
    /// Flood banding: Green up to 30%, Orange up to 50%, Red beyond.
    pub fn for_flood(pct: f64) -> Self {
        if pct > 50.0 {
            RiskBand::Red
        } else if pct > 30.0 {
            RiskBand::Orange
        } else {
            RiskBand::Green
        }
    }

    /// Quake banding: Green up to 20%, Orange up to 40%, Red beyond.
    pub fn for_quake(pct: f64) -> Self {
        if pct > 40.0 {
            RiskBand::Red
        } else if pct > 20.0 {
            RiskBand::Orange
        } else {
            RiskBand::Green
        }
    }

    /// Lowercase color name for display and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Green => "green",
            RiskBand::Orange => "orange",
            RiskBand::Red => "red",
        }
    }
}

/// Flood and earthquake probabilities with their severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Flood probability in percent, clamped to `[0, 100]`.
    pub flood_pct: f64,
    /// Band the flood probability falls in.
    pub flood_band: RiskBand,
    /// Earthquake probability in percent, clamped to `[0, 100]`.
    pub quake_pct: f64,
    /// Band the quake probability falls in.
    pub quake_band: RiskBand,
}

impl Default for RiskAssessment {
    /// Placeholder before the first evaluation: zero probability, all green.
    fn default() -> Self {
        Self {
            flood_pct: 0.0,
            flood_band: RiskBand::Green,
            quake_pct: 0.0,
            quake_band: RiskBand::Green,
        }
    }
}

/// Combine a location's static factors with the latest live signals.
///
/// Pure and deterministic: same inputs, same assessment. The two live
/// inputs may be stale relative to each other; callers pass whatever is
/// current. Missing weather counts as zero rainfall. Outputs are clamped
/// to `[0, 100]` even for out-of-range inputs.
pub fn evaluate(
    location: &Location,
    weather: Option<&WeatherReading>,
    sensors: &SensorReading,
) -> RiskAssessment {
    let rain_mm = weather.map(|w| w.rainfall_1h_mm).unwrap_or(0.0);

    let flood_pct = ((location.flood_risk * FLOOD_STATIC_WEIGHT
        + rain_mm / FLOOD_RAIN_SCALE_MM * FLOOD_RAIN_WEIGHT
        + sensors.flood.water_level_cm / FLOOD_LEVEL_SCALE_CM * FLOOD_LEVEL_WEIGHT)
        * 100.0)
        .clamp(0.0, 100.0);

    let quake_pct = ((location.quake_risk * QUAKE_STATIC_WEIGHT
        + sensors.seismic.magnitude / QUAKE_MAGNITUDE_SCALE * QUAKE_MAGNITUDE_WEIGHT)
        * 100.0)
        .clamp(0.0, 100.0);

    RiskAssessment {
        flood_pct,
        flood_band: RiskBand::for_flood(flood_pct),
        quake_pct,
        quake_band: RiskBand::for_quake(quake_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{FloodReading, SeismicReading};
    use chrono::Utc;

    fn location(flood_risk: f64, quake_risk: f64) -> Location {
        Location {
            name: "Test".to_string(),
            latitude: 10.0,
            longitude: 76.0,
            flood_risk,
            quake_risk,
        }
    }

    fn sensors(water_level_cm: f64, magnitude: f64) -> SensorReading {
        SensorReading {
            flood: FloodReading::from_level(water_level_cm),
            seismic: SeismicReading::from_magnitude(magnitude),
            sampled_at: Utc::now(),
            sequence: 1,
        }
    }

    fn weather(rainfall_1h_mm: f64) -> WeatherReading {
        WeatherReading {
            temperature_c: 28.0,
            humidity_pct: 80,
            condition: "Light rain".to_string(),
            rainfall_1h_mm,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_static_factor_alone_sets_the_floor() {
        // 0.7 * 0.6 * 100 with no live contribution
        let assessment = evaluate(&location(0.7, 0.2), None, &sensors(0.0, 0.0));
        assert!((assessment.flood_pct - 42.0).abs() < 1e-9);
        assert_eq!(assessment.flood_band, RiskBand::Orange);
    }

    #[test]
    fn test_max_magnitude_with_low_susceptibility_scores_sixty_four() {
        // 0.2 * 0.7 + 6.0 / 6.0 * 0.5, times 100
        let assessment = evaluate(&location(0.7, 0.2), None, &sensors(0.0, 6.0));
        assert!((assessment.quake_pct - 64.0).abs() < 1e-9);
        assert_eq!(assessment.quake_band, RiskBand::Red);
    }

    #[test]
    fn test_missing_weather_counts_as_zero_rainfall() {
        let dry = evaluate(&location(0.5, 0.1), None, &sensors(90.0, 1.0));
        let explicit = evaluate(&location(0.5, 0.1), Some(&weather(0.0)), &sensors(90.0, 1.0));
        assert_eq!(dry.flood_pct, explicit.flood_pct);
        assert_eq!(dry.quake_pct, explicit.quake_pct);
    }

    #[test]
    fn test_probabilities_are_clamped_to_percentage_range() {
        let saturated = evaluate(&location(1.0, 1.0), Some(&weather(500.0)), &sensors(5000.0, 60.0));
        assert_eq!(saturated.flood_pct, 100.0);
        assert_eq!(saturated.quake_pct, 100.0);
        assert_eq!(saturated.flood_band, RiskBand::Red);
        assert_eq!(saturated.quake_band, RiskBand::Red);

        let negative = evaluate(&location(0.0, 0.0), None, &sensors(-5000.0, -60.0));
        assert_eq!(negative.flood_pct, 0.0);
        assert_eq!(negative.quake_pct, 0.0);
        assert_eq!(negative.flood_band, RiskBand::Green);
        assert_eq!(negative.quake_band, RiskBand::Green);
    }

    #[test]
    fn test_more_rain_never_lowers_flood_risk() {
        let loc = location(0.3, 0.1);
        let mut previous = 0.0;
        for step in 0..20 {
            let rain = step as f64 * 5.0;
            let pct = evaluate(&loc, Some(&weather(rain)), &sensors(50.0, 1.0)).flood_pct;
            assert!(pct >= previous, "rain {rain} lowered risk: {pct} < {previous}");
            previous = pct;
        }
    }

    #[test]
    fn test_flood_band_boundaries_are_inclusive_below() {
        assert_eq!(RiskBand::for_flood(30.0), RiskBand::Green);
        assert_eq!(RiskBand::for_flood(30.001), RiskBand::Orange);
        assert_eq!(RiskBand::for_flood(50.0), RiskBand::Orange);
        assert_eq!(RiskBand::for_flood(50.001), RiskBand::Red);
    }

    #[test]
    fn test_quake_band_boundaries_are_inclusive_below() {
        assert_eq!(RiskBand::for_quake(20.0), RiskBand::Green);
        assert_eq!(RiskBand::for_quake(20.001), RiskBand::Orange);
        assert_eq!(RiskBand::for_quake(40.0), RiskBand::Orange);
        assert_eq!(RiskBand::for_quake(40.001), RiskBand::Red);
    }

    #[test]
    fn test_bands_always_match_their_percentages() {
        let mut sim = crate::sensors::SensorSimulator::seeded(9);
        let loc = location(0.8, 0.4);
        for _ in 0..200 {
            let reading = sim.sample(12.0);
            let a = evaluate(&loc, Some(&weather(12.0)), &reading);
            assert_eq!(a.flood_band, RiskBand::for_flood(a.flood_pct));
            assert_eq!(a.quake_band, RiskBand::for_quake(a.quake_pct));
        }
    }
}
