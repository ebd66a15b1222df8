// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Synthetic reading generator for the flood and seismic streams

use chrono::Utc;
use rand::prelude::*;

use super::{FloodReading, SeismicReading, SensorReading};

/// Produces one self-contained [`SensorReading`] per call.
///
/// The flood level is biased by the latest rainfall figure (five times the
/// millimetre value plus a uniform 0-100 cm component), so wet weather
/// pushes the gauge toward its threshold. Seismic magnitude is uniform
/// noise over the nominal 0-6 range, a stand-in for a real feed.
pub struct SensorSimulator {
    rng: StdRng,
    sequence: u64,
}

impl SensorSimulator {
    /// Simulator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            sequence: 0,
        }
    }

    /// Deterministic simulator for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sequence: 0,
        }
    }

    /// Sample both streams.
    ///
    /// `rainfall_1h_mm` is the most recent rainfall figure, stale or not;
    /// callers pass 0.0 before any weather has been fetched.
    pub fn sample(&mut self, rainfall_1h_mm: f64) -> SensorReading {
        self.sequence += 1;

        let water_level_cm = rainfall_1h_mm * 5.0 + self.rng.gen_range(0..=100) as f64;
        let magnitude = self.rng.gen_range(0.0..=6.0);

        SensorReading {
            flood: FloodReading::from_level(water_level_cm),
            seismic: SeismicReading::from_magnitude(magnitude),
            sampled_at: Utc::now(),
            sequence: self.sequence,
        }
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_samples_stay_in_range() {
        let mut sim = SensorSimulator::seeded(1);
        for _ in 0..500 {
            let reading = sim.sample(0.0);
            assert!((0.0..=100.0).contains(&reading.flood.water_level_cm));
            assert!((0.0..=6.0).contains(&reading.seismic.magnitude));
        }
    }

    #[test]
    fn test_rainfall_biases_the_gauge() {
        let mut sim = SensorSimulator::seeded(2);
        for _ in 0..500 {
            let reading = sim.sample(30.0);
            assert!(reading.flood.water_level_cm >= 150.0);
            assert!(reading.flood.water_level_cm <= 250.0);
        }
    }

    #[test]
    fn test_heavy_rain_guarantees_danger() {
        // 5 * 41 mm = 205 cm before the random component
        let mut sim = SensorSimulator::seeded(3);
        for _ in 0..100 {
            let reading = sim.sample(41.0);
            assert!(reading.flood.status.is_danger());
        }
    }

    #[test]
    fn test_sequence_increments_per_sample() {
        let mut sim = SensorSimulator::seeded(4);
        assert_eq!(sim.sample(0.0).sequence, 1);
        assert_eq!(sim.sample(0.0).sequence, 2);
        assert_eq!(sim.sample(0.0).sequence, 3);
    }

    #[test]
    fn test_seeded_simulators_agree() {
        let mut a = SensorSimulator::seeded(42);
        let mut b = SensorSimulator::seeded(42);
        for _ in 0..50 {
            let ra = a.sample(5.0);
            let rb = b.sample(5.0);
            assert_eq!(ra.flood.water_level_cm, rb.flood.water_level_cm);
            assert_eq!(ra.seismic.magnitude, rb.seismic.magnitude);
        }
    }

    #[test]
    fn test_statuses_match_values() {
        let mut sim = SensorSimulator::seeded(5);
        for _ in 0..500 {
            let reading = sim.sample(25.0);
            assert_eq!(
                reading.flood.status.is_danger(),
                reading.flood.water_level_cm > super::super::FLOOD_DANGER_CM
            );
            assert_eq!(
                reading.seismic.status.is_danger(),
                reading.seismic.magnitude > super::super::SEISMIC_DANGER_MAGNITUDE
            );
        }
    }
}
