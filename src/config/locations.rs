// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Monitored-location catalog

use serde::{Deserialize, Serialize};

/// A monitored location with its static hazard profile.
///
/// The susceptibility factors are fixed properties of the place itself
/// (terrain, drainage, tectonic setting) and never change at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, also the key used when switching locations.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Static flood susceptibility in `[0, 1]`.
    pub flood_risk: f64,
    /// Static earthquake susceptibility in `[0, 1]`.
    pub quake_risk: f64,
}

/// Ordered set of monitored locations.
///
/// The first entry is the startup default. The set is configuration data;
/// nothing in the engine assumes a particular count.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    entries: Vec<Location>,
}

impl LocationCatalog {
    /// Builds a catalog from configured entries, preserving their order.
    pub fn new(entries: Vec<Location>) -> Self {
        Self { entries }
    }

    /// The built-in set of monitored cities.
    pub fn builtin() -> Self {
        Self::new(default_locations())
    }

    /// Looks up a location by exact name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.entries.iter().find(|loc| loc.name == name)
    }

    /// The startup default, i.e. the first configured entry.
    pub fn default_location(&self) -> Option<&Location> {
        self.entries.first()
    }

    /// All entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.entries.iter()
    }

    /// Number of configured locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no locations are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Default monitored cities with their coordinates and risk factors.
pub(crate) fn default_locations() -> Vec<Location> {
    [
        ("Kochi", 9.9312, 76.2673, 0.7, 0.2),
        ("Trivandrum", 8.5241, 76.9366, 0.6, 0.1),
        ("Chennai", 13.0827, 80.2707, 0.5, 0.3),
        ("Mumbai", 19.0760, 72.8777, 0.8, 0.4),
        ("Bengaluru", 12.9716, 77.5946, 0.3, 0.1),
    ]
    .into_iter()
    .map(|(name, latitude, longitude, flood_risk, quake_risk)| Location {
        name: name.to_string(),
        latitude,
        longitude,
        flood_risk,
        quake_risk,
    })
    .collect()
}
