// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Update notifications for presentation subscribers

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::Location;
use crate::detection::{AlertEntry, RiskAssessment};
use crate::sensors::SensorReading;
use crate::weather::WeatherReading;

/// What changed, with the new value attached so subscribers can redraw
/// without going back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateKind {
    /// A weather refresh succeeded.
    Weather(WeatherReading),
    /// A sensor tick produced a new reading.
    Sensors(SensorReading),
    /// The risk assessment was recomputed.
    Risk(RiskAssessment),
    /// An alert was appended to the log.
    AlertRaised(AlertEntry),
    /// The selected location changed.
    LocationChanged(Location),
}

/// A single state-change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    /// Monotonically increasing publication counter.
    pub seq: u64,
    /// When the change was published.
    pub timestamp: DateTime<Utc>,
    /// The change itself.
    pub kind: UpdateKind,
}

/// Fan-out channel between the engine and its subscribers.
///
/// Lossy on purpose: a subscriber that falls behind misses updates
/// instead of stalling the engine. Publishing with no subscribers is a
/// no-op.
pub struct EventBus {
    tx: broadcast::Sender<Update>,
    counter: AtomicU64,
}

impl EventBus {
    /// Bus retaining up to `capacity` undelivered updates per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            counter: AtomicU64::new(0),
        }
    }

    /// Publish one update.
    pub fn publish(&self, kind: UpdateKind) {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let _ = self.tx.send(Update {
            seq,
            timestamp: Utc::now(),
            kind,
        });
    }

    /// New subscription receiving everything published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RiskAssessment;

    #[tokio::test]
    async fn test_subscribers_see_updates_in_publication_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(UpdateKind::Risk(RiskAssessment::default()));
        bus.publish(UpdateKind::Sensors(crate::sensors::SensorReading::default()));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(first.kind, UpdateKind::Risk(_)));
        assert!(matches!(second.kind, UpdateKind::Sensors(_)));
        assert!(second.seq > first.seq);
    }

    #[tokio::test]
    async fn test_publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new(4);
        bus.publish(UpdateKind::Risk(RiskAssessment::default()));

        // A later subscriber only sees what comes after it joined.
        let mut rx = bus.subscribe();
        bus.publish(UpdateKind::Sensors(crate::sensors::SensorReading::default()));
        let update = rx.recv().await.unwrap();
        assert!(matches!(update.kind, UpdateKind::Sensors(_)));
    }
}
