use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;

use super::{MetricStore, MetricsSnapshot};

/// In-memory store backed by sharded maps.
///
/// Updates to different names land on different shards most of the time, so
/// they rarely contend. Counters are atomics: the shard lock is only held to
/// find or create the entry, the addition itself is a `fetch_add`.
#[derive(Default)]
pub struct MemStorage {
    gauges: DashMap<String, f64>,
    counters: DashMap<String, AtomicI64>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            gauges: DashMap::new(),
            counters: DashMap::new(),
        }
    }

    /// Current gauge value, `None` if never updated.
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).map(|r| *r.value())
    }

    /// Current counter total, `None` if never updated.
    pub fn counter(&self, name: &str) -> Option<i64> {
        self.counters
            .get(name)
            .map(|r| r.value().load(Ordering::Acquire))
    }

    /// Number of stored entries across both kinds.
    pub fn len(&self) -> usize {
        self.gauges.len() + self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out both maps. Not a consistent cut across names while writers run.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            gauges: self
                .gauges
                .iter()
                .map(|r| (r.key().clone(), *r.value()))
                .collect(),
            counters: self
                .counters
                .iter()
                .map(|r| (r.key().clone(), r.value().load(Ordering::Acquire)))
                .collect(),
        }
    }

    fn set_gauge(&self, name: &str, value: f64) {
        // Avoid allocating the key when the gauge already exists.
        if let Some(mut slot) = self.gauges.get_mut(name) {
            *slot = value;
            return;
        }
        self.gauges.insert(name.to_string(), value);
    }

    fn add_counter(&self, name: &str, delta: i64) {
        if let Some(counter) = self.counters.get(name) {
            // Wraps on overflow.
            counter.fetch_add(delta, Ordering::AcqRel);
            return;
        }
        let counter = self
            .counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicI64::new(0));
        counter.fetch_add(delta, Ordering::AcqRel);
    }
}

#[async_trait]
impl MetricStore for MemStorage {
    async fn update_gauge(&self, name: &str, value: f64) -> Result<(), StoreError> {
        self.set_gauge(name, value);
        Ok(())
    }

    async fn update_counter(&self, name: &str, delta: i64) -> Result<(), StoreError> {
        self.add_counter(name, delta);
        Ok(())
    }
}
