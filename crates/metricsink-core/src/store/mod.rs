//! Metric storage backends.
//!
//! `MetricStore` is the seam between the ingestion service and wherever the
//! values live. `MemStorage` is the in-process reference backend.

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemStorage;

/// Storage capability consumed by `IngestService`.
///
/// Implementations must be safe under concurrent callers: every update to a
/// single name is applied in some total order and none is lost.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Replace the current value of gauge `name`.
    async fn update_gauge(&self, name: &str, value: f64) -> Result<(), StoreError>;

    /// Add `delta` to counter `name`, starting from 0 for a new name.
    async fn update_counter(&self, name: &str, delta: i64) -> Result<(), StoreError>;
}

/// Point-in-time copy of every stored metric, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub gauges: BTreeMap<String, f64>,
    pub counters: BTreeMap<String, i64>,
}
