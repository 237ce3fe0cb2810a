//! metricsink core: metric kinds, storage backends, and the ingestion service.
//!
//! This crate owns the update semantics (gauge replacement, counter
//! accumulation) and the error surface shared with the HTTP server. It carries
//! no transport dependencies so the same service can sit behind any router.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed updates surface as `IngestError` and never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod ingest;
pub mod metric;
pub mod store;

/// Shared result type.
pub use error::{IngestError, MetricsinkError, Result, StoreError};
pub use ingest::IngestService;
pub use metric::MetricKind;
pub use store::{MemStorage, MetricStore, MetricsSnapshot};
