//! metricsink server library entry.
//!
//! Wires config, application state, and the HTTP transport around the core
//! ingestion service. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod transport;
