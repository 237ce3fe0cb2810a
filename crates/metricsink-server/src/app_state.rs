//! Shared application state for the metricsink server.
//!
//! The store is created here, once, and injected into the ingestion service.
//! Handlers only ever see the service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use metricsink_core::error::Result;
use metricsink_core::{IngestService, MemStorage, MetricStore};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    ingest: IngestService,
    draining: AtomicBool,
}

impl AppState {
    /// Build state around a fresh in-memory store.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(MemStorage::new()))
    }

    /// Build state around a caller-provided backend.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn MetricStore>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                ingest: IngestService::new(store),
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn ingest(&self) -> &IngestService {
        &self.inner.ingest
    }

    /// Mark draining state (shutdown in progress).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
