//! Ingestion service: validate one decoded update and apply it.

use std::sync::Arc;

use crate::error::IngestError;
use crate::metric::MetricKind;
use crate::store::MetricStore;

/// Validates `(kind, name, value)` triples and forwards them to a store.
///
/// Checks run in a fixed order and the first failure wins: empty name, then
/// unknown kind, then unparsable value. Nothing reaches the store unless all
/// three pass, so a rejected update never changes state.
#[derive(Clone)]
pub struct IngestService {
    store: Arc<dyn MetricStore>,
}

impl IngestService {
    pub fn new(store: Arc<dyn MetricStore>) -> Self {
        Self { store }
    }

    pub async fn apply(&self, kind: &str, name: &str, raw_value: &str) -> Result<(), IngestError> {
        if name.is_empty() {
            return Err(IngestError::EmptyName);
        }
        let kind: MetricKind = kind.parse()?;

        let res = match kind {
            MetricKind::Gauge => {
                let value = MetricKind::parse_gauge(raw_value)?;
                self.store.update_gauge(name, value).await
            }
            MetricKind::Counter => {
                let delta = MetricKind::parse_counter(raw_value)?;
                self.store.update_counter(name, delta).await
            }
        };

        match res {
            Ok(()) => {
                tracing::debug!(%kind, metric = name, value = raw_value, "metric updated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%kind, metric = name, error = %e, "metric store rejected update");
                Err(IngestError::StorageFailure(e))
            }
        }
    }
}
