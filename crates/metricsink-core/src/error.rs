//! Shared error types across metricsink crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Metric name missing from the update path.
    NotFound,
    /// Invalid input / malformed update.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsinkError>;

/// Startup / configuration errors.
#[derive(Debug, Error)]
pub enum MetricsinkError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsinkError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsinkError::Config(_) => ClientCode::BadRequest,
            MetricsinkError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetricsinkError::Internal(_) => ClientCode::Internal,
        }
    }
}

/// Failure reported by a storage backend.
///
/// The in-memory store never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Classified outcome of a rejected update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("metric name must not be empty")]
    EmptyName,
    #[error("unsupported metric kind: {0} (expected gauge or counter)")]
    UnsupportedKind(String),
    #[error("invalid {kind} value: {value:?}")]
    InvalidValue { kind: &'static str, value: String },
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl IngestError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            IngestError::EmptyName => ClientCode::NotFound,
            IngestError::UnsupportedKind(_) | IngestError::InvalidValue { .. } => {
                ClientCode::BadRequest
            }
            IngestError::StorageFailure(_) => ClientCode::Internal,
        }
    }
}
