//! `/update/<kind>/<name>/<value>` handler.
//!
//! Decodes the path into a `(kind, name, value)` triple and hands it to the
//! ingestion service. The verb is enforced by the router (non-POST gets 405).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use metricsink_core::error::ClientCode;
use metricsink_core::IngestError;

use crate::app_state::AppState;

/// Rejection rendered as `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub enum ApiError {
    /// Path did not have exactly three segments.
    MalformedPath(String),
    Ingest(IngestError),
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        ApiError::Ingest(e)
    }
}

impl ApiError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            ApiError::MalformedPath(_) => ClientCode::BadRequest,
            ApiError::Ingest(e) => e.client_code(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.client_code() {
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::MalformedPath(p) => {
                format!("expected /update/<kind>/<name>/<value>, got /update/{p}")
            }
            ApiError::Ingest(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.client_code().as_str(),
            "message": self.message(),
        }));
        (self.status(), body).into_response()
    }
}

/// Split `kind/name/value`. Empty segments are kept so an empty name reaches
/// the service and is classified there.
pub fn split_update_path(path: &str) -> Option<(&str, &str, &str)> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut parts = path.split('/');
    let kind = parts.next()?;
    let name = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((kind, name, value))
}

pub async fn update(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some((kind, name, value)) = split_update_path(&path) else {
        tracing::debug!(%path, "malformed update path");
        return Err(ApiError::MalformedPath(path.clone()));
    };

    match state.ingest().apply(kind, name, value).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::debug!(kind, metric = name, error = %e, "update rejected");
            Err(e.into())
        }
    }
}
