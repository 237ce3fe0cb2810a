//! Axum router wiring.
//!
//! - `POST /update/<kind>/<name>/<value>` : metric ingestion
//! - `GET /healthz`, `GET /readyz`       : liveness / readiness

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/update/*path", post(transport::http::update))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(state)
}
