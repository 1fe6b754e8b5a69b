//! Liveness endpoint

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// GET /healthz - never touches the upstream feed
async fn healthz() -> &'static str {
    "ok"
}
