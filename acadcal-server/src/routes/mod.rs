pub mod calendar;
pub mod health;

use acadcal_core::AcadCalError;
use axum::{
    Router,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .merge(calendar::router())
        .merge(health::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Request failure, rendered as a plain-text response
#[derive(Debug)]
pub enum AppError {
    MissingHost,
    Pipeline(AcadCalError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingHost => StatusCode::BAD_REQUEST,
            AppError::Pipeline(err) if err.is_upstream() => StatusCode::BAD_GATEWAY,
            AppError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            AppError::MissingHost => "Missing Host header".to_string(),
            AppError::Pipeline(err) => {
                error!(error = %err, status = status.as_u16(), "Calendar request failed");
                err.to_string()
            }
        };

        (status, body).into_response()
    }
}

impl From<AcadCalError> for AppError {
    fn from(err: AcadCalError) -> Self {
        AppError::Pipeline(err)
    }
}
