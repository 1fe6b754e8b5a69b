//! Calendar feed endpoint

use acadcal_core::regenerate;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Uri, header},
    response::IntoResponse,
    routing::get,
};

use crate::routes::AppError;
use crate::state::AppState;

const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar))
        .route("/calendar.ics", get(calendar))
}

/// GET / - regenerate the whole calendar from the upstream feed
async fn calendar(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    let domain = request_hostname(&headers, &uri).ok_or(AppError::MissingHost)?;
    let ics = regenerate(state.fetcher.as_ref(), &state.config, &domain).await?;

    Ok(([(header::CONTENT_TYPE, ICS_CONTENT_TYPE)], ics))
}

/// Hostname from the `Host` header (or the HTTP/2 authority), port stripped.
fn request_hostname(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))?;

    let hostname = host.split(':').next().unwrap_or(host).trim();
    if hostname.is_empty() {
        None
    } else {
        Some(hostname.to_string())
    }
}
