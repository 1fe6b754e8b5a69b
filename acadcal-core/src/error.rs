//! Error types for the calendar regeneration pipeline.

use thiserror::Error;

/// Errors that can occur while regenerating the calendar.
///
/// Every variant is fatal for the request: a single bad node fails the whole
/// feed rather than producing a partial calendar.
#[derive(Error, Debug)]
pub enum AcadCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Upstream feed returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Invalid value {value:?} for field '{field}' of node '{node}'")]
    FieldCoercion {
        node: String,
        field: &'static str,
        value: String,
    },

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

impl AcadCalError {
    /// Whether the failure originated upstream rather than in our own processing.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamFetch(_) | Self::UpstreamStatus(_))
    }
}

impl From<roxmltree::Error> for AcadCalError {
    fn from(err: roxmltree::Error) -> Self {
        Self::FeedParse(err.to_string())
    }
}

impl From<reqwest::Error> for AcadCalError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::UpstreamStatus(status.as_u16())
        } else if err.is_timeout() {
            Self::UpstreamFetch(format!("request timed out: {err}"))
        } else {
            Self::UpstreamFetch(err.to_string())
        }
    }
}

/// Result type alias for pipeline operations.
pub type AcadCalResult<T> = Result<T, AcadCalError>;
