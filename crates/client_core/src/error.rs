//! Failure taxonomy for calls against the activities API.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiCallError {
    /// The request never produced a complete response.
    #[error("request failed before a response arrived: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body (status {status}): {source}")]
    MalformedBody {
        status: StatusCode,
        source: serde_json::Error,
    },
    #[error("server rejected request with status {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl ApiCallError {
    /// Server-provided explanation, only present for application-level rejections.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            Self::Transport(_) | Self::MalformedBody { .. } => None,
        }
    }

    /// True when a response with a failure status was received and decoded.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' must use http or https")]
    UnsupportedScheme(String),
}
