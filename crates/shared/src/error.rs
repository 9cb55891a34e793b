use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body the backend returns alongside a non-success status.
///
/// `detail` is usually a string, but validation failures carry structured
/// data; only the string form is treated as a user-facing explanation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Error)]
#[error("invalid activity catalog: {message}")]
pub struct CatalogException {
    pub message: String,
}

impl CatalogException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
