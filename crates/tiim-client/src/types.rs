//! Wire shapes that only the client needs to know about.

use serde::Deserialize;

/// Error body sent with non-2xx responses: `{"detail": ...}`.
///
/// `detail` is usually a string; validation failures send a list of
/// objects instead, which is kept as raw JSON and not shown to users.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}
