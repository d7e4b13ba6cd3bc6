use serde::{Deserialize, Serialize};

/// FastAPI error body: `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ErrorItem>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    /// Parse a raw response body. Returns `None` when it is not a FastAPI error.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Flatten the detail into one line of text
    pub fn message(&self) -> String {
        match &self.detail {
            ErrorDetail::Message(m) => m.clone(),
            ErrorDetail::Items(items) => items
                .iter()
                .map(|i| i.msg.as_str())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
