use contracts::shared::api_error::ApiErrorBody;

/// Failure of a backend call. Validation errors never get here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
}

pub type Outcome<T> = Result<T, RemoteError>;

impl RemoteError {
    /// FastAPI `detail` text of a server error body, if it has one
    pub fn detail(&self) -> Option<String> {
        match self {
            RemoteError::Server { body, .. } => ApiErrorBody::parse(body)
                .map(|b| b.message())
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Text shown for a server error: the status, then the `detail` or the raw body
    pub fn server_text(&self) -> Option<String> {
        let RemoteError::Server { status, body } = self else {
            return None;
        };
        let shown = self.detail().unwrap_or_else(|| body.trim().to_string());
        if shown.is_empty() {
            Some(format!("Server error: {}", status))
        } else {
            Some(format!("Server error: {}\n{}", status, shown))
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Unauthorized => Some(401),
            RemoteError::Server { status, .. } => Some(*status),
            RemoteError::Network(_) => None,
        }
    }
}

/// Map an HTTP status and body to an outcome
pub fn classify(status: u16, body: String) -> Outcome<String> {
    match status {
        200..=299 => Ok(body),
        401 => Err(RemoteError::Unauthorized),
        _ => Err(RemoteError::Server { status, body }),
    }
}

/// Decode a successful JSON body. An undecodable body counts as a server error.
pub fn decode<T: serde::de::DeserializeOwned>(status: u16, body: &str) -> Outcome<T> {
    serde_json::from_str(body).map_err(|e| RemoteError::Server {
        status,
        body: format!("malformed response: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(201, "{}".into()), Ok("{}".to_string()));
        assert_eq!(classify(401, "nope".into()), Err(RemoteError::Unauthorized));
        assert_eq!(
            classify(422, "bad".into()),
            Err(RemoteError::Server {
                status: 422,
                body: "bad".into()
            })
        );
    }

    #[test]
    fn test_detail() {
        let err = RemoteError::Server {
            status: 400,
            body: r#"{"detail":[{"msg":"a"},{"msg":"b"}]}"#.into(),
        };
        assert_eq!(err.detail().as_deref(), Some("a, b"));
        let err = RemoteError::Server {
            status: 500,
            body: "Internal Server Error".into(),
        };
        assert_eq!(err.detail(), None);
        assert_eq!(RemoteError::Network("x".into()).detail(), None);
    }

    #[test]
    fn test_server_text_keeps_body() {
        let err = RemoteError::Server {
            status: 500,
            body: "db down\n".into(),
        };
        assert_eq!(err.server_text().as_deref(), Some("Server error: 500\ndb down"));
        let err = RemoteError::Server {
            status: 422,
            body: r#"{"detail":"bad price"}"#.into(),
        };
        assert_eq!(err.server_text().as_deref(), Some("Server error: 422\nbad price"));
        let err = RemoteError::Server {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.server_text().as_deref(), Some("Server error: 502"));
        assert_eq!(RemoteError::Unauthorized.server_text(), None);
    }

    #[test]
    fn test_decode_malformed() {
        let res: Outcome<Vec<String>> = decode(200, "[1,");
        match res {
            Err(RemoteError::Server { status, body }) => {
                assert_eq!(status, 200);
                assert!(body.starts_with("malformed response"));
            }
            other => panic!("unexpected {:?}", other),
        }
        let ok: Outcome<Vec<String>> = decode(200, r#"["a"]"#);
        assert_eq!(ok, Ok(vec!["a".to_string()]));
    }
}
