use serde::{Deserialize, Serialize};

/// Body of `POST /admin/login`. The session itself travels in a cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Both fields must be non-blank before a request is sent
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

/// Credentials kept by the "remember me" option
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RememberedCredentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        let mut req = LoginRequest {
            username: "admin".into(),
            password: " ".into(),
        };
        assert!(!req.is_complete());
        req.password = "secret".into();
        assert!(req.is_complete());
    }
}
