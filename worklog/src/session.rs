use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The identity a page acts as. The backend keys employee lookups on the
/// email address and authorizes requests with an optional bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub auth_token: Option<String>,
}

#[derive(Error, Debug)]
pub enum IntoSessionError {
    #[error("Missing employee email")]
    MissingEmail,
}

impl Session {
    pub fn new(email: impl Into<String>, auth_token: Option<String>) -> Result<Self, IntoSessionError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(IntoSessionError::MissingEmail);
        }
        Ok(Self {
            email,
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Value for the `Authorization` header, when a token is configured.
    pub fn as_bearer_header(&self) -> Option<String> {
        self.auth_token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_email_is_rejected() {
        assert!(Session::new("  ", None).is_err());
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let session = Session::new("tina.46@example.com", Some("".to_string())).unwrap();
        assert!(session.as_bearer_header().is_none());
    }

    #[test]
    fn test_bearer_header() {
        let session = Session::new("tina.46@example.com", Some("abc123".to_string())).unwrap();
        assert_eq!(session.as_bearer_header().as_deref(), Some("Bearer abc123"));
    }
}
