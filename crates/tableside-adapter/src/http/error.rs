/*
[INPUT]:  Error sources (HTTP, API status codes, serialization, session)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the order API adapter
#[derive(Error, Debug)]
pub enum TablesideError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Session token rejected or expired
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// No session token is available for an authenticated call
    #[error("Not signed in")]
    NotAuthenticated,

    /// Requested resource does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl TablesideError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TablesideError::Http(_)
                | TablesideError::RateLimit { .. }
                | TablesideError::Timeout { .. }
        )
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            TablesideError::RateLimit { retry_after } => Some(*retry_after),
            TablesideError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates the session is no longer valid
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TablesideError::Unauthorized { .. } | TablesideError::NotAuthenticated
        )
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TablesideError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, TablesideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let timeout_err = TablesideError::Timeout { duration: 30 };
        assert!(timeout_err.is_retryable());
        assert_eq!(timeout_err.retry_delay(), Some(1));

        let rate_err = TablesideError::RateLimit { retry_after: 5 };
        assert_eq!(rate_err.retry_delay(), Some(5));

        let auth_err = TablesideError::NotAuthenticated;
        assert!(!auth_err.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(TablesideError::NotAuthenticated.is_auth_error());
        assert!(
            TablesideError::Unauthorized {
                message: "expired".to_string()
            }
            .is_auth_error()
        );
        assert!(!TablesideError::Timeout { duration: 30 }.is_auth_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = TablesideError::api_error(StatusCode::UNPROCESSABLE_ENTITY, "Invalid status");
        match err {
            TablesideError::Api { code, message } => {
                assert_eq!(code, 422);
                assert_eq!(message, "Invalid status");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
