//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange could not be completed (connect, timeout, interrupted).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The broker answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body, often a JSON `{"error", "reason"}` document.
        body: String,
    },

    /// The caller supplied arguments the broker would never accept.
    ///
    /// Raised before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON encoding of a request body or decoding of a response failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A connection profile could not be loaded or resolved.
    #[error("profile error: {0}")]
    Profile(#[from] rabbitadmin_config::ConfigError),
}

impl Error {
    /// HTTP status carried by this error, if the broker produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 404, .. })
    }

    /// Check if the broker rejected the credentials or the user lacks rights.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 401 | 403, .. })
    }

    /// Check if this is a 4xx broker response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::HttpStatus { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a 5xx broker response.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::HttpStatus { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> Error {
        Error::HttpStatus {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_status_predicates() {
        assert!(status(404).is_not_found());
        assert!(status(404).is_client_error());
        assert!(!status(404).is_server_error());

        assert!(status(401).is_auth_error());
        assert!(status(403).is_auth_error());
        assert!(!status(400).is_auth_error());

        assert!(status(503).is_server_error());
        assert_eq!(status(418).status(), Some(418));
    }

    #[test]
    fn test_invalid_argument_is_not_a_broker_error() {
        let err = Error::InvalidArgument("both password and password_hash".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("password_hash"));
    }

    #[test]
    fn test_display_includes_body() {
        let err = Error::HttpStatus {
            status: 404,
            body: r#"{"error":"Object Not Found","reason":"Not Found"}"#.to_string(),
        };
        assert!(err.to_string().starts_with("HTTP 404"));
        assert!(err.to_string().contains("Object Not Found"));
    }
}
