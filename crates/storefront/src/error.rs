//! Unified error type for API calls.
//!
//! Every service method returns `Result<ApiResponse<T>, ClientError>`. By the
//! time a caller sees a `ClientError`, the client has already run the side
//! effects for it (toast, session reset, redirect).

use thiserror::Error;

use tomato_core::BusinessErrorCode;

/// Errors produced by the HTTP client adapter.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server rejected the session token (HTTP 401).
    #[error("Unauthorized: session expired")]
    Unauthorized,

    /// The server answered with a non-success HTTP status or envelope code.
    #[error("API error: {status} - {code} - {message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Envelope code (business code or HTTP-style status).
        code: i32,
        /// Resolved user-facing message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be built or sent for a reason other than the network.
    #[error("Request error: {0}")]
    Request(String),
}

impl ClientError {
    /// The business error code carried by an `Api` error, if known.
    #[must_use]
    pub const fn business_code(&self) -> Option<BusinessErrorCode> {
        match self {
            Self::Api { code, .. } => BusinessErrorCode::from_code(*code),
            _ => None,
        }
    }

    /// Whether no response was received at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Api {
            status: 400,
            code: 10005,
            message: "密码不正确".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 400 - 10005 - 密码不正确");
        assert_eq!(ClientError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_business_code() {
        let err = ClientError::Api {
            status: 400,
            code: 60003,
            message: String::new(),
        };
        assert_eq!(
            err.business_code(),
            Some(BusinessErrorCode::NoteFeedbackAlreadyExists)
        );
        assert_eq!(ClientError::Unauthorized.business_code(), None);
    }

    #[test]
    fn test_is_transport() {
        assert!(ClientError::Timeout.is_transport());
        assert!(ClientError::Network("refused".to_string()).is_transport());
        assert!(!ClientError::Unauthorized.is_transport());
    }
}
