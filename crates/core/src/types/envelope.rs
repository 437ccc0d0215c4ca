//! The `{code, message, data}` envelope wrapping every API response.

use serde::{Deserialize, Serialize};

use super::error_code::{BusinessErrorCode, is_success_code};

/// A decoded API response.
///
/// `code` is an HTTP-style status (`200`, `201`) on success or a five-digit
/// [`BusinessErrorCode`] on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Build an envelope with an empty message.
    pub const fn new(code: i32, data: T) -> Self {
        Self {
            code,
            message: String::new(),
            data,
        }
    }

    /// Whether the envelope code is a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        is_success_code(self.code)
    }

    /// The business error code, if `code` is one.
    #[must_use]
    pub const fn business_error(&self) -> Option<BusinessErrorCode> {
        BusinessErrorCode::from_code(self.code)
    }

    /// Transform the payload, keeping code and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            code: self.code,
            message: self.message,
            data: f(self.data),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let json = r#"{"code":200,"message":"ok","data":"tok123"}"#;
        let response: ApiResponse<String> = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.data, "tok123");
        assert_eq!(response.business_error(), None);
    }

    #[test]
    fn test_decode_business_error_envelope() {
        let json = r#"{"code":10005,"message":"","data":null}"#;
        let response: ApiResponse<Option<String>> = serde_json::from_str(json).unwrap();
        assert!(!response.is_success());
        assert_eq!(
            response.business_error(),
            Some(BusinessErrorCode::PasswordIncorrect)
        );
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let json = r#"{"code":201,"data":[1,2]}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(response.message.is_empty());
        assert_eq!(response.map(|v| v.len()).data, 2);
    }
}
