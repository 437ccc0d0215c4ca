//! Raw HTTP I/O behind the API client.
//!
//! A [`Transport`] turns an [`ApiRequest`] into a status code plus body text
//! and nothing more: envelope decoding, error mapping and session handling
//! live in [`crate::client`]. Production code uses [`HttpTransport`]; tests
//! script responses with [`ScriptedTransport`].

mod http;
mod scripted;

pub use http::HttpTransport;
pub use scripted::{RecordedRequest, ScriptedTransport};

use async_trait::async_trait;
use reqwest::Method;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing the content type from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::Request(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(guess_image_type);

        Ok(Self {
            file_name,
            content_type: content_type.map(str::to_string),
            bytes,
        })
    }
}

fn guess_image_type(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Request body variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// A `file` part plus extra text fields.
    Multipart {
        file: FilePart,
        fields: Vec<(String, String)>,
    },
}

/// A request relative to the API root (`path` starts with `/`).
#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Filled in by the client from the current session.
    pub bearer: Option<SecretString>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Parse` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn multipart(mut self, file: FilePart, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Multipart { file, fields };
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Status and body of an HTTP response, before envelope decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs HTTP I/O for the API client.
///
/// Implementations report a missing response as `ClientError::Network` or
/// `ClientError::Timeout`; any response, whatever its status, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::post("/cart")
            .json(&serde_json::json!({"productId": 3, "quantity": 1}))
            .unwrap()
            .query("page", "1");
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/cart");
        assert_eq!(request.query, vec![("page".to_string(), "1".to_string())]);
        assert!(matches!(request.body, RequestBody::Json(_)));
        assert!(request.bearer.is_none());
    }

    #[tokio::test]
    async fn test_file_part_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.PNG");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let part = FilePart::from_path(&path).await.unwrap();
        assert_eq!(part.file_name, "cover.PNG");
        assert_eq!(part.content_type.as_deref(), Some("image/png"));
        assert_eq!(part.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_file_part_missing_file() {
        let result = FilePart::from_path("/definitely/not/here.jpg").await;
        assert!(matches!(result, Err(ClientError::Request(_))));
    }
}
