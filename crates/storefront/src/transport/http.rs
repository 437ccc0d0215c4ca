//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiRequest, FilePart, RawResponse, RequestBody, Transport};
use crate::config::StorefrontConfig;
use crate::error::ClientError;

/// Sends requests to the REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured API root and timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a service path against the API root.
    ///
    /// Paths are appended rather than joined so the root's own path
    /// (`/api`) is kept.
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

fn multipart_form(file: FilePart, fields: Vec<(String, String)>) -> Result<Form, ClientError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(content_type) = file.content_type {
        part = part
            .mime_str(&content_type)
            .map_err(|e| ClientError::Request(e.to_string()))?;
    }

    let mut form = Form::new().part("file", part);
    for (name, value) in fields {
        form = form.text(name, value);
    }
    Ok(form)
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_builder() {
        ClientError::Request(err.to_string())
    } else {
        ClientError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let url = self.url(&request.path, &request.query)?;
        let mut builder = self.client.request(request.method, url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { file, fields } => {
                builder.multipart(multipart_form(file, fields)?)
            }
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(RawResponse { status, body })
    }
}
