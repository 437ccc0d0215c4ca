//! HTTP client adapter for the bookstore REST API.
//!
//! Every service call goes through [`ApiClient::send`], which:
//!
//! - attaches `Authorization: Bearer <token>` when the session holds one
//! - unwraps the `{code, message, data}` envelope on success
//! - on 401 clears the session, tells the user and navigates to login
//! - on any other failure toasts a user-facing message
//!
//! and then always hands the error back to the caller.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use tomato_core::{ApiResponse, is_success_code, resolve_error_message};

use crate::config::StorefrontConfig;
use crate::error::{ClientError, Result};
use crate::navigator::{Navigator, TracingNavigator};
use crate::notify::{Notifier, TracingNotifier};
use crate::routes;
use crate::session::Session;
use crate::storage::FileTokenStorage;
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// Shown when the server rejects the session token.
pub const SESSION_EXPIRED_MESSAGE: &str = "登录已过期，请重新登录";
/// Shown when no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "网络请求失败，请检查网络连接";
/// Shown when the request could not be built or the response not decoded.
pub const REQUEST_ERROR_MESSAGE: &str = "请求异常";

/// Envelope as received, before the payload is typed.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    code: i32,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

/// Client for the bookstore REST API.
///
/// Cheap to clone; all clones share the transport, session and sinks.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    transport: Arc<dyn Transport>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Assemble a client from its parts.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                transport,
                session,
                notifier,
                navigator,
            }),
        }
    }

    /// Production client: HTTP transport, file-backed token, toasts and
    /// navigation reported through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        let session = Session::new(Arc::new(FileTokenStorage::new(config.token_path())));
        Ok(Self::new(
            Arc::new(transport),
            session,
            Arc::new(TracingNotifier),
            Arc::new(TracingNavigator),
        ))
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    /// Send a request and decode the envelope payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for transport failures, 401, non-success status
    /// or envelope codes and undecodable bodies. The matching side effects
    /// have already run when the error is returned.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send<T: DeserializeOwned>(
        &self,
        mut request: ApiRequest,
    ) -> Result<ApiResponse<T>> {
        request.bearer = self.inner.session.bearer();

        let raw = match self.inner.transport.send(request).await {
            Ok(raw) => raw,
            Err(err) => return Err(self.report(err)),
        };

        Self::decode(raw).map_err(|err| self.report(err))
    }

    fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<ApiResponse<T>> {
        let envelope = serde_json::from_str::<RawEnvelope>(&raw.body);
        let http_ok = (200..300).contains(&raw.status);

        if raw.status == 401 || envelope.as_ref().is_ok_and(|e| e.code == 401) {
            return Err(ClientError::Unauthorized);
        }

        match envelope {
            Ok(envelope) if http_ok && is_success_code(envelope.code) => {
                let data = serde_json::from_value(envelope.data)?;
                Ok(ApiResponse {
                    code: envelope.code,
                    message: envelope.message.unwrap_or_default(),
                    data,
                })
            }
            Ok(envelope) => Err(ClientError::Api {
                status: raw.status,
                code: envelope.code,
                message: resolve_error_message(
                    envelope.message.as_deref(),
                    Some(envelope.code),
                    raw.status,
                ),
            }),
            Err(e) if http_ok => Err(ClientError::Parse(e)),
            Err(_) => Err(ClientError::Api {
                status: raw.status,
                code: i32::from(raw.status),
                message: resolve_error_message(None, None, raw.status),
            }),
        }
    }

    /// Run the user-facing side effects for `err` and return it.
    fn report(&self, err: ClientError) -> ClientError {
        match &err {
            ClientError::Unauthorized => self.expire_session(),
            ClientError::Api {
                status,
                code,
                message,
            } => {
                debug!(status, code, message = %message, "API returned an error");
                self.inner.notifier.error(message);
            }
            ClientError::Network(_) | ClientError::Timeout => {
                warn!(error = %err, "No response from API");
                self.inner.notifier.error(NETWORK_ERROR_MESSAGE);
            }
            ClientError::Parse(_) | ClientError::InvalidUrl(_) | ClientError::Request(_) => {
                warn!(error = %err, "Request failed");
                self.inner.notifier.error(REQUEST_ERROR_MESSAGE);
            }
        }
        err
    }

    fn expire_session(&self) {
        warn!("Session rejected by server, logging out");
        self.inner.session.clear();
        self.inner.notifier.error(SESSION_EXPIRED_MESSAGE);
        self.inner.navigator.navigate(routes::USER_LOGIN);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::navigator::MemoryNavigator;
    use crate::notify::MemoryNotifier;
    use crate::storage::MemoryTokenStorage;
    use crate::transport::ScriptedTransport;

    /// A client wired to in-memory collaborators, with handles to inspect them.
    pub struct Harness {
        pub client: ApiClient,
        pub transport: ScriptedTransport,
        pub notifier: MemoryNotifier,
        pub navigator: MemoryNavigator,
        pub storage: MemoryTokenStorage,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_storage(MemoryTokenStorage::new())
        }

        pub fn logged_in() -> Self {
            Self::with_storage(MemoryTokenStorage::with_token("tok123"))
        }

        pub fn with_storage(storage: MemoryTokenStorage) -> Self {
            let transport = ScriptedTransport::new();
            let notifier = MemoryNotifier::new();
            let navigator = MemoryNavigator::new();
            let client = ApiClient::new(
                Arc::new(transport.clone()),
                Session::new(Arc::new(storage.clone())),
                Arc::new(notifier.clone()),
                Arc::new(navigator.clone()),
            );
            Self {
                client,
                transport,
                notifier,
                navigator,
                storage,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::notify::ToastLevel;

    #[tokio::test]
    async fn test_attaches_bearer_when_logged_in() {
        let h = Harness::logged_in();
        h.transport.respond_ok(Vec::<i32>::new());

        let response: ApiResponse<Vec<i32>> =
            h.client.send(ApiRequest::get("/products")).await.unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(
            h.transport.last_request().unwrap().bearer.as_deref(),
            Some("tok123")
        );
    }

    #[tokio::test]
    async fn test_no_bearer_when_logged_out() {
        let h = Harness::new();
        h.transport.respond_ok(Value::Null);

        let _: ApiResponse<Value> = h.client.send(ApiRequest::get("/products")).await.unwrap();
        assert_eq!(h.transport.last_request().unwrap().bearer, None);
    }

    #[tokio::test]
    async fn test_created_code_is_success() {
        let h = Harness::logged_in();
        h.transport.respond_created("ok");

        let response: ApiResponse<String> =
            h.client.send(ApiRequest::post("/user/register")).await.unwrap();
        assert_eq!(response.code, 201);
        assert!(h.notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_http_401_expires_session() {
        let h = Harness::logged_in();
        h.transport.respond_raw(401, "");

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::get("/cart")).await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert!(!h.client.session().is_logged_in());
        assert_eq!(h.storage.stored(), None);
        assert_eq!(h.notifier.messages(ToastLevel::Error), vec![SESSION_EXPIRED_MESSAGE]);
        assert_eq!(h.navigator.last().as_deref(), Some(routes::USER_LOGIN));
    }

    #[tokio::test]
    async fn test_envelope_401_expires_session() {
        let h = Harness::logged_in();
        h.transport.respond_envelope(200, 401, "token expired", Value::Null);

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::get("/cart")).await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert!(!h.client.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_business_error_uses_code_table_when_message_empty() {
        let h = Harness::new();
        h.transport.respond_business_error(10005, "");

        let result: Result<ApiResponse<String>> =
            h.client.send(ApiRequest::post("/user/login")).await;
        match result {
            Err(ClientError::Api { status, code, message }) => {
                assert_eq!(status, 400);
                assert_eq!(code, 10005);
                assert_eq!(message, "密码不正确");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert_eq!(h.notifier.messages(ToastLevel::Error), vec!["密码不正确"]);
        assert!(h.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_server_message_wins() {
        let h = Harness::new();
        h.transport.respond_business_error(20002, "《CSAPP》库存不足");

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::post("/cart")).await;
        assert!(result.is_err());
        assert!(h.notifier.contains("《CSAPP》库存不足"));
    }

    #[tokio::test]
    async fn test_business_code_on_http_200_is_error() {
        let h = Harness::new();
        h.transport.respond_envelope(200, 40002, "", Value::Null);

        let result: Result<ApiResponse<Value>> =
            h.client.send(ApiRequest::post("/orders/1/pay")).await;
        assert_eq!(result.unwrap_err().business_code().map(|c| c.code()), Some(40002));
        assert!(h.notifier.contains("订单已支付"));
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back_to_status_table() {
        let h = Harness::new();
        h.transport.respond_raw(404, "<html>Not Found</html>");

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::get("/nope")).await;
        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
        assert!(h.notifier.contains("资源不存在"));
    }

    #[tokio::test]
    async fn test_unknown_status_uses_generic_message() {
        let h = Harness::new();
        h.transport.respond_raw(502, "");

        let _ = h.client.send::<Value>(ApiRequest::get("/products")).await;
        assert!(h.notifier.contains("请求失败"));
    }

    #[tokio::test]
    async fn test_network_failure_toasts() {
        let h = Harness::logged_in();
        h.transport.fail_network();

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::get("/products")).await;
        assert!(matches!(result, Err(ClientError::Network(_))));
        assert!(h.notifier.contains(NETWORK_ERROR_MESSAGE));
        // Session is untouched by transport failures
        assert!(h.client.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_timeout_toasts() {
        let h = Harness::new();
        h.transport.fail_timeout();

        let result: Result<ApiResponse<Value>> = h.client.send(ApiRequest::get("/products")).await;
        assert!(matches!(result, Err(ClientError::Timeout)));
        assert!(h.notifier.contains(NETWORK_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_parse_error() {
        let h = Harness::new();
        h.transport.respond_ok("not a number");

        let result: Result<ApiResponse<i64>> = h.client.send(ApiRequest::get("/products")).await;
        assert!(matches!(result, Err(ClientError::Parse(_))));
        assert!(h.notifier.contains(REQUEST_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_data_decodes_as_null() {
        let h = Harness::new();
        h.transport.respond_raw(200, r#"{"code":200,"message":"删除成功"}"#);

        let response: ApiResponse<Option<String>> =
            h.client.send(ApiRequest::delete("/cart")).await.unwrap();
        assert_eq!(response.data, None);
        assert_eq!(response.message, "删除成功");
    }
}
