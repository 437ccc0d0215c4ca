//! An in-process stand-in for the bookstore REST API.
//!
//! Serves the subset of endpoints the end-to-end tests drive, with the same
//! envelope, status codes and business error codes as the real server.

mod handlers;
mod state;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

use tomato_core::{ApiResponse, BusinessErrorCode};

pub use state::{Db, FakeState, SEED_PASSWORD};

/// Error response in the server's envelope format.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unknown token.
    Unauthorized,
    /// A business rule rejected the request.
    Business(BusinessErrorCode),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, 401, "未授权，请先登录"),
            Self::Business(code) => (StatusCode::BAD_REQUEST, code.code(), code.message()),
        };
        let body = ApiResponse {
            code,
            message: message.to_string(),
            data: serde_json::Value::Null,
        };
        (status, Json(body)).into_response()
    }
}

impl From<BusinessErrorCode> for ApiError {
    fn from(code: BusinessErrorCode) -> Self {
        Self::Business(code)
    }
}

pub type ApiResult = Result<Response, ApiError>;

/// `200` with `data`.
pub fn ok<T: Serialize>(data: T) -> ApiResult {
    Ok((StatusCode::OK, Json(ApiResponse::new(200, data))).into_response())
}

/// `201` with `data`.
pub fn created<T: Serialize>(data: T) -> ApiResult {
    Ok((StatusCode::CREATED, Json(ApiResponse::new(201, data))).into_response())
}

fn api_routes() -> Router<FakeState> {
    Router::new()
        .route("/user/login", post(handlers::login))
        .route("/user/register", post(handlers::register))
        .route(
            "/user/profile",
            get(handlers::profile).put(handlers::update_profile),
        )
        .route("/products", get(handlers::list_products))
        .route("/products/{id}", get(handlers::get_product))
        .route("/products/stockpile/{id}", get(handlers::get_stockpile))
        .route(
            "/cart",
            get(handlers::get_cart)
                .post(handlers::add_to_cart)
                .delete(handlers::clear_cart),
        )
        .route(
            "/cart/{id}",
            delete(handlers::remove_cart_item).patch(handlers::update_cart_quantity),
        )
        .route("/cart/checkout", post(handlers::checkout))
        .route("/orders", get(handlers::list_orders))
        .route(
            "/orders/{id}",
            get(handlers::get_order).delete(handlers::cancel_order),
        )
        .route("/orders/{id}/pay", post(handlers::pay_order))
        .route("/notes/user", get(handlers::my_notes))
        .route(
            "/notes/product/{id}",
            get(handlers::product_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note).delete(handlers::delete_note),
        )
        .route("/notes/{id}/feedback", post(handlers::note_feedback))
        .route(
            "/notes/{id}/comments",
            get(handlers::note_comments).post(handlers::add_comment),
        )
        .route(
            "/notes/{id}/comments/{comment_id}",
            delete(handlers::delete_comment),
        )
        .route("/upload/{kind}", post(handlers::upload))
}

/// A fake API server bound to an ephemeral localhost port.
///
/// The server task is aborted when the value is dropped.
pub struct FakeBackend {
    base_url: String,
    state: FakeState,
    task: JoinHandle<()>,
}

impl FakeBackend {
    /// Start a server over freshly seeded data.
    ///
    /// # Errors
    ///
    /// Returns error if no local port can be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = FakeState::seeded();
        let app = Router::new()
            .nest("/api", api_routes())
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        debug!(%addr, "Fake backend listening");

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake backend stopped");
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}/api"),
            state,
            task,
        })
    }

    /// API root, including the `/api` prefix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Direct access to the server's data, for setup and assertions.
    #[must_use]
    pub const fn state(&self) -> &FakeState {
        &self.state
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}
