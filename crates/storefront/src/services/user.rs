use tracing::instrument;

use tomato_core::ApiResponse;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{LoginParams, RegisterParams, UpdateUserParams, User};
use crate::transport::ApiRequest;

const LOGIN: &str = "/user/login";
const REGISTER: &str = "/user/register";
const PROFILE: &str = "/user/profile";

/// Account endpoints.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(username = %params.username))]
    pub async fn login(&self, params: &LoginParams) -> Result<ApiResponse<String>> {
        self.client.send(ApiRequest::post(LOGIN).json(params)?).await
    }

    /// Create an account. Success is envelope code 201.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(username = %params.username))]
    pub async fn register(&self, params: &RegisterParams) -> Result<ApiResponse<Option<User>>> {
        self.client.send(ApiRequest::post(REGISTER).json(params)?).await
    }

    /// Profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<ApiResponse<User>> {
        self.client.send(ApiRequest::get(PROFILE)).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, params: &UpdateUserParams) -> Result<ApiResponse<User>> {
        self.client.send(ApiRequest::put(PROFILE).json(params)?).await
    }
}
