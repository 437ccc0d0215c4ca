use tracing::instrument;

use tomato_core::{ApiResponse, ProductId, ReviewId, UserId};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Review, ReviewParams};
use crate::transport::ApiRequest;

const REVIEWS: &str = "/reviews";

/// Review endpoints. `*_as_admin` variants go through `/reviews/admin`.
#[derive(Debug, Clone)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn for_product(&self, product_id: ProductId) -> Result<ApiResponse<Vec<Review>>> {
        self.client
            .send(ApiRequest::get(format!("{REVIEWS}/product/{product_id}")))
            .await
    }

    /// Reviews written by the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<ApiResponse<Vec<Review>>> {
        self.client.send(ApiRequest::get(format!("{REVIEWS}/user"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn for_user(&self, user_id: UserId) -> Result<ApiResponse<Vec<Review>>> {
        self.client
            .send(ApiRequest::get(format!("{REVIEWS}/user/{user_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<ApiResponse<Vec<Review>>> {
        self.client.send(ApiRequest::get(format!("{REVIEWS}/all"))).await
    }

    /// Success is envelope code 201.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(product_id = %product_id))]
    pub async fn create(
        &self,
        product_id: ProductId,
        params: &ReviewParams,
    ) -> Result<ApiResponse<Review>> {
        self.client
            .send(ApiRequest::post(format!("{REVIEWS}/product/{product_id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(review_id = %id))]
    pub async fn update(&self, id: ReviewId, params: &ReviewParams) -> Result<ApiResponse<Review>> {
        self.client
            .send(ApiRequest::put(format!("{REVIEWS}/{id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(review_id = %id))]
    pub async fn update_as_admin(
        &self,
        id: ReviewId,
        params: &ReviewParams,
    ) -> Result<ApiResponse<Review>> {
        self.client
            .send(ApiRequest::put(format!("{REVIEWS}/admin/{id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete(&self, id: ReviewId) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::delete(format!("{REVIEWS}/{id}"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete_as_admin(&self, id: ReviewId) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!("{REVIEWS}/admin/{id}")))
            .await
    }
}
