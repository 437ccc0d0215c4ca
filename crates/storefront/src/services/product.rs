use tracing::instrument;

use tomato_core::{ApiResponse, ProductId};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Product, Stockpile, StockpileParams};
use crate::transport::ApiRequest;

const PRODUCTS: &str = "/products";

/// Catalog endpoints. Writes require the admin role.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
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
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<ApiResponse<Vec<Product>>> {
        self.client.send(ApiRequest::get(PRODUCTS)).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<ApiResponse<Product>> {
        self.client.send(ApiRequest::get(format!("{PRODUCTS}/{id}"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, product), fields(title = %product.title))]
    pub async fn create(&self, product: &Product) -> Result<ApiResponse<Product>> {
        self.client.send(ApiRequest::post(PRODUCTS).json(product)?).await
    }

    /// Update a product; the id travels in the body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, product), fields(product_id = ?product.id))]
    pub async fn update(&self, product: &Product) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::put(PRODUCTS).json(product)?).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::delete(format!("{PRODUCTS}/{id}"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn stockpile(&self, product_id: ProductId) -> Result<ApiResponse<Stockpile>> {
        self.client
            .send(ApiRequest::get(format!("{PRODUCTS}/stockpile/{product_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_stockpile(
        &self,
        product_id: ProductId,
        params: StockpileParams,
    ) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::patch(format!("{PRODUCTS}/stockpile/{product_id}")).json(&params)?)
            .await
    }
}
