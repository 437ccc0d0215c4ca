use tracing::instrument;

use tomato_core::{ApiResponse, OrderId};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Order, Payment};
use crate::transport::ApiRequest;

const ORDERS: &str = "/orders";

/// Order endpoints for the logged-in user.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
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
    pub async fn list(&self) -> Result<ApiResponse<Vec<Order>>> {
        self.client.send(ApiRequest::get(ORDERS)).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: OrderId) -> Result<ApiResponse<Order>> {
        self.client.send(ApiRequest::get(format!("{ORDERS}/{id}"))).await
    }

    /// Start payment; the response carries the gateway form.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn pay(&self, id: OrderId) -> Result<ApiResponse<Payment>> {
        self.client.send(ApiRequest::post(format!("{ORDERS}/{id}/pay"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: OrderId) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::delete(format!("{ORDERS}/{id}"))).await
    }
}
