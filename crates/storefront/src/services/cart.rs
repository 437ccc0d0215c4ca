use tracing::instrument;

use tomato_core::{ApiResponse, CartItemId};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CartAddParams, CartList, Checkout, Order, QuantityUpdate};
use crate::transport::ApiRequest;

const CART: &str = "/cart";

/// Shopping cart endpoints for the logged-in user.
#[derive(Debug, Clone)]
pub struct CartService {
    client: ApiClient,
}

impl CartService {
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
    pub async fn get(&self) -> Result<ApiResponse<CartList>> {
        self.client.send(ApiRequest::get(CART)).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(product_id = %params.product_id, quantity = params.quantity))]
    pub async fn add(&self, params: CartAddParams) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::post(CART).json(&params)?).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(cart_item_id = %cart_item_id))]
    pub async fn remove(&self, cart_item_id: CartItemId) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!("{CART}/{cart_item_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(cart_item_id = %cart_item_id))]
    pub async fn update_quantity(
        &self,
        cart_item_id: CartItemId,
        quantity: u32,
    ) -> Result<ApiResponse<Ack>> {
        let request =
            ApiRequest::patch(format!("{CART}/{cart_item_id}")).json(&QuantityUpdate { quantity })?;
        self.client.send(request).await
    }

    /// Turn the selected lines into a pending order.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, checkout), fields(lines = checkout.cart_item_ids.len()))]
    pub async fn checkout(&self, checkout: &Checkout) -> Result<ApiResponse<Order>> {
        self.client
            .send(ApiRequest::post(format!("{CART}/checkout")).json(checkout)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::delete(CART)).await
    }
}
