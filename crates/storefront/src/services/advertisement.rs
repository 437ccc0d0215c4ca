use tracing::instrument;

use tomato_core::{AdvertisementId, ApiResponse};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Advertisement;
use crate::transport::ApiRequest;

const ADVERTISEMENTS: &str = "/advertisements";

/// Homepage banner endpoints. Writes require the admin role.
#[derive(Debug, Clone)]
pub struct AdvertisementService {
    client: ApiClient,
}

impl AdvertisementService {
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
    pub async fn list(&self) -> Result<ApiResponse<Vec<Advertisement>>> {
        self.client.send(ApiRequest::get(ADVERTISEMENTS)).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(advertisement_id = %id))]
    pub async fn get(&self, id: AdvertisementId) -> Result<ApiResponse<Advertisement>> {
        self.client
            .send(ApiRequest::get(format!("{ADVERTISEMENTS}/{id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, advertisement), fields(title = %advertisement.title))]
    pub async fn create(
        &self,
        advertisement: &Advertisement,
    ) -> Result<ApiResponse<Advertisement>> {
        self.client
            .send(ApiRequest::post(ADVERTISEMENTS).json(advertisement)?)
            .await
    }

    /// Update a banner; the id travels in the body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, advertisement), fields(advertisement_id = ?advertisement.id))]
    pub async fn update(
        &self,
        advertisement: &Advertisement,
    ) -> Result<ApiResponse<Advertisement>> {
        self.client
            .send(ApiRequest::put(ADVERTISEMENTS).json(advertisement)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(advertisement_id = %id))]
    pub async fn delete(&self, id: AdvertisementId) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!("{ADVERTISEMENTS}/{id}")))
            .await
    }
}
