use tracing::instrument;

use tomato_core::ApiResponse;

use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::{ApiRequest, FilePart};

const UPLOAD: &str = "/upload";

/// Folder used by [`UploadService::image`] when none is given.
pub const DEFAULT_IMAGE_FOLDER: &str = "general";

/// Multipart image uploads. Each call returns the public URL of the file.
#[derive(Debug, Clone)]
pub struct UploadService {
    client: ApiClient,
}

impl UploadService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn avatar(&self, file: FilePart) -> Result<ApiResponse<String>> {
        self.upload("avatar", file, Vec::new()).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn product_cover(&self, file: FilePart) -> Result<ApiResponse<String>> {
        self.upload("product-cover", file, Vec::new()).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn advertisement_cover(&self, file: FilePart) -> Result<ApiResponse<String>> {
        self.upload("advertisement-cover", file, Vec::new()).await
    }

    /// Upload an image into `folder` (default [`DEFAULT_IMAGE_FOLDER`]).
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn image(&self, file: FilePart, folder: Option<&str>) -> Result<ApiResponse<String>> {
        let folder = folder.unwrap_or(DEFAULT_IMAGE_FOLDER).to_string();
        self.upload("image", file, vec![("folder".to_string(), folder)])
            .await
    }

    async fn upload(
        &self,
        kind: &str,
        file: FilePart,
        fields: Vec<(String, String)>,
    ) -> Result<ApiResponse<String>> {
        self.client
            .send(ApiRequest::post(format!("{UPLOAD}/{kind}")).multipart(file, fields))
            .await
    }
}
