use tracing::instrument;

use tomato_core::{ApiResponse, CommentId, FeedbackType, NoteId, ProductId, UserId};

use super::Ack;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Note, NoteComment, NoteCommentParams, NoteFeedbackParams, NoteParams};
use crate::transport::ApiRequest;

const NOTES: &str = "/notes";

/// Reading-note endpoints, including feedback and comments.
#[derive(Debug, Clone)]
pub struct NoteService {
    client: ApiClient,
}

impl NoteService {
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
    pub async fn for_product(&self, product_id: ProductId) -> Result<ApiResponse<Vec<Note>>> {
        self.client
            .send(ApiRequest::get(format!("{NOTES}/product/{product_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<ApiResponse<Vec<Note>>> {
        self.client.send(ApiRequest::get(format!("{NOTES}/user"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn for_user(&self, user_id: UserId) -> Result<ApiResponse<Vec<Note>>> {
        self.client
            .send(ApiRequest::get(format!("{NOTES}/user/{user_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<ApiResponse<Vec<Note>>> {
        self.client.send(ApiRequest::get(format!("{NOTES}/all"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id))]
    pub async fn get(&self, id: NoteId) -> Result<ApiResponse<Note>> {
        self.client.send(ApiRequest::get(format!("{NOTES}/{id}"))).await
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
        params: &NoteParams,
    ) -> Result<ApiResponse<Note>> {
        self.client
            .send(ApiRequest::post(format!("{NOTES}/product/{product_id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(note_id = %id))]
    pub async fn update(&self, id: NoteId, params: &NoteParams) -> Result<ApiResponse<Note>> {
        self.client
            .send(ApiRequest::put(format!("{NOTES}/{id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(note_id = %id))]
    pub async fn update_as_admin(
        &self,
        id: NoteId,
        params: &NoteParams,
    ) -> Result<ApiResponse<Note>> {
        self.client
            .send(ApiRequest::put(format!("{NOTES}/admin/{id}")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id))]
    pub async fn delete(&self, id: NoteId) -> Result<ApiResponse<Ack>> {
        self.client.send(ApiRequest::delete(format!("{NOTES}/{id}"))).await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id))]
    pub async fn delete_as_admin(&self, id: NoteId) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!("{NOTES}/admin/{id}")))
            .await
    }

    /// Like or dislike a note. The server toggles and returns the updated note.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id, feedback = ?feedback_type))]
    pub async fn feedback(
        &self,
        id: NoteId,
        feedback_type: FeedbackType,
    ) -> Result<ApiResponse<Note>> {
        let params = NoteFeedbackParams { feedback_type };
        self.client
            .send(ApiRequest::post(format!("{NOTES}/{id}/feedback")).json(&params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id))]
    pub async fn comments(&self, id: NoteId) -> Result<ApiResponse<Vec<NoteComment>>> {
        self.client
            .send(ApiRequest::get(format!("{NOTES}/{id}/comments")))
            .await
    }

    /// Success is envelope code 201.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self, params), fields(note_id = %id))]
    pub async fn add_comment(
        &self,
        id: NoteId,
        params: &NoteCommentParams,
    ) -> Result<ApiResponse<NoteComment>> {
        self.client
            .send(ApiRequest::post(format!("{NOTES}/{id}/comments")).json(params)?)
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id, comment_id = %comment_id))]
    pub async fn delete_comment(
        &self,
        id: NoteId,
        comment_id: CommentId,
    ) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!("{NOTES}/{id}/comments/{comment_id}")))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    #[instrument(skip(self), fields(note_id = %id, comment_id = %comment_id))]
    pub async fn delete_comment_as_admin(
        &self,
        id: NoteId,
        comment_id: CommentId,
    ) -> Result<ApiResponse<Ack>> {
        self.client
            .send(ApiRequest::delete(format!(
                "{NOTES}/admin/{id}/comments/{comment_id}"
            )))
            .await
    }
}
