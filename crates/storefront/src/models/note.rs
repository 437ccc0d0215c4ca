//! Reading-note types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tomato_core::{CommentId, FeedbackType, NoteId, ProductId, UserId};

use super::timestamp;

/// A reading note on a product. Counters are maintained by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_title: String,
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub dislike_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    /// The requesting user's own feedback, if any.
    #[serde(default)]
    pub user_feedback: Option<FeedbackType>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Note {
    /// Shift the comment counter, never going below zero.
    pub const fn adjust_comment_count(&mut self, delta: i32) {
        self.comment_count = self.comment_count.saturating_add_signed(delta);
    }
}

/// A comment under a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteComment {
    pub id: CommentId,
    pub note_id: NoteId,
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Payload for creating or editing a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteParams {
    pub title: String,
    pub content: String,
}

/// Payload for `POST /notes/{id}/feedback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFeedbackParams {
    pub feedback_type: FeedbackType,
}

/// Payload for `POST /notes/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCommentParams {
    pub content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Note {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "title": "读后感",
            "content": "……",
            "productId": 3,
            "productTitle": "CSAPP",
            "userId": 1,
            "username": "alice",
            "likeCount": 2,
            "dislikeCount": 0,
            "commentCount": 1,
            "userFeedback": "LIKE",
            "createdAt": "2025-04-01T12:30:00",
            "updatedAt": "2025-04-01T12:30:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_note_wire_format() {
        let note = sample();
        assert_eq!(note.id, NoteId::new(5));
        assert_eq!(note.user_feedback, Some(FeedbackType::Like));
    }

    #[test]
    fn test_comment_count_floors_at_zero() {
        let mut note = sample();
        note.adjust_comment_count(-1);
        assert_eq!(note.comment_count, 0);
        note.adjust_comment_count(-1);
        assert_eq!(note.comment_count, 0);
        note.adjust_comment_count(1);
        assert_eq!(note.comment_count, 1);
    }

    #[test]
    fn test_feedback_params_wire_format() {
        let params = NoteFeedbackParams {
            feedback_type: FeedbackType::Dislike,
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"feedbackType":"DISLIKE"}"#
        );
    }
}
