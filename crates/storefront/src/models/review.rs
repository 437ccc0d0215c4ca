//! Book review types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tomato_core::{ProductId, ReviewId, UserId};

use super::timestamp;

/// A rating plus optional text left by a user on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    /// 0 to 10 in steps of 2 (half stars).
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

/// Payload for creating or editing a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewParams {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_review_wire_format() {
        let json = r#"{
            "id": 4,
            "productId": 3,
            "userId": 1,
            "username": "alice",
            "rating": 8,
            "content": "值得一读",
            "createdAt": "2025-04-01T12:30:00",
            "updatedAt": "2025-04-02T08:00:00"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.id, ReviewId::new(4));
        assert_eq!(review.rating, 8);
        assert!(review.updated_at > review.created_at);
    }
}
