//! Homepage advertisement banner.

use serde::{Deserialize, Serialize};

use tomato_core::{AdvertisementId, ProductId};

/// A banner linking to a product. Also used as the create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AdvertisementId>,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub product_id: ProductId,
}
