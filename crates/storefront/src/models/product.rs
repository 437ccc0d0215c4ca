//! Catalog types.

use serde::{Deserialize, Serialize};

use tomato_core::{Price, ProductId, SpecificationId, StockpileId};

/// A key/value attribute of a book (author, ISBN, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpecificationId>,
    pub item: String,
    pub value: String,
}

/// A book for sale. Also used as the create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

impl Product {
    /// Merge an edited copy into this one. Absent optional fields and an
    /// empty specification list keep the current values.
    pub fn merge(&mut self, patch: &Self) {
        self.title.clone_from(&patch.title);
        self.price = patch.price;
        self.rate = patch.rate;
        if patch.description.is_some() {
            self.description.clone_from(&patch.description);
        }
        if patch.cover.is_some() {
            self.cover.clone_from(&patch.cover);
        }
        if patch.detail.is_some() {
            self.detail.clone_from(&patch.detail);
        }
        if !patch.specifications.is_empty() {
            self.specifications.clone_from(&patch.specifications);
        }
    }
}

/// Inventory counters for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stockpile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StockpileId>,
    pub amount: i64,
    pub frozen: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

impl Stockpile {
    /// Units that can still be sold.
    #[must_use]
    pub const fn available(&self) -> i64 {
        self.amount - self.frozen
    }

    /// Overwrite the counters from an update payload.
    pub const fn apply(&mut self, params: StockpileParams) {
        self.amount = params.amount;
        self.frozen = params.frozen;
    }
}

/// Payload for `PATCH /products/stockpile/{productId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockpileParams {
    pub amount: i64,
    pub frozen: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "id": 3,
            "title": "深入理解计算机系统",
            "price": 139.0,
            "rate": 9.7,
            "cover": "https://example.com/csapp.jpg",
            "specifications": [{"id": 1, "item": "作者", "value": "Randal E. Bryant"}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, Some(ProductId::new(3)));
        assert_eq!(product.price, Price::from_fen(13900));
        assert_eq!(product.specifications.len(), 1);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_new_product_omits_id() {
        let product = Product {
            id: None,
            title: "新书".to_string(),
            price: Price::from_fen(5000),
            rate: 0.0,
            description: None,
            cover: None,
            detail: None,
            specifications: Vec::new(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut cached: Product = serde_json::from_str(
            r#"{"id": 3, "title": "旧版", "price": 99.0, "cover": "a.jpg", "detail": "详情",
                "specifications": [{"item": "作者", "value": "佚名"}]}"#,
        )
        .unwrap();
        let patch: Product =
            serde_json::from_str(r#"{"id": 3, "title": "新版", "price": 88.0, "detail": "新详情"}"#)
                .unwrap();

        cached.merge(&patch);
        assert_eq!(cached.title, "新版");
        assert_eq!(cached.price, Price::from_fen(8800));
        assert_eq!(cached.cover.as_deref(), Some("a.jpg"));
        assert_eq!(cached.detail.as_deref(), Some("新详情"));
        assert_eq!(cached.specifications.len(), 1);
    }

    #[test]
    fn test_stockpile_apply() {
        let mut stockpile = Stockpile {
            id: Some(StockpileId::new(1)),
            amount: 10,
            frozen: 2,
            product_id: Some(ProductId::new(3)),
        };
        assert_eq!(stockpile.available(), 8);
        stockpile.apply(StockpileParams { amount: 20, frozen: 0 });
        assert_eq!(stockpile.available(), 20);
        assert_eq!(stockpile.product_id, Some(ProductId::new(3)));
    }
}
