//! Shopping cart types.

use serde::{Deserialize, Serialize};

use tomato_core::{CartItemId, PaymentMethod, Price, ProductId, UserId};

/// A cart line. Also used for the line items of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_item_id: Option<CartItemId>,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal, when the server sent a unit price.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.price.map(|p| p * self.quantity)
    }
}

/// Response of `GET /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartList {
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Number of lines.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_amount: Price,
}

/// Payload for `POST /cart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAddParams {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for `PATCH /cart/{cartItemId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// Payload for `POST /cart/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub cart_item_ids: Vec<CartItemId>,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_list_wire_format() {
        let json = r#"{
            "items": [
                {"cartItemId": 7, "productId": 3, "title": "CSAPP", "price": 12.5, "quantity": 2}
            ],
            "total": 1,
            "totalAmount": 25
        }"#;
        let cart: CartList = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total, 1);
        assert_eq!(cart.total_amount, Price::from_fen(2500));
        let line = cart.items.first().unwrap();
        assert_eq!(line.cart_item_id, Some(CartItemId::new(7)));
        assert_eq!(line.subtotal(), Some(Price::from_fen(2500)));
    }

    #[test]
    fn test_checkout_serializes_camel_case() {
        let checkout = Checkout {
            user_id: None,
            cart_item_ids: vec![CartItemId::new(1), CartItemId::new(2)],
            shipping_address: "江苏省苏州市".to_string(),
            payment_method: PaymentMethod::Alipay,
        };
        let value = serde_json::to_value(&checkout).unwrap();
        assert_eq!(value["cartItemIds"], serde_json::json!([1, 2]));
        assert_eq!(value["paymentMethod"], "ALIPAY");
        assert!(value.get("userId").is_none());
    }
}
