//! Order and payment types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tomato_core::{OrderId, OrderStatus, PaymentMethod, Price, UserId};

use super::cart::CartItem;
use super::timestamp;

/// An order. Its status is always taken from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub total_amount: Price,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_no: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub payment_time: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub create_time: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub update_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub order_items: Vec<CartItem>,
}

/// Response of `POST /orders/{id}/pay`.
///
/// `payment_form` is the gateway's auto-submitting HTML form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_form: String,
    pub order_id: OrderId,
    pub total_amount: Price,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_format() {
        let json = r#"{
            "orderId": 12,
            "userId": 1,
            "totalAmount": 59.9,
            "paymentMethod": "ALIPAY",
            "status": "PENDING",
            "shippingAddress": "江苏省苏州市",
            "createTime": "2025-04-01 12:30:00",
            "paymentTime": null,
            "orderItems": [{"productId": 3, "quantity": 1}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, Some(OrderId::new(12)));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.status.label(), "待支付");
        assert!(order.create_time.is_some());
        assert_eq!(order.payment_time, None);
        assert_eq!(order.order_items.len(), 1);
    }

    #[test]
    fn test_payment_wire_format() {
        let json = r#"{
            "paymentForm": "<form></form>",
            "orderId": 12,
            "totalAmount": 59.9,
            "paymentMethod": "ALIPAY"
        }"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.total_amount.to_string(), "¥59.90");
    }
}
