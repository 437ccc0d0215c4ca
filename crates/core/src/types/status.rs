//! Status enums for various entities.
//!
//! All of these are server-authoritative: the client deserializes them and
//! renders labels, but never computes transitions.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, waiting for payment.
    #[default]
    Pending,
    Paid,
    Cancelled,
    /// Payment window elapsed.
    Timeout,
}

impl OrderStatus {
    /// Label shown to shoppers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "待支付",
            Self::Paid => "已支付",
            Self::Cancelled => "已取消",
            Self::Timeout => "已超时",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment method accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Alipay,
}

impl PaymentMethod {
    /// Label shown to shoppers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alipay => "支付宝",
        }
    }
}

/// Reader feedback on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackType {
    Like,
    Dislike,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let status: Result<OrderStatus, _> = serde_json::from_str("\"TIMEOUT\"");
        assert_eq!(status.ok(), Some(OrderStatus::Timeout));
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).ok().as_deref(),
            Some("\"CANCELLED\"")
        );
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Pending.label(), "待支付");
        assert_eq!(OrderStatus::Paid.to_string(), "已支付");
        assert_eq!(PaymentMethod::Alipay.label(), "支付宝");
    }

    #[test]
    fn test_user_role_round_trip_str() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!(UserRole::Customer.to_string(), "CUSTOMER");
        assert!("root".parse::<UserRole>().is_err());
    }
}
