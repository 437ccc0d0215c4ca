//! Business error codes and user-facing message tables.
//!
//! Business codes are five digits: the first two select the module, the last
//! three the specific error (`10005` is user module, error 5). They travel in
//! the `code` field of the response envelope, usually with HTTP 400.
//!
//! | Prefix | Module |
//! |---|---|
//! | 10 | user |
//! | 20 | product |
//! | 30 | cart |
//! | 40 | order |
//! | 50 | review |
//! | 60 | note |
//! | 90 | system |

use serde::{Deserialize, Serialize};

/// Fallback message when nothing better is known.
pub const GENERIC_ERROR_MESSAGE: &str = "请求失败";

macro_rules! business_codes {
    ($($variant:ident = $code:literal => $message:literal,)+) => {
        /// Application-level error codes returned in the envelope.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum BusinessErrorCode {
            $($variant,)+
        }

        impl BusinessErrorCode {
            /// Numeric wire value.
            #[must_use]
            pub const fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// User-facing description.
            #[must_use]
            pub const fn message(self) -> &'static str {
                match self {
                    $(Self::$variant => $message,)+
                }
            }

            /// Look up a code, returning `None` for anything not in the table.
            #[must_use]
            pub const fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

business_codes! {
    // User module (10xxx)
    UserNotFound = 10001 => "用户不存在",
    UsernameAlreadyExists = 10002 => "用户名已存在",
    EmailAlreadyExists = 10003 => "邮箱已存在",
    PhoneAlreadyExists = 10004 => "手机号已存在",
    PasswordIncorrect = 10005 => "密码不正确",
    UserAccountLocked = 10006 => "账户已被锁定",
    UserUnauthorized = 10007 => "用户未授权",

    // Product module (20xxx)
    ProductNotFound = 20001 => "商品不存在",
    ProductOutOfStock = 20002 => "商品库存不足",
    ProductOffline = 20003 => "商品已下架",
    ProductPriceChanged = 20004 => "商品价格已变更",

    // Cart module (30xxx)
    CartEmpty = 30001 => "购物车为空",
    CartItemNotFound = 30002 => "购物车商品不存在",
    CartItemMaxLimit = 30003 => "已达购买数量上限",

    // Order module (40xxx)
    OrderNotFound = 40001 => "订单不存在",
    OrderAlreadyPaid = 40002 => "订单已支付",
    OrderAlreadyCancelled = 40003 => "订单已取消",
    OrderCannotCancel = 40004 => "订单无法取消",
    OrderStatusError = 40005 => "订单状态错误",

    // Review module (50xxx)
    ReviewNotFound = 50001 => "书评不存在",
    ReviewAlreadyExists = 50002 => "已发表过书评",
    ReviewContentInvalid = 50003 => "书评内容不符合规范",

    // Note module (60xxx)
    NoteNotFound = 60001 => "笔记不存在",
    NoteContentInvalid = 60002 => "笔记内容不符合规范",
    NoteFeedbackAlreadyExists = 60003 => "已对该笔记做出过相同反馈",

    // System (90xxx)
    SystemError = 90001 => "系统错误",
    OperationTooFrequent = 90002 => "操作过于频繁",
    InvalidParameter = 90003 => "参数无效",
    AccessDenied = 90004 => "访问被拒绝",
}

impl BusinessErrorCode {
    /// Two-digit module prefix (`10` for user, `60` for note, ...).
    #[must_use]
    pub const fn module(self) -> i32 {
        self.code() / 1000
    }
}

impl From<BusinessErrorCode> for i32 {
    fn from(code: BusinessErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for BusinessErrorCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown business error code: {code}"))
    }
}

impl std::fmt::Display for BusinessErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

/// HTTP status codes that carry meaning in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    Ok,
    Created,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl HttpStatus {
    /// Numeric status.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    /// User-facing description for error statuses.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Ok | Self::Created => None,
            Self::BadRequest => Some("请求参数错误"),
            Self::Unauthorized => Some("未授权访问"),
            Self::Forbidden => Some("禁止访问"),
            Self::NotFound => Some("资源不存在"),
            Self::InternalServerError => Some("服务器内部错误"),
        }
    }

    /// Look up a numeric status.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            200 => Some(Self::Ok),
            201 => Some(Self::Created),
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            500 => Some(Self::InternalServerError),
            _ => None,
        }
    }
}

/// Returns `true` for 2xx codes.
#[must_use]
pub const fn is_success_code(code: i32) -> bool {
    code >= 200 && code < 300
}

/// Resolve the message to show for a failed request.
///
/// Priority: server-provided message, then the business-code table, then the
/// HTTP-status table, then [`GENERIC_ERROR_MESSAGE`].
#[must_use]
pub fn resolve_error_message(
    server_message: Option<&str>,
    envelope_code: Option<i32>,
    http_status: u16,
) -> String {
    if let Some(message) = server_message.map(str::trim).filter(|m| !m.is_empty()) {
        return message.to_string();
    }

    envelope_code
        .and_then(BusinessErrorCode::from_code)
        .map(BusinessErrorCode::message)
        .or_else(|| HttpStatus::from_code(i32::from(http_status)).and_then(HttpStatus::message))
        .unwrap_or(GENERIC_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_code_lookup() {
        assert_eq!(
            BusinessErrorCode::from_code(10005),
            Some(BusinessErrorCode::PasswordIncorrect)
        );
        assert_eq!(BusinessErrorCode::PasswordIncorrect.message(), "密码不正确");
        assert_eq!(BusinessErrorCode::OrderAlreadyPaid.code(), 40002);
        assert_eq!(BusinessErrorCode::from_code(12345), None);
    }

    #[test]
    fn test_module_prefix() {
        assert_eq!(BusinessErrorCode::UserNotFound.module(), 10);
        assert_eq!(BusinessErrorCode::NoteFeedbackAlreadyExists.module(), 60);
        assert_eq!(BusinessErrorCode::AccessDenied.module(), 90);
    }

    #[test]
    fn test_business_code_serde() {
        let json = serde_json::to_string(&BusinessErrorCode::CartEmpty).ok();
        assert_eq!(json.as_deref(), Some("30001"));
        let parsed: Result<BusinessErrorCode, _> = serde_json::from_str("99999");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolve_prefers_server_message() {
        let message = resolve_error_message(Some("库存只剩 1 本"), Some(20002), 400);
        assert_eq!(message, "库存只剩 1 本");
    }

    #[test]
    fn test_resolve_falls_back_to_business_table() {
        assert_eq!(resolve_error_message(None, Some(10005), 400), "密码不正确");
        assert_eq!(resolve_error_message(Some("   "), Some(40002), 400), "订单已支付");
    }

    #[test]
    fn test_resolve_falls_back_to_http_table() {
        assert_eq!(resolve_error_message(None, Some(77777), 404), "资源不存在");
        assert_eq!(resolve_error_message(None, None, 403), "禁止访问");
    }

    #[test]
    fn test_resolve_generic_fallback() {
        assert_eq!(resolve_error_message(None, None, 418), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_success_codes() {
        assert!(is_success_code(200));
        assert!(is_success_code(201));
        assert!(!is_success_code(400));
        assert!(!is_success_code(10005));
    }
}
