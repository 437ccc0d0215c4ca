//! Front-end route table and the navigation guard.
//!
//! # Routes
//!
//! ```text
//! /                   - Home
//! /user/login         - Login (guests only)
//! /user/register      - Register (guests only)
//! /user/profile       - Profile (requires auth)
//! /products           - Product listing
//! /products/search    - Search results
//! /products/:id       - Product detail
//! /cart               - Cart (requires auth)
//! /order              - Orders (requires auth)
//! /notes/:noteId      - Note detail
//! /admin              - Admin console (requires admin)
//! ```

use std::fmt::Display;

use url::form_urlencoded;

use crate::session::Session;

pub const HOME: &str = "/";
pub const USER_LOGIN: &str = "/user/login";
pub const USER_REGISTER: &str = "/user/register";
pub const USER_PROFILE: &str = "/user/profile";
pub const PRODUCTS: &str = "/products";
pub const PRODUCTS_DETAIL: &str = "/products/:id";
pub const PRODUCTS_SEARCH: &str = "/products/search";
pub const CART: &str = "/cart";
pub const ORDER: &str = "/order";
pub const NOTE_DETAIL: &str = "/notes/:noteId";
pub const ADMIN: &str = "/admin";

/// Per-route access rules and page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Only reachable while logged out.
    pub guest: bool,
}

impl RouteMeta {
    const fn open(title: &'static str) -> Self {
        Self {
            title,
            requires_auth: false,
            requires_admin: false,
            guest: false,
        }
    }

    const fn auth(title: &'static str) -> Self {
        Self {
            requires_auth: true,
            ..Self::open(title)
        }
    }

    const fn admin(title: &'static str) -> Self {
        Self {
            requires_admin: true,
            ..Self::auth(title)
        }
    }

    const fn guest(title: &'static str) -> Self {
        Self {
            guest: true,
            ..Self::open(title)
        }
    }
}

/// Every route with its rules. Static segments come before parameterised
/// ones so `/products/search` is not taken for a product id.
pub const ROUTES: &[(&str, RouteMeta)] = &[
    (HOME, RouteMeta::open("首页")),
    (USER_LOGIN, RouteMeta::guest("用户登录")),
    (USER_REGISTER, RouteMeta::guest("用户注册")),
    (USER_PROFILE, RouteMeta::auth("个人中心")),
    (PRODUCTS, RouteMeta::open("商品列表")),
    (PRODUCTS_SEARCH, RouteMeta::open("搜索")),
    (PRODUCTS_DETAIL, RouteMeta::open("商品详情")),
    (CART, RouteMeta::auth("购物车")),
    (ORDER, RouteMeta::auth("订单")),
    (NOTE_DETAIL, RouteMeta::open("笔记详情")),
    (ADMIN, RouteMeta::admin("管理后台")),
];

/// Fill `:name` placeholders in `route`. Unknown names are ignored.
///
/// ```
/// use tomato_storefront::routes::{build_route, PRODUCTS_DETAIL};
///
/// assert_eq!(build_route(PRODUCTS_DETAIL, &[("id", &42)]), "/products/42");
/// ```
#[must_use]
pub fn build_route(route: &str, params: &[(&str, &dyn Display)]) -> String {
    params.iter().fold(route.to_string(), |path, (name, value)| {
        path.replacen(&format!(":{name}"), &value.to_string(), 1)
    })
}

fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') && !s.is_empty() => {}
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}

/// Rules for a concrete path such as `/products/42?tab=notes`.
#[must_use]
pub fn meta_for(path: &str) -> Option<RouteMeta> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = match path.trim_end_matches('/') {
        "" => HOME,
        trimmed => trimmed,
    };
    ROUTES
        .iter()
        .find(|(pattern, _)| matches(pattern, path))
        .map(|(_, meta)| *meta)
}

/// Outcome of [`guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Decide whether navigation to `target` may go ahead.
///
/// - auth required and logged out: to login, with `redirect` set to `target`
/// - admin required and not an admin: home
/// - guest-only and logged in: home
///
/// Paths outside the table always proceed.
#[must_use]
pub fn guard(target: &str, session: &Session) -> GuardDecision {
    let Some(meta) = meta_for(target) else {
        return GuardDecision::Proceed;
    };

    if meta.requires_auth && !session.is_logged_in() {
        let redirect: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        return GuardDecision::Redirect(format!("{USER_LOGIN}?redirect={redirect}"));
    }
    if meta.requires_admin && !session.is_admin() {
        return GuardDecision::Redirect(HOME.to_string());
    }
    if meta.guest && session.is_logged_in() {
        return GuardDecision::Redirect(HOME.to_string());
    }
    GuardDecision::Proceed
}
