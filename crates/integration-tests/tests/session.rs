//! Login, token persistence and session expiry over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use tomato_integration_tests::{SEED_PASSWORD, TestContext};
use tomato_storefront::models::{LoginParams, RegisterParams, UpdateUserParams};
use tomato_storefront::notify::ToastLevel;
use tomato_storefront::routes;
use tomato_storefront::stores::{CartStore, UserStore};

#[tokio::test]
async fn test_login_persists_token_and_loads_profile() {
    let ctx = TestContext::new().await;
    let store = UserStore::new(ctx.client.clone());

    assert!(store.login(&LoginParams::new("alice", SEED_PASSWORD)).await);
    assert!(store.is_logged_in());
    assert_eq!(store.username(), "alice");
    assert!(!store.is_admin());
    assert!(ctx.notifier.contains("登录成功"));

    let persisted = std::fs::read_to_string(ctx.config.token_path()).unwrap();
    assert!(persisted.starts_with("tok-alice-"));

    // A restarted client picks the token up and can load the profile.
    let reopened = UserStore::new(ctx.reopen());
    assert!(reopened.is_logged_in());
    assert!(reopened.user().is_none());
    assert!(reopened.fetch_user_info().await);
    assert_eq!(reopened.username(), "alice");
}

#[tokio::test]
async fn test_admin_login_sets_role() {
    let ctx = TestContext::new().await;
    ctx.login_as("admin").await;

    let store = UserStore::new(ctx.client.clone());
    assert!(store.is_admin());
    assert_eq!(routes::guard(routes::ADMIN, store.session()), routes::GuardDecision::Proceed);
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let ctx = TestContext::new().await;
    let store = UserStore::new(ctx.client.clone());

    assert!(!store.login(&LoginParams::new("alice", "wrong")).await);
    assert!(!store.is_logged_in());
    assert_eq!(ctx.notifier.messages(ToastLevel::Error), vec!["密码不正确"]);
    assert!(!ctx.config.token_path().exists());
    assert!(!store.loading().is_loading());
}

#[tokio::test]
async fn test_unknown_user() {
    let ctx = TestContext::new().await;
    let store = UserStore::new(ctx.client.clone());

    assert!(!store.login(&LoginParams::new("nobody", "x")).await);
    assert!(ctx.notifier.contains("用户不存在"));
}

#[tokio::test]
async fn test_register_then_login() {
    let ctx = TestContext::new().await;
    let store = UserStore::new(ctx.client.clone());
    let params = RegisterParams {
        username: "bob".to_string(),
        password: "hunter22".to_string(),
        email: "bob@example.com".to_string(),
        phone: "13900000000".to_string(),
    };

    assert!(store.register(&params).await);
    assert!(ctx.notifier.contains("注册成功，请登录"));
    assert!(!store.is_logged_in());

    assert!(store.login(&LoginParams::new("bob", "hunter22")).await);
    assert_eq!(store.username(), "bob");

    // Registering the same name again is rejected by the server.
    ctx.notifier.clear();
    assert!(!store.register(&params).await);
    assert!(ctx.notifier.contains("用户名已存在"));
}

#[tokio::test]
async fn test_update_profile() {
    let ctx = TestContext::new().await;
    ctx.login_as("alice").await;
    let store = UserStore::new(ctx.client.clone());

    let changes = UpdateUserParams {
        address: Some("江苏省南京市鼓楼区汉口路22号".to_string()),
        ..UpdateUserParams::default()
    };
    assert!(store.update_profile(&changes).await);
    assert!(ctx.notifier.contains("个人信息更新成功"));

    let user = store.user().unwrap();
    assert_eq!(user.address.as_deref(), Some("江苏省南京市鼓楼区汉口路22号"));
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_revoked_token_expires_session() {
    let ctx = TestContext::new().await;
    ctx.login_as("alice").await;
    ctx.backend.state().with(|db| db.tokens.clear());

    let mut cart = CartStore::new(ctx.client.clone());
    assert!(!cart.fetch().await);

    assert!(!ctx.client.session().is_logged_in());
    assert!(!ctx.config.token_path().exists());
    assert!(ctx.notifier.contains("登录已过期，请重新登录"));
    assert_eq!(ctx.navigator.last().as_deref(), Some(routes::USER_LOGIN));
}

#[tokio::test]
async fn test_logout_removes_token_file() {
    let ctx = TestContext::new().await;
    ctx.login_as("alice").await;
    assert!(ctx.config.token_path().exists());

    let store = UserStore::new(ctx.client.clone());
    store.logout();

    assert!(!store.is_logged_in());
    assert!(!ctx.config.token_path().exists());
    assert!(ctx.notifier.contains("已退出登录"));
    assert!(!UserStore::new(ctx.reopen()).is_logged_in());
}

#[tokio::test]
async fn test_guard_redirects_guest_to_login() {
    let ctx = TestContext::new().await;
    let decision = routes::guard("/cart", ctx.client.session());
    assert_eq!(
        decision,
        routes::GuardDecision::Redirect(format!("{}?redirect=%2Fcart", routes::USER_LOGIN))
    );
}
