use tracing::{debug, info};

use crate::action::{ActionOptions, LoadingFlag, perform_async_action};
use crate::client::ApiClient;
use crate::models::{LoginParams, RegisterParams, UpdateUserParams, User};
use crate::services::UserService;
use crate::session::Session;

/// Login state and the user's profile.
///
/// Token and profile live in the shared [`Session`], so the API client sees
/// a login immediately and a 401 anywhere logs this store out too.
#[derive(Debug)]
pub struct UserStore {
    service: UserService,
    loading: LoadingFlag,
}

impl UserStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: UserService::new(client),
            loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.service.client().session()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session().is_logged_in()
    }

    /// `false` until the profile has been fetched.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session().is_admin()
    }

    /// Empty when no profile is loaded.
    #[must_use]
    pub fn username(&self) -> String {
        self.session().username()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.session().user()
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Log in, persist the token and load the profile.
    pub async fn login(&self, params: &LoginParams) -> bool {
        let options = ActionOptions::new("登录失败").quiet();
        let session = self.session();
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.login(params),
            |token| session.set_token(&token),
            &options,
        )
        .await;
        if ok {
            self.fetch_user_info().await;
            info!(username = %params.username, "Logged in");
            self.service.client().notifier().success("登录成功");
        }
        ok
    }

    pub async fn register(&self, params: &RegisterParams) -> bool {
        let options = ActionOptions::new("注册失败")
            .quiet()
            .created()
            .success_message("注册成功，请登录");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.register(params),
            |_| (),
            &options,
        )
        .await
    }

    /// Load the profile of the token's owner. Does nothing without a token;
    /// a rejected token has already been cleared by the client.
    pub async fn fetch_user_info(&self) -> bool {
        let session = self.session();
        if !session.is_logged_in() {
            debug!("No session token, skipping profile fetch");
            return false;
        }

        let options = ActionOptions::new("获取用户信息失败").quiet();
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.current_user(),
            |user| session.set_user(Some(user)),
            &options,
        )
        .await
    }

    pub async fn update_profile(&self, params: &UpdateUserParams) -> bool {
        let options = ActionOptions::new("更新用户信息失败")
            .quiet()
            .success_message("个人信息更新成功");
        let session = self.session();
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update_profile(params),
            |user| session.set_user(Some(user)),
            &options,
        )
        .await
    }

    /// Drop the token and profile, including the persisted token.
    pub fn logout(&self) {
        self.session().clear();
        info!("Logged out");
        self.service.client().notifier().success("已退出登录");
    }
}
