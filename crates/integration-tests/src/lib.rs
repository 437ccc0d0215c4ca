//! End-to-end tests for the Tomato Mall storefront client.
//!
//! Each test starts a [`FakeBackend`] on an ephemeral port and drives the
//! real stores through the `reqwest` transport against it, so request
//! shapes, envelopes and status codes are exercised over actual HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tomato-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session` - Login, token persistence and expiry
//! - `shopping` - Catalog, cart, checkout and orders
//! - `notes` - Reading notes, feedback, comments and uploads

pub mod backend;

use std::sync::Arc;

use tempfile::TempDir;
use url::Url;

use tomato_storefront::navigator::MemoryNavigator;
use tomato_storefront::notify::MemoryNotifier;
use tomato_storefront::session::Session;
use tomato_storefront::storage::FileTokenStorage;
use tomato_storefront::transport::HttpTransport;
use tomato_storefront::{ApiClient, StorefrontConfig};

pub use backend::{FakeBackend, SEED_PASSWORD};

/// A client wired to a fake backend, with handles to what it reported.
pub struct TestContext {
    pub backend: FakeBackend,
    pub client: ApiClient,
    pub notifier: MemoryNotifier,
    pub navigator: MemoryNavigator,
    pub config: StorefrontConfig,
    data_dir: TempDir,
}

impl TestContext {
    /// Start a backend and build a client against it with an empty token
    /// directory.
    ///
    /// # Panics
    ///
    /// Panics if the backend or the client cannot be set up.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let backend = FakeBackend::start().await.unwrap();
        let data_dir = tempfile::tempdir().unwrap();

        let mut config = StorefrontConfig::new(Url::parse(backend.base_url()).unwrap());
        config.data_dir = data_dir.path().to_path_buf();

        let notifier = MemoryNotifier::new();
        let navigator = MemoryNavigator::new();
        let client = Self::build_client(&config, &notifier, &navigator);

        Self {
            backend,
            client,
            notifier,
            navigator,
            config,
            data_dir,
        }
    }

    /// A second client sharing the token directory, as a restarted front
    /// end would be.
    #[must_use]
    pub fn reopen(&self) -> ApiClient {
        Self::build_client(&self.config, &self.notifier, &self.navigator)
    }

    /// Log in as a seeded user through the user store.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_as(&self, username: &str) {
        let store = tomato_storefront::stores::UserStore::new(self.client.clone());
        let params = tomato_storefront::models::LoginParams::new(username, SEED_PASSWORD);
        assert!(store.login(&params).await, "login as {username} failed");
        self.notifier.clear();
    }

    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    #[allow(clippy::unwrap_used)]
    fn build_client(
        config: &StorefrontConfig,
        notifier: &MemoryNotifier,
        navigator: &MemoryNavigator,
    ) -> ApiClient {
        let transport = HttpTransport::new(config).unwrap();
        let session = Session::new(Arc::new(FileTokenStorage::new(config.token_path())));
        ApiClient::new(
            Arc::new(transport),
            session,
            Arc::new(notifier.clone()),
            Arc::new(navigator.clone()),
        )
    }
}
