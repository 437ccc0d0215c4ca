//! Tomato Mall storefront client.
//!
//! A typed client for the bookstore REST API and the state stores a front
//! end builds on:
//!
//! - [`client::ApiClient`] sends requests through a [`transport::Transport`],
//!   unwraps the response envelope and reports failures
//! - [`services`] map each REST resource to typed calls
//! - [`stores`] keep the last server state per resource and reconcile it
//!   after mutations
//! - [`routes`] holds the route table and the navigation guard
//!
//! ```no_run
//! use tomato_storefront::{ApiClient, StorefrontConfig};
//! use tomato_storefront::models::LoginParams;
//! use tomato_storefront::stores::{ProductStore, UserStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::from_env()?;
//! let client = ApiClient::from_config(&config)?;
//!
//! let user = UserStore::new(client.clone());
//! user.login(&LoginParams::new("alice", "secret")).await;
//!
//! let mut products = ProductStore::new(client);
//! products.fetch_all().await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod navigator;
pub mod notify;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod stores;
pub mod transport;

pub use client::ApiClient;
pub use config::{ConfigError, StorefrontConfig};
pub use error::ClientError;
pub use session::Session;
