//! One thin service per REST resource.
//!
//! Services only build requests and decode envelopes; they hold no state.
//! Error side effects (toasts, logout on 401) happen in [`ApiClient`].
//!
//! # Services
//!
//! - [`UserService`] - `/user` login, registration, profile
//! - [`ProductService`] - `/products` catalog and stockpile
//! - [`CartService`] - `/cart` lines and checkout
//! - [`OrderService`] - `/orders` details, payment, cancellation
//! - [`ReviewService`] - `/reviews`
//! - [`NoteService`] - `/notes`, feedback and comments
//! - [`AdvertisementService`] - `/advertisements`
//! - [`UploadService`] - `/upload` multipart image uploads
//!
//! [`ApiClient`]: crate::client::ApiClient

mod advertisement;
mod cart;
mod note;
mod order;
mod product;
mod review;
mod upload;
mod user;

pub use advertisement::AdvertisementService;
pub use cart::CartService;
pub use note::NoteService;
pub use order::OrderService;
pub use product::ProductService;
pub use review::ReviewService;
pub use upload::{DEFAULT_IMAGE_FOLDER, UploadService};
pub use user::UserService;

/// Payload of endpoints that only acknowledge (delete, add to cart, ...).
pub type Ack = serde_json::Value;
