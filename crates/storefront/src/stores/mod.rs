//! Per-resource state that mirrors the server.
//!
//! A store owns its service and the last data the server returned. Actions
//! return `bool` (or the created value) and never an error: failures have
//! already been reported through the client's notifier. Local state only
//! changes after a successful response, by replacing a list, patching an
//! entry by id, removing by id, or refetching.

mod advertisement;
mod cart;
mod note;
mod order;
mod product;
mod review;
mod user;

pub use advertisement::AdvertisementStore;
pub use cart::CartStore;
pub use note::NoteStore;
pub use order::OrderStore;
pub use product::ProductStore;
pub use review::ReviewStore;
pub use user::UserStore;
