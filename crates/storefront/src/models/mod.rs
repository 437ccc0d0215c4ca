//! Wire models for the bookstore REST API.
//!
//! Field names follow the server's `camelCase` JSON. Identifiers are assigned
//! by the server; fields that are absent on create payloads are `Option`.

pub mod advertisement;
pub mod cart;
pub mod note;
pub mod order;
pub mod product;
pub mod review;
pub mod timestamp;
pub mod user;

pub use advertisement::Advertisement;
pub use cart::{CartAddParams, CartItem, CartList, Checkout, QuantityUpdate};
pub use note::{Note, NoteComment, NoteCommentParams, NoteFeedbackParams, NoteParams};
pub use order::{Order, Payment};
pub use product::{Product, Specification, Stockpile, StockpileParams};
pub use review::{Review, ReviewParams};
pub use user::{LoginParams, RegisterParams, UpdateUserParams, User};
