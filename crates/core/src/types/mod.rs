//! Core types for Tomato Mall.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod envelope;
pub mod error_code;
pub mod id;
pub mod price;
pub mod status;

pub use envelope::ApiResponse;
pub use error_code::{
    BusinessErrorCode, GENERIC_ERROR_MESSAGE, HttpStatus, is_success_code, resolve_error_message,
};
pub use id::*;
pub use price::Price;
pub use status::*;
