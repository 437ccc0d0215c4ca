//! Tomato Mall Core - Shared types library.
//!
//! This crate provides common types used across all Tomato Mall components:
//! - `storefront` - REST client, services and state stores
//! - `cli` - Command-line front end for the storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and lookup tables - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, status enums, error codes and the
//!   response envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
