//! OwnIt Core - Shared types library.
//!
//! This crate provides common types used across all OwnIt components:
//! - `storefront` - Catalog, cart, and wishlist state for the retail site
//! - `integration-tests` - End-to-end flows over the public API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no UI concerns. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and decimal prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
