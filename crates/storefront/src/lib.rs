//! OwnIt Storefront library.
//!
//! The domain core of the OwnIt retail site: a static product catalog with
//! query helpers, plus cart and wishlist session stores persisted through an
//! injected storage port. Rendering, routing, and form handling live in the
//! UI layer and call into this crate.
//!
//! # Architecture
//!
//! - [`catalog`] - Immutable product data with filter/sort/search helpers
//! - [`cart`] / [`wishlist`] - Session stores with synchronous persistence
//! - [`checkout`] - Simulated order placement over the cart
//! - [`storage`] / [`notify`] - Injected side-effect ports
//! - [`state`] - `Arc`-shared composition root

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;
pub mod storage;
pub mod wishlist;
