//! Unified error handling for the storefront.
//!
//! Provides a unified `StorefrontError` type so callers can hold one error
//! across catalog loading, configuration, persistence, and checkout. Lookups
//! (product by id, wishlist membership) return `Option`/`bool` and never pass
//! through here.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog document failed to load.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
