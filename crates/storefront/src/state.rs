//! Application state shared across the storefront.

use std::sync::Arc;

use ownit_core::ProductId;

use crate::cart::{CartLineInput, CartStore};
use crate::catalog::Catalog;
use crate::checkout::{self, OrderConfirmation, PaymentMethod, ShippingDetails, ShippingMethod};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::notify::{Notifier, TracingNotifier};
use crate::storage::{FileStorage, StorageBackend};
use crate::wishlist::{WishlistItem, WishlistStore};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog and the session stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
    wishlist: WishlistStore,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create the application state with file-backed persistence under the
    /// configured data directory and a logging notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog document cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(&config.data_dir));
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        Self::with_parts(config, storage, notifier)
    }

    /// Create the application state with injected storage and notifier
    /// collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog document cannot be loaded.
    pub fn with_parts(
        config: StorefrontConfig,
        storage: Arc<dyn StorageBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let cart = CartStore::new(Arc::clone(&storage));
        let wishlist = WishlistStore::new(storage, Arc::clone(&notifier));

        tracing::info!(products = catalog.len(), "Storefront state initialized");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                wishlist,
                notifier,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` for an unknown product id.
    pub fn add_to_cart(&self, id: ProductId, variant: Option<String>) -> Result<()> {
        let product = self
            .inner
            .catalog
            .product_by_id(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

        self.inner.cart.add(CartLineInput {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            variant,
        });
        Ok(())
    }

    /// Toggle a catalog product's wishlist membership.
    ///
    /// Returns the resulting membership state.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` for an unknown product id.
    pub fn toggle_wishlist(&self, id: ProductId) -> Result<bool> {
        let product = self
            .inner
            .catalog
            .product_by_id(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;

        Ok(self.inner.wishlist.toggle(WishlistItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: Some(product.category.clone()),
        }))
    }

    /// Place an order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns a checkout error for an empty cart or incomplete shipping
    /// details.
    pub fn place_order(
        &self,
        details: &ShippingDetails,
        shipping: ShippingMethod,
        payment: PaymentMethod,
    ) -> Result<OrderConfirmation> {
        let confirmation = checkout::place_order(
            &self.inner.cart,
            details,
            shipping,
            payment,
            self.inner.notifier.as_ref(),
        )?;
        Ok(confirmation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;
    use crate::storage::MemoryStorage;
    use rust_decimal::Decimal;

    fn state() -> AppState {
        AppState::with_parts(
            StorefrontConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(NullNotifier),
        )
        .unwrap()
    }

    #[test]
    fn test_add_to_cart_resolves_product() {
        let state = state();
        state.add_to_cart(ProductId::new(1), None).unwrap();

        let items = state.cart().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Eternal Love Diamond Ring");
        assert_eq!(state.cart().total(), Decimal::from(4500));
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let state = state();
        let err = state.add_to_cart(ProductId::new(999), None).unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(_)));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_toggle_wishlist_resolves_product() {
        let state = state();
        assert!(state.toggle_wishlist(ProductId::new(6)).unwrap());
        assert!(state.wishlist().contains(ProductId::new(6)));
        assert!(!state.toggle_wishlist(ProductId::new(6)).unwrap());
        assert!(state.wishlist().is_empty());
    }

    #[test]
    fn test_clones_share_stores() {
        let state = state();
        let view = state.clone();
        state.add_to_cart(ProductId::new(2), None).unwrap();
        assert_eq!(view.cart().len(), 1);
    }
}
