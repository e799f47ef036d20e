//! Shopping cart store.
//!
//! An explicit store object holding the session's cart lines. Cloning a
//! `CartStore` shares the same state. Every mutation persists the full line
//! list through the injected storage backend; a failed write degrades to
//! in-memory state with a warning.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ownit_core::{Price, ProductId};

use crate::storage::{self, CART_KEY, StorageBackend};

/// A cart entry: a product reference with a quantity.
///
/// Invariant: one line per product id, `quantity >= 1`. A quantity update to
/// zero removes the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    /// Display label for a chosen variant, e.g. `Size: 7`.
    #[serde(default)]
    pub variant: Option<String>,
    pub quantity: u32,
}

/// Input for adding a product to the cart.
///
/// Carries no quantity: each add contributes one unit, incrementing the
/// existing line when the product is already in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineInput {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub variant: Option<String>,
}

struct CartInner {
    items: RwLock<Vec<CartItem>>,
    is_open: AtomicBool,
    storage: Arc<dyn StorageBackend>,
}

/// The session shopping cart.
///
/// Cheaply cloneable; all clones share the same lines and drawer flag.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl CartStore {
    /// Create a cart store over `storage`, restoring any persisted lines.
    ///
    /// Malformed or unreadable persisted state resets the cart to empty.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let items: Vec<CartItem> = storage::load_or_default(storage.as_ref(), CART_KEY);
        tracing::debug!(lines = items.len(), "Cart restored");

        Self {
            inner: Arc::new(CartInner {
                items: RwLock::new(items),
                is_open: AtomicBool::new(false),
                storage,
            }),
        }
    }

    /// Add one unit of a product.
    ///
    /// Inserts a new line, or increments the quantity of the existing line
    /// with the same product id.
    pub fn add(&self, input: CartLineInput) {
        self.mutate(|items| {
            match items.iter().position(|line| line.id == input.id) {
                Some(idx) => {
                    if let Some(line) = items.get_mut(idx) {
                        line.quantity += 1;
                    }
                }
                None => items.push(CartItem {
                    id: input.id,
                    name: input.name,
                    price: input.price,
                    image: input.image,
                    variant: input.variant,
                    quantity: 1,
                }),
            }
            true
        });
    }

    /// Set a line's quantity. A quantity of zero removes the line.
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&self, id: ProductId, quantity: u32) {
        self.mutate(|items| {
            if quantity == 0 {
                let before = items.len();
                items.retain(|line| line.id != id);
                return items.len() != before;
            }
            match items.iter_mut().find(|line| line.id == id) {
                Some(line) => {
                    line.quantity = quantity;
                    true
                }
                None => false,
            }
        });
    }

    /// Remove a line entirely.
    pub fn remove(&self, id: ProductId) {
        self.mutate(|items| {
            let before = items.len();
            items.retain(|line| line.id != id);
            items.len() != before
        });
    }

    /// Remove every line.
    pub fn clear(&self) {
        self.mutate(|items| {
            items.clear();
            true
        });
    }

    /// The cart subtotal: `sum(price x quantity)` across all lines.
    ///
    /// Recomputed on every read; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.read(|items| {
            items
                .iter()
                .map(|line| line.price.line_total(line.quantity))
                .sum()
        })
    }

    /// Total unit count across all lines (the navbar badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.read(|items| items.iter().map(|line| line.quantity).sum())
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(Vec::len)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(Vec::is_empty)
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read(Clone::clone)
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.is_open.load(Ordering::Relaxed)
    }

    /// Open or close the cart drawer.
    pub fn set_open(&self, open: bool) {
        self.inner.is_open.store(open, Ordering::Relaxed);
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<CartItem>) -> R) -> R {
        match self.inner.items.read() {
            Ok(items) => f(&items),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Apply a mutation and persist when it reports a change.
    fn mutate(&self, f: impl FnOnce(&mut Vec<CartItem>) -> bool) {
        let changed = match self.inner.items.write() {
            Ok(mut items) => {
                let changed = f(&mut items);
                if changed {
                    storage::persist(self.inner.storage.as_ref(), CART_KEY, &*items);
                }
                changed
            }
            Err(poisoned) => {
                let mut items = poisoned.into_inner();
                let changed = f(&mut items);
                if changed {
                    storage::persist(self.inner.storage.as_ref(), CART_KEY, &*items);
                }
                changed
            }
        };

        if changed {
            tracing::debug!(lines = self.len(), "Cart updated");
        }
    }
}
