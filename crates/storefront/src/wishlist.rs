//! Wishlist store.
//!
//! Set semantics keyed by product id: adding an existing item is a no-op,
//! toggling flips membership. State transitions are pure; the user-facing
//! "added"/"removed" messages go through the injected [`Notifier`] port so
//! the UI collaborator decides how (or whether) to show them.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use ownit_core::{Price, ProductId};

use crate::notify::{Notification, Notifier};
use crate::storage::{self, StorageBackend, WISHLIST_KEY};

/// A saved product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
}

struct WishlistInner {
    items: RwLock<Vec<WishlistItem>>,
    is_open: AtomicBool,
    storage: Arc<dyn StorageBackend>,
    notifier: Arc<dyn Notifier>,
}

/// The session wishlist.
///
/// Cheaply cloneable; all clones share the same items and drawer flag.
#[derive(Clone)]
pub struct WishlistStore {
    inner: Arc<WishlistInner>,
}

impl WishlistStore {
    /// Create a wishlist store over `storage`, restoring any persisted items.
    ///
    /// Malformed or unreadable persisted state resets the wishlist to empty.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let items: Vec<WishlistItem> = storage::load_or_default(storage.as_ref(), WISHLIST_KEY);
        tracing::debug!(items = items.len(), "Wishlist restored");

        Self {
            inner: Arc::new(WishlistInner {
                items: RwLock::new(items),
                is_open: AtomicBool::new(false),
                storage,
                notifier,
            }),
        }
    }

    /// Save an item. Idempotent: an id already present leaves the wishlist
    /// unchanged and sends no notification.
    pub fn add(&self, item: WishlistItem) {
        let name = item.name.clone();
        let inserted = self.mutate(|items| {
            if items.iter().any(|saved| saved.id == item.id) {
                return false;
            }
            items.push(item);
            true
        });

        if inserted {
            self.inner.notifier.notify(Notification::new(
                "Added to Wishlist",
                format!("{name} has been added to your wishlist."),
            ));
        }
    }

    /// Remove an item by id. Unknown ids are ignored.
    pub fn remove(&self, id: ProductId) {
        let removed = self.mutate(|items| {
            let before = items.len();
            items.retain(|saved| saved.id != id);
            items.len() != before
        });

        if removed {
            self.inner.notifier.notify(Notification::new(
                "Removed from Wishlist",
                "Item has been removed from your wishlist.",
            ));
        }
    }

    /// Membership test by product id.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.read(|items| items.iter().any(|saved| saved.id == id))
    }

    /// Flip membership: remove when present, add otherwise.
    ///
    /// Returns the resulting membership state.
    pub fn toggle(&self, item: WishlistItem) -> bool {
        if self.contains(item.id) {
            self.remove(item.id);
            false
        } else {
            self.add(item);
            true
        }
    }

    /// Number of saved items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.read(Vec::len)
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(Vec::is_empty)
    }

    /// Snapshot of the saved items.
    #[must_use]
    pub fn items(&self) -> Vec<WishlistItem> {
        self.read(Clone::clone)
    }

    /// Whether the wishlist drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.is_open.load(Ordering::Relaxed)
    }

    /// Open or close the wishlist drawer.
    pub fn set_open(&self, open: bool) {
        self.inner.is_open.store(open, Ordering::Relaxed);
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<WishlistItem>) -> R) -> R {
        match self.inner.items.read() {
            Ok(items) => f(&items),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Apply a mutation and persist when it reports a change.
    fn mutate(&self, f: impl FnOnce(&mut Vec<WishlistItem>) -> bool) -> bool {
        match self.inner.items.write() {
            Ok(mut items) => {
                let changed = f(&mut items);
                if changed {
                    storage::persist(self.inner.storage.as_ref(), WISHLIST_KEY, &*items);
                }
                changed
            }
            Err(poisoned) => {
                let mut items = poisoned.into_inner();
                let changed = f(&mut items);
                if changed {
                    storage::persist(self.inner.storage.as_ref(), WISHLIST_KEY, &*items);
                }
                changed
            }
        }
    }
}
