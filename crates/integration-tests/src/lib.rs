//! Integration tests for OwnIt.
//!
//! End-to-end flows over the public storefront API: browse the catalog, fill
//! the cart, toggle the wishlist, and place an order, with state persisted to
//! a throwaway data directory and reloaded by a second session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ownit-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::{Arc, Mutex};

use ownit_storefront::config::StorefrontConfig;
use ownit_storefront::notify::{Notification, Notifier};
use ownit_storefront::state::AppState;
use ownit_storefront::storage::FileStorage;

/// Notifier that records every message for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Titles of all notifications sent so far, in order.
    pub fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .map(|sent| sent.iter().map(|n| n.title.clone()).collect())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

/// A storefront session over a throwaway data directory.
pub struct TestContext {
    pub state: AppState,
    pub notifier: Arc<RecordingNotifier>,
    dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a fresh session with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or state cannot be created.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("create temp dir");
        let (state, notifier) = session(dir.path());
        Self {
            state,
            notifier,
            dir,
        }
    }

    /// Start a second session over the same data directory, as a browser
    /// reload would.
    #[must_use]
    pub fn reload(&self) -> (AppState, Arc<RecordingNotifier>) {
        session(self.dir.path())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn session(data_dir: &Path) -> (AppState, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        ..StorefrontConfig::default()
    };
    let state = AppState::with_parts(
        config,
        Arc::new(FileStorage::new(data_dir)),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    )
    .expect("initialize state");
    (state, notifier)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ownit_storefront=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
