//! Notification port for user-facing messages.
//!
//! Stores stay pure: they decide *that* something is worth telling the user
//! and hand the message to an injected collaborator. The UI layer owns how a
//! notification is rendered (toast, banner, nothing at all).

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Create a notification.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Receiver for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that logs each message at info level.
///
/// The default when no UI collaborator is wired up.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            "notification"
        );
    }
}

/// Notifier that drops every message.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::RecordingNotifier;
    use super::*;

    #[test]
    fn test_recording_notifier_captures_messages() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Notification::new("Added to Wishlist", "Ring added."));
        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.titles(), vec!["Added to Wishlist".to_string()]);
    }

    #[test]
    fn test_null_notifier_is_silent() {
        NullNotifier.notify(Notification::new("ignored", "ignored"));
    }
}
