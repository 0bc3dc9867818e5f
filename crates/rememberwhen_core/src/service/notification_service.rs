//! Notification settings flow.
//!
//! # Responsibility
//! - Drive the enable/test notification flow against a
//!   [`NotificationGateway`] and track permission/subscription state.
//! - Map every gateway outcome to a user-visible notice; nothing here is
//!   fatal and nothing is retried.
//!
//! # Invariants
//! - Test notifications require an active subscription.
//! - A denied or dismissed permission prompt leaves the flow unsubscribed.

use crate::notify::gateway::{
    GatewayError, NotificationGateway, PermissionState, PushPayload, SubscriptionHandle,
};
use log::{info, warn};

/// Title of the user-triggered test notification.
pub const TEST_NOTIFICATION_TITLE: &str = "Test Notification";
/// Body of the user-triggered test notification.
pub const TEST_NOTIFICATION_BODY: &str = "This is a test notification from RememberWhen!";

/// User-visible feedback for a settings action (the toast analog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: Option<String>,
}

impl Notice {
    fn plain(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
        }
    }

    fn with_detail(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Settings-flow state machine over a platform gateway.
pub struct NotificationService<G: NotificationGateway> {
    gateway: G,
    permission: PermissionState,
    subscription: Option<SubscriptionHandle>,
}

impl<G: NotificationGateway> NotificationService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            permission: PermissionState::Default,
            subscription: None,
        }
    }

    /// Registers the background worker and adopts any subscription left
    /// behind by a previous session.
    pub fn initialize(&mut self) -> Result<(), GatewayError> {
        self.gateway.register_worker()?;
        self.subscription = self.gateway.existing_subscription();
        info!(
            "event=notify_init module=notify status=ok subscribed={}",
            self.subscription.is_some()
        );
        Ok(())
    }

    /// Last known permission prompt outcome.
    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    /// Whether an active push subscription exists.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Runs the enable flow: permission prompt, then subscription.
    ///
    /// Every outcome maps to a notice; failures leave prior state intact.
    pub fn enable(&mut self) -> Notice {
        let permission = match self.gateway.request_permission() {
            Ok(state) => state,
            Err(GatewayError::Unsupported) => {
                return Notice::plain("Notifications are not supported on this device.");
            }
            Err(err) => {
                warn!("event=notify_enable module=notify status=error error={err}");
                return Notice::with_detail("Couldn't request permission.", err.to_string());
            }
        };
        self.permission = permission;

        if permission != PermissionState::Granted {
            return Notice::with_detail(
                "Notification permission denied.",
                "You won't receive birthday reminders.",
            );
        }

        match self.gateway.subscribe() {
            Ok(handle) => {
                info!(
                    "event=notify_subscribe module=notify status=ok endpoint_len={}",
                    handle.endpoint.len()
                );
                self.subscription = Some(handle);
                Notice::with_detail(
                    "Notifications enabled!",
                    "You're all set to receive reminders.",
                )
            }
            Err(err) => {
                warn!("event=notify_subscribe module=notify status=error error={err}");
                Notice::with_detail("Couldn't subscribe to notifications.", "Please try again.")
            }
        }
    }

    /// Shows the fixed test notification through the gateway.
    pub fn send_test_notification(&self) -> Notice {
        if self.subscription.is_none() {
            return Notice::with_detail("Not Subscribed", "Please enable notifications first.");
        }

        match self
            .gateway
            .show_notification(TEST_NOTIFICATION_TITLE, TEST_NOTIFICATION_BODY)
        {
            Ok(()) => Notice::with_detail(
                "Test notification sent",
                "You should see a notification shortly.",
            ),
            Err(err) => {
                warn!("event=notify_test module=notify status=error error={err}");
                Notice::with_detail("Couldn't show the test notification.", err.to_string())
            }
        }
    }

    /// Displays an incoming push payload, substituting defaults for
    /// absent or unreadable fields.
    ///
    /// Mirrors the background worker's push handler: a payload that is
    /// not valid JSON degrades to the default title and body.
    pub fn handle_push(&self, raw_payload: Option<&str>) -> Result<(), GatewayError> {
        let payload = raw_payload
            .and_then(|raw| serde_json::from_str::<PushPayload>(raw).ok())
            .unwrap_or_default();
        let (title, body) = payload.resolve();
        self.gateway.show_notification(&title, &body)
    }
}
