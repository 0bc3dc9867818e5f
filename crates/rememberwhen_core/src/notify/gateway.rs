//! Platform notification seam.
//!
//! The application only delegates here: the real work (worker lifecycle,
//! permission prompts, the push service) belongs to the hosting platform.
//! Core owns the contract so the settings flow and its tests stay
//! platform-free.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title substituted when a push payload carries none.
pub const DEFAULT_PUSH_TITLE: &str = "RememberWhen";
/// Body substituted when a push payload carries none.
pub const DEFAULT_PUSH_BODY: &str = "Dies ist eine Test-Benachrichtigung.";

/// Outcome of a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    /// Prompt dismissed without a decision.
    Default,
}

impl PermissionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
        }
    }
}

/// Opaque handle identifying an active push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionHandle {
    pub endpoint: String,
}

/// Payload delivered by the external push service.
///
/// Both fields are optional on the wire; [`PushPayload::resolve`]
/// substitutes the fixed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    /// Returns `(title, body)` with defaults filled in for absent fields.
    pub fn resolve(&self) -> (String, String) {
        (
            self.title
                .clone()
                .unwrap_or_else(|| DEFAULT_PUSH_TITLE.to_string()),
            self.body
                .clone()
                .unwrap_or_else(|| DEFAULT_PUSH_BODY.to_string()),
        )
    }
}

/// Failure reported by a gateway implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The platform has no notification support at all.
    Unsupported,
    Registration(String),
    Subscribe(String),
    Display(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "notifications are not supported on this platform"),
            Self::Registration(message) => write!(f, "worker registration failed: {message}"),
            Self::Subscribe(message) => write!(f, "push subscription failed: {message}"),
            Self::Display(message) => write!(f, "showing notification failed: {message}"),
        }
    }
}

impl Error for GatewayError {}

/// Platform operations the settings flow consumes.
pub trait NotificationGateway {
    /// Registers the background worker that receives pushes.
    fn register_worker(&mut self) -> Result<(), GatewayError>;

    /// Returns the subscription left behind by a previous session, if any.
    fn existing_subscription(&self) -> Option<SubscriptionHandle>;

    /// Prompts the user for notification permission.
    fn request_permission(&mut self) -> Result<PermissionState, GatewayError>;

    /// Subscribes to the push service. Requires granted permission.
    fn subscribe(&mut self) -> Result<SubscriptionHandle, GatewayError>;

    /// Shows a notification immediately.
    fn show_notification(&self, title: &str, body: &str) -> Result<(), GatewayError>;
}

/// Gateway for hosts without any notification capability.
///
/// Every operation fails with [`GatewayError::Unsupported`]; the settings
/// flow turns that into a user-visible notice.
#[derive(Debug, Default)]
pub struct UnsupportedGateway;

impl NotificationGateway for UnsupportedGateway {
    fn register_worker(&mut self) -> Result<(), GatewayError> {
        Err(GatewayError::Unsupported)
    }

    fn existing_subscription(&self) -> Option<SubscriptionHandle> {
        None
    }

    fn request_permission(&mut self) -> Result<PermissionState, GatewayError> {
        Err(GatewayError::Unsupported)
    }

    fn subscribe(&mut self) -> Result<SubscriptionHandle, GatewayError> {
        Err(GatewayError::Unsupported)
    }

    fn show_notification(&self, _title: &str, _body: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unsupported)
    }
}
