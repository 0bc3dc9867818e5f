//! Core domain logic for RememberWhen.
//! This crate is the single source of truth for business invariants.

pub mod backup;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod upcoming;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    parse_birthday, BirthdayParseError, Contact, ContactId, ContactValidationError,
};
pub use model::reminder::{ReminderOffset, REMINDER_OFFSETS};
pub use notify::gateway::{
    GatewayError, NotificationGateway, PermissionState, PushPayload, SubscriptionHandle,
    UnsupportedGateway,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{ContactDraft, ContactService, ContactServiceError};
pub use service::notification_service::{Notice, NotificationService};
pub use upcoming::projector::{
    format_occurrence, next_occurrence, upcoming_birthdays, UpcomingBirthday,
    DEFAULT_HORIZON_DAYS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
