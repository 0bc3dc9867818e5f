//! FFI use-case API for the Flutter-facing UI shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Carry user-facing notice text and refreshed list state in every
//!   mutation envelope so the UI cache never drifts from the store.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens its own connection and performs one read or write.

use chrono::Local;
use log::warn;
use rememberwhen_core::backup::json as backup;
use rememberwhen_core::db::open_db;
use rememberwhen_core::{
    core_version as core_version_inner, format_occurrence, init_logging as init_logging_inner,
    parse_birthday, ping as ping_inner, upcoming_birthdays, Contact, ContactDraft, ContactId,
    ContactService, NotificationService, ReminderOffset, SqliteContactRepository,
    UnsupportedGateway, DEFAULT_HORIZON_DAYS,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const APP_DB_FILE_NAME: &str = "rememberwhen.sqlite3";
const HORIZON_MAX_DAYS: u32 = 366;

static APP_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static NOTIFICATIONS: OnceLock<Mutex<NotificationService<UnsupportedGateway>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Contact projection rendered by the list and cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    /// Stable contact ID in string form.
    pub id: String,
    pub name: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    pub birthday: String,
    /// Reminder offset wire tokens in canonical order.
    pub reminders: Vec<String>,
    /// Display labels matching `reminders` one-to-one.
    pub reminder_labels: Vec<String>,
    pub avatar_url: Option<String>,
}

/// Mutation envelope: outcome, notice text, and the refreshed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMutationResponse {
    pub ok: bool,
    /// ID of the affected contact, when the operation targeted one.
    pub contact_id: Option<String>,
    /// Human-readable notice for the UI toast.
    pub message: String,
    /// Full store state after the mutation (empty on failure).
    pub contacts: Vec<ContactView>,
}

impl ContactMutationResponse {
    fn success(message: impl Into<String>, contact_id: Option<String>, contacts: Vec<ContactView>) -> Self {
        Self {
            ok: true,
            contact_id,
            message: message.into(),
            contacts,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            message: message.into(),
            contacts: Vec::new(),
        }
    }
}

/// List envelope for the contact overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub ok: bool,
    pub contacts: Vec<ContactView>,
    pub message: String,
}

/// One upcoming birthday entry for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingItem {
    pub contact: ContactView,
    /// ISO-8601 occurrence date.
    pub occurs_on: String,
    pub days_until: i64,
    /// Age reached on the occurrence.
    pub turns: i32,
    /// "Today!", "Tomorrow" or "on <Month Day>".
    pub headline: String,
}

/// Envelope for the upcoming-birthdays view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingResponse {
    pub ok: bool,
    pub items: Vec<UpcomingItem>,
    pub message: String,
}

/// Envelope for a backup export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupExportResponse {
    pub ok: bool,
    /// Suggested download file name, dated with today.
    pub file_name: String,
    /// Backup payload (JSON array of contacts).
    pub payload: String,
    pub message: String,
}

/// Notification permission/subscription snapshot for the settings sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationStatusResponse {
    /// `granted`, `denied` or `default`.
    pub permission: String,
    pub subscribed: bool,
}

/// Toast-style notice returned by settings actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeResponse {
    pub title: String,
    pub detail: Option<String>,
}

/// One selectable reminder offset for the form's multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderOptionView {
    /// Stable wire token (`1_day`, `3_days`, `1_week`).
    pub token: String,
    /// Display label.
    pub label: String,
    pub days_before: u32,
}

/// The closed reminder vocabulary, in canonical display order.
///
/// # FFI contract
/// - Sync call, non-blocking, constant output.
/// - Never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_options() -> Vec<ReminderOptionView> {
    rememberwhen_core::REMINDER_OFFSETS
        .iter()
        .map(|offset| ReminderOptionView {
            token: offset.as_wire().to_string(),
            label: offset.label().to_string(),
            days_before: offset.days_before(),
        })
        .collect()
}

/// Saves a contact from the form: create when `id` is empty, full
/// replacement edit otherwise.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Validation failures return `ok=false` with an inline-able message.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_save(
    id: Option<String>,
    name: String,
    birthday: String,
    reminders: Vec<String>,
    avatar_url: Option<String>,
) -> ContactMutationResponse {
    let id = match id.as_deref().map(parse_contact_id).transpose() {
        Ok(value) => value,
        Err(message) => return ContactMutationResponse::failure(message),
    };
    let is_edit = id.is_some();
    let birthday = match parse_birthday(&birthday) {
        Ok(date) => date,
        Err(err) => return ContactMutationResponse::failure(err.to_string()),
    };
    let reminders = match parse_reminder_tokens(&reminders) {
        Ok(offsets) => offsets,
        Err(message) => return ContactMutationResponse::failure(message),
    };

    let draft = ContactDraft {
        id,
        name,
        birthday,
        reminders,
        avatar_url,
    };

    let result = with_contact_service(|service| {
        let saved = service.save_contact(draft, Local::now().date_naive())?;
        let contacts = service.list_contacts()?;
        Ok((saved, contacts))
    });

    match result {
        Ok((saved, contacts)) => {
            let message = if is_edit {
                format!("{}'s details have been updated.", saved.name)
            } else {
                format!("{} has been added to your list.", saved.name)
            };
            ContactMutationResponse::success(
                message,
                Some(saved.id.to_string()),
                contacts.iter().map(to_contact_view).collect(),
            )
        }
        Err(err) => ContactMutationResponse::failure(format!("contact_save failed: {err}")),
    }
}

/// Deletes a contact by ID. Deleting an absent ID succeeds as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: String) -> ContactMutationResponse {
    let id = match parse_contact_id(&id) {
        Ok(value) => value,
        Err(message) => return ContactMutationResponse::failure(message),
    };

    let result = with_contact_service(|service| {
        let existing = service.get_contact(id)?;
        let removed = service.delete_contact(id)?;
        let contacts = service.list_contacts()?;
        Ok((existing, removed, contacts))
    });

    match result {
        Ok((existing, removed, contacts)) => {
            let message = match (removed, existing) {
                (true, Some(contact)) => format!("{} has been removed.", contact.name),
                _ => "Contact was already removed.".to_string(),
            };
            ContactMutationResponse::success(
                message,
                Some(id.to_string()),
                contacts.iter().map(to_contact_view).collect(),
            )
        }
        Err(err) => ContactMutationResponse::failure(format!("contact_delete failed: {err}")),
    }
}

/// Lists all stored contacts in display order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list() -> ContactListResponse {
    match with_contact_service(|service| service.list_contacts()) {
        Ok(contacts) => ContactListResponse {
            ok: true,
            message: format!("{} contact(s).", contacts.len()),
            contacts: contacts.iter().map(to_contact_view).collect(),
        },
        Err(err) => ContactListResponse {
            ok: false,
            contacts: Vec::new(),
            message: format!("contacts_list failed: {err}"),
        },
    }
}

/// Projects upcoming birthdays within `horizon_days` (default 30).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Items are sorted ascending by occurrence date.
#[flutter_rust_bridge::frb(sync)]
pub fn upcoming_list(horizon_days: Option<u32>) -> UpcomingResponse {
    let horizon = horizon_days
        .unwrap_or(DEFAULT_HORIZON_DAYS)
        .min(HORIZON_MAX_DAYS);
    let today = Local::now().date_naive();

    match with_contact_service(|service| service.list_contacts()) {
        Ok(contacts) => {
            let items: Vec<UpcomingItem> = upcoming_birthdays(&contacts, today, horizon)
                .into_iter()
                .map(|entry| UpcomingItem {
                    headline: format_occurrence(entry.occurs_on, today),
                    contact: to_contact_view(&entry.contact),
                    occurs_on: entry.occurs_on.format("%Y-%m-%d").to_string(),
                    days_until: entry.days_until,
                    turns: entry.turns,
                })
                .collect();
            UpcomingResponse {
                message: format!("{} upcoming birthday(s).", items.len()),
                ok: true,
                items,
            }
        }
        Err(err) => UpcomingResponse {
            ok: false,
            items: Vec::new(),
            message: format!("upcoming_list failed: {err}"),
        },
    }
}

/// Serializes the stored contacts into a dated backup download.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn backup_export() -> BackupExportResponse {
    let today = Local::now().date_naive();
    let result = with_contact_service(|service| {
        let contacts = service.list_contacts()?;
        Ok(contacts)
    });

    let contacts = match result {
        Ok(contacts) => contacts,
        Err(err) => {
            return BackupExportResponse {
                ok: false,
                file_name: String::new(),
                payload: String::new(),
                message: format!("backup_export failed: {err}"),
            };
        }
    };

    match backup::to_json(&contacts) {
        Ok(payload) => BackupExportResponse {
            ok: true,
            file_name: backup::export_file_name(today),
            payload,
            message: format!("Exported {} contact(s).", contacts.len()),
        },
        Err(err) => BackupExportResponse {
            ok: false,
            file_name: String::new(),
            payload: String::new(),
            message: format!("backup_export failed: {err}"),
        },
    }
}

/// Imports a backup payload, atomically replacing the stored set.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Malformed payloads leave the store untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn backup_import(payload: String) -> ContactMutationResponse {
    let imported = match backup::parse(&payload) {
        Ok(contacts) => contacts,
        Err(err) => {
            warn!("event=backup_import module=ffi status=error error={err}");
            return ContactMutationResponse::failure(err.to_string());
        }
    };

    let result = with_contact_service(|service| {
        let count = service.import_contacts(&imported)?;
        let contacts = service.list_contacts()?;
        Ok((count, contacts))
    });

    match result {
        Ok((count, contacts)) => ContactMutationResponse::success(
            format!("Imported {count} contact(s)."),
            None,
            contacts.iter().map(to_contact_view).collect(),
        ),
        Err(err) => ContactMutationResponse::failure(format!("backup_import failed: {err}")),
    }
}

/// Snapshot of notification permission and subscription state.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_status() -> NotificationStatusResponse {
    match notification_state().lock() {
        Ok(service) => NotificationStatusResponse {
            permission: service.permission().as_str().to_string(),
            subscribed: service.is_subscribed(),
        },
        Err(_) => NotificationStatusResponse {
            permission: "default".to_string(),
            subscribed: false,
        },
    }
}

/// Runs the enable-notifications flow (permission prompt, subscription).
///
/// # FFI contract
/// - Sync call.
/// - Never panics; failures come back as notices.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_enable() -> NoticeResponse {
    match notification_state().lock() {
        Ok(mut service) => to_notice_response(service.enable()),
        Err(_) => NoticeResponse {
            title: "Notification state is unavailable.".to_string(),
            detail: None,
        },
    }
}

/// Shows the fixed test notification.
///
/// # FFI contract
/// - Sync call.
/// - Never panics; failures come back as notices.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_send_test() -> NoticeResponse {
    match notification_state().lock() {
        Ok(service) => to_notice_response(service.send_test_notification()),
        Err(_) => NoticeResponse {
            title: "Notification state is unavailable.".to_string(),
            detail: None,
        },
    }
}

fn notification_state() -> &'static Mutex<NotificationService<UnsupportedGateway>> {
    NOTIFICATIONS.get_or_init(|| {
        let mut service = NotificationService::new(UnsupportedGateway);
        // Hosts without notification support simply stay unsubscribed.
        let _ = service.initialize();
        Mutex::new(service)
    })
}

fn to_notice_response(notice: rememberwhen_core::Notice) -> NoticeResponse {
    NoticeResponse {
        title: notice.title,
        detail: notice.detail,
    }
}

fn parse_contact_id(raw: &str) -> Result<ContactId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid contact id `{raw}`"))
}

fn parse_reminder_tokens(tokens: &[String]) -> Result<Vec<ReminderOffset>, String> {
    tokens
        .iter()
        .map(|token| {
            ReminderOffset::parse_wire(token)
                .ok_or_else(|| format!("unknown reminder offset `{token}`"))
        })
        .collect()
}

fn resolve_app_db_path() -> PathBuf {
    APP_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("REMEMBERWHEN_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(APP_DB_FILE_NAME)
        })
        .clone()
}

fn with_contact_service<T>(
    f: impl FnOnce(&ContactService<SqliteContactRepository<'_>>) -> Result<T, rememberwhen_core::ContactServiceError>,
) -> Result<T, String> {
    let db_path = resolve_app_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("app DB open failed: {err}"))?;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| format!("app repo init failed: {err}"))?;
    let service = ContactService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_contact_view(contact: &Contact) -> ContactView {
    ContactView {
        id: contact.id.to_string(),
        name: contact.name.clone(),
        birthday: contact.birthday.format("%Y-%m-%d").to_string(),
        reminders: contact
            .reminders
            .iter()
            .map(|offset| offset.as_wire().to_string())
            .collect(),
        reminder_labels: contact
            .reminders
            .iter()
            .map(|offset| offset.label().to_string())
            .collect(),
        avatar_url: contact.avatar_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        contact_delete, contact_save, contacts_list, core_version, init_logging,
        notification_send_test, notification_status, notifications_enable, ping, reminder_options,
        upcoming_list,
    };
    use chrono::{Datelike, Local};
    use rememberwhen_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn reminder_options_expose_the_whole_vocabulary_in_order() {
        let options = reminder_options();
        let tokens: Vec<&str> = options.iter().map(|option| option.token.as_str()).collect();
        assert_eq!(tokens, ["1_day", "3_days", "1_week"]);
        assert_eq!(options[0].label, "1 Tag vorher");
        assert_eq!(options[2].days_before, 7);
    }

    #[test]
    fn contact_save_then_list_roundtrip() {
        let name = unique_token("save-roundtrip");
        let saved = contact_save(
            None,
            name.clone(),
            "1995-07-20".to_string(),
            vec!["1_week".to_string(), "1_day".to_string()],
            None,
        );
        assert!(saved.ok, "{}", saved.message);
        let contact_id = saved.contact_id.clone().expect("save should return id");
        assert!(saved.message.contains("added"));

        let listed = contacts_list();
        assert!(listed.ok, "{}", listed.message);
        let found = listed
            .contacts
            .iter()
            .find(|view| view.id == contact_id)
            .expect("saved contact should be listed");
        assert_eq!(found.name, name);
        assert_eq!(found.birthday, "1995-07-20");
        // Normalized into canonical order.
        assert_eq!(found.reminders, ["1_day", "1_week"]);
        assert_eq!(found.reminder_labels, ["1 Tag vorher", "1 Woche vorher"]);
    }

    #[test]
    fn contact_save_persists_to_the_store() {
        let name = unique_token("save-persists");
        let saved = contact_save(
            None,
            name.clone(),
            "1988-12-15".to_string(),
            vec!["3_days".to_string()],
            None,
        );
        assert!(saved.ok, "{}", saved.message);
        let contact_id = saved.contact_id.expect("save should return id");

        let conn = open_db(super::resolve_app_db_path()).expect("open db");
        let (stored_name, birthday, reminders): (String, String, String) = conn
            .query_row(
                "SELECT name, birthday, reminders FROM contacts WHERE id = ?1",
                [contact_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("query contact row");
        assert_eq!(stored_name, name);
        assert_eq!(birthday, "1988-12-15");
        assert_eq!(reminders, "[\"3_days\"]");
    }

    #[test]
    fn contact_save_rejects_short_name() {
        let response = contact_save(
            None,
            "J".to_string(),
            "1995-07-20".to_string(),
            vec![],
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("at least 2 characters"));
    }

    #[test]
    fn contact_save_rejects_unknown_reminder_token() {
        let response = contact_save(
            None,
            unique_token("bad-reminder"),
            "1995-07-20".to_string(),
            vec!["2_weeks".to_string()],
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("2_weeks"));
    }

    #[test]
    fn contact_delete_is_a_noop_for_absent_ids() {
        let name = unique_token("delete-noop");
        let saved = contact_save(None, name, "1995-07-20".to_string(), vec![], None);
        assert!(saved.ok, "{}", saved.message);
        let contact_id = saved.contact_id.expect("save should return id");

        let first = contact_delete(contact_id.clone());
        assert!(first.ok, "{}", first.message);
        assert!(first.message.contains("has been removed"));

        let second = contact_delete(contact_id);
        assert!(second.ok, "{}", second.message);
        assert!(second.message.contains("already removed"));
    }

    #[test]
    fn upcoming_list_flags_todays_birthday() {
        let today = Local::now().date_naive();
        // Year 2000 is a leap year, so any month/day of a real today exists.
        let birthday = format!("2000-{:02}-{:02}", today.month(), today.day());

        let name = unique_token("upcoming-today");
        let saved = contact_save(None, name, birthday, vec!["1_day".to_string()], None);
        assert!(saved.ok, "{}", saved.message);
        let contact_id = saved.contact_id.expect("save should return id");

        let response = upcoming_list(Some(0));
        assert!(response.ok, "{}", response.message);
        let entry = response
            .items
            .iter()
            .find(|item| item.contact.id == contact_id)
            .expect("today's birthday should be in the horizon");
        assert_eq!(entry.days_until, 0);
        assert_eq!(entry.headline, "Today!");
    }

    #[test]
    fn notification_flow_degrades_gracefully_without_platform_support() {
        let status = notification_status();
        assert_eq!(status.permission, "default");
        assert!(!status.subscribed);

        let enable = notifications_enable();
        assert_eq!(enable.title, "Notifications are not supported on this device.");

        let test = notification_send_test();
        assert_eq!(test.title, "Not Subscribed");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
