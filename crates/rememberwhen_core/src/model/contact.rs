//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record the app stores and renders.
//! - Provide form-time validation rules for name and birthday input.
//!
//! # Invariants
//! - `id` is stable, unique and never nil.
//! - `birthday` carries calendar-date precision only; time-of-day is
//!   never stored.
//! - Wire format uses camelCase keys and ISO-8601 birthday text so old
//!   JSON backups keep importing.

use crate::model::reminder::ReminderOffset;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a contact record.
pub type ContactId = Uuid;

/// Minimum number of characters (after trimming) for a contact name.
pub const MIN_NAME_CHARS: usize = 2;

/// Earliest birthday the form accepts.
pub fn earliest_supported_birthday() -> NaiveDate {
    // 1900-01-01 is always a valid calendar date.
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable unique ID, assigned at creation, immutable afterwards.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Calendar date of birth, serialized as `YYYY-MM-DD`.
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDate,
    /// Selected reminder offsets; set semantics, stored normalized.
    pub reminders: Vec<ReminderOffset>,
    /// Optional avatar (data URL or remote URL), purely presentational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Form-time validation failure for contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// The nil UUID is reserved and never a valid contact ID.
    NilId,
    /// Name shorter than [`MIN_NAME_CHARS`] after trimming.
    NameTooShort { chars: usize },
    /// Birthday lies after today.
    BirthdayInFuture { birthday: NaiveDate, today: NaiveDate },
    /// Birthday lies before the supported range.
    BirthdayTooEarly { birthday: NaiveDate },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "contact id must not be the nil uuid"),
            Self::NameTooShort { chars } => write!(
                f,
                "name must be at least {MIN_NAME_CHARS} characters, got {chars}"
            ),
            Self::BirthdayInFuture { birthday, today } => {
                write!(f, "birthday {birthday} is after today ({today})")
            }
            Self::BirthdayTooEarly { birthday } => write!(
                f,
                "birthday {birthday} is before {}",
                earliest_supported_birthday()
            ),
        }
    }
}

impl Error for ContactValidationError {}

/// Failure to interpret stored or imported birthday text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayParseError {
    pub raw: String,
}

impl Display for BirthdayParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid birthday value `{}`", self.raw)
    }
}

impl Error for BirthdayParseError {}

impl Contact {
    /// Creates a contact with a freshly generated ID.
    pub fn new(
        name: impl Into<String>,
        birthday: NaiveDate,
        reminders: Vec<ReminderOffset>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            birthday,
            reminders: ReminderOffset::normalize(reminders),
            avatar_url: None,
        }
    }

    /// Creates a contact with a caller-provided stable ID.
    ///
    /// Used by edit and import paths where identity already exists.
    pub fn with_id(
        id: ContactId,
        name: impl Into<String>,
        birthday: NaiveDate,
        reminders: Vec<ReminderOffset>,
    ) -> Result<Self, ContactValidationError> {
        if id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        Ok(Self {
            id,
            name: name.into(),
            birthday,
            reminders: ReminderOffset::normalize(reminders),
            avatar_url: None,
        })
    }

    /// Checks form-level input rules against the provided current date.
    ///
    /// The store deliberately does not re-run these rules; they gate the
    /// form submission path only.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ContactValidationError> {
        if self.id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        let chars = self.name.trim().chars().count();
        if chars < MIN_NAME_CHARS {
            return Err(ContactValidationError::NameTooShort { chars });
        }
        if self.birthday > today {
            return Err(ContactValidationError::BirthdayInFuture {
                birthday: self.birthday,
                today,
            });
        }
        if self.birthday < earliest_supported_birthday() {
            return Err(ContactValidationError::BirthdayTooEarly {
                birthday: self.birthday,
            });
        }
        Ok(())
    }
}

/// Parses birthday text from storage, backups or form input.
///
/// Accepts plain ISO-8601 dates (`1995-07-20`) as well as full datetime
/// strings (`1995-07-20T00:00:00.000Z`) left behind by older backups that
/// serialized platform date objects.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, BirthdayParseError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    Err(BirthdayParseError {
        raw: raw.to_string(),
    })
}

fn deserialize_birthday<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_birthday(&raw).map_err(serde::de::Error::custom)
}
