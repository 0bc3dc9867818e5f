//! Backup file format: a JSON array of wire-format contacts.
//!
//! Backups written by any prior version import cleanly: the contact
//! deserializer accepts both plain ISO dates and the datetime strings old
//! exports stored for `birthday`.

use crate::model::contact::Contact;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXPORT_FILE_STEM: &str = "remember-when-contacts";

/// Import parse failure.
#[derive(Debug)]
pub enum BackupError {
    /// Payload is not parseable JSON.
    InvalidJson(serde_json::Error),
    /// Payload parses but the top level is not an array.
    NotAnArray,
    /// One record in the array is not a valid contact.
    InvalidRecord { index: usize, message: String },
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "backup is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "backup must be a JSON array of contacts"),
            Self::InvalidRecord { index, message } => {
                write!(f, "backup record {index} is invalid: {message}")
            }
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

/// Serializes the contact set for export.
pub fn to_json(contacts: &[Contact]) -> Result<String, BackupError> {
    serde_json::to_string_pretty(contacts).map_err(BackupError::InvalidJson)
}

/// Parses a backup payload into contacts.
///
/// Distinguishes malformed JSON, non-array payloads and invalid records
/// so each can surface its own notice.
pub fn parse(payload: &str) -> Result<Vec<Contact>, BackupError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(BackupError::InvalidJson)?;
    let items = value.as_array().ok_or(BackupError::NotAnArray)?;

    let mut contacts = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let contact = serde_json::from_value::<Contact>(item.clone()).map_err(|err| {
            BackupError::InvalidRecord {
                index,
                message: err.to_string(),
            }
        })?;
        contacts.push(contact);
    }
    Ok(contacts)
}

/// File name for an export created on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("{EXPORT_FILE_STEM}-{}.json", today.format("%Y-%m-%d"))
}
