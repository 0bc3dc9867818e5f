//! Reminder offset vocabulary.
//!
//! A closed, ordered set of lead times a user can pick per contact. The
//! offsets are descriptive metadata only: they are stored on the contact
//! and rendered as labels/badges, but no component evaluates them against
//! the clock.

use serde::{Deserialize, Serialize};

/// All selectable offsets in canonical display order.
pub const REMINDER_OFFSETS: [ReminderOffset; 3] = [
    ReminderOffset::OneDay,
    ReminderOffset::ThreeDays,
    ReminderOffset::OneWeek,
];

/// Lead time before a birthday at which the user wants a reminder.
///
/// Wire tokens (`1_day`, `3_days`, `1_week`) match the storage and backup
/// format of existing installations and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReminderOffset {
    #[serde(rename = "1_day")]
    OneDay,
    #[serde(rename = "3_days")]
    ThreeDays,
    #[serde(rename = "1_week")]
    OneWeek,
}

impl ReminderOffset {
    /// Human-readable label shown in the form and on contact badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 Tag vorher",
            Self::ThreeDays => "3 Tage vorher",
            Self::OneWeek => "1 Woche vorher",
        }
    }

    /// Number of days before the occurrence this offset describes.
    pub fn days_before(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::OneWeek => 7,
        }
    }

    /// Stable token used in storage columns and JSON backups.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::OneDay => "1_day",
            Self::ThreeDays => "3_days",
            Self::OneWeek => "1_week",
        }
    }

    /// Parses a wire token back into an offset.
    pub fn parse_wire(value: &str) -> Option<Self> {
        match value {
            "1_day" => Some(Self::OneDay),
            "3_days" => Some(Self::ThreeDays),
            "1_week" => Some(Self::OneWeek),
            _ => None,
        }
    }

    /// Normalizes a user selection into canonical order without duplicates.
    ///
    /// Selection order and repeated picks carry no meaning, so persistence
    /// always stores the normalized form.
    pub fn normalize(mut offsets: Vec<Self>) -> Vec<Self> {
        offsets.sort();
        offsets.dedup();
        offsets
    }
}
