//! Next-occurrence computation and horizon filtering.
//!
//! # Invariants
//! - A birthday occurring today counts as upcoming with `days_until == 0`.
//! - Output is sorted ascending by occurrence date; ties keep input order.
//! - Feb 29 birthdays occur on Mar 1 in non-leap years.

use crate::model::contact::Contact;
use chrono::{Datelike, NaiveDate};

/// Day-window used by the dashboard view.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// One projected birthday occurrence within the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub contact: Contact,
    /// Concrete calendar date the birthday next falls on.
    pub occurs_on: NaiveDate,
    /// Whole days from `today` to `occurs_on`; zero means today.
    pub days_until: i64,
    /// Age the contact turns on `occurs_on`.
    pub turns: i32,
}

/// Returns the earliest date >= `today` sharing the birthday's month and
/// day.
///
/// If this year's month/day has already passed, the occurrence moves to
/// next year. Feb 29 birthdays map to Mar 1 in non-leap target years,
/// matching how the app has always rolled the date over.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = occurrence_in_year(birthday, today.year());
    if this_year < today {
        occurrence_in_year(birthday, today.year() + 1)
    } else {
        this_year
    }
}

/// Projects contacts onto their next birthday occurrence within
/// `horizon_days` (inclusive), sorted ascending by occurrence date.
///
/// The sort is stable: contacts sharing an occurrence date stay in input
/// order.
pub fn upcoming_birthdays(
    contacts: &[Contact],
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<UpcomingBirthday> {
    let mut upcoming: Vec<UpcomingBirthday> = contacts
        .iter()
        .map(|contact| {
            let occurs_on = next_occurrence(contact.birthday, today);
            UpcomingBirthday {
                turns: occurs_on.year() - contact.birthday.year(),
                days_until: (occurs_on - today).num_days(),
                occurs_on,
                contact: contact.clone(),
            }
        })
        .filter(|entry| entry.days_until >= 0 && entry.days_until <= i64::from(horizon_days))
        .collect();

    upcoming.sort_by_key(|entry| entry.occurs_on);
    upcoming
}

/// Display text for an occurrence date: "Today!", "Tomorrow", or
/// "on <Month Day>".
pub fn format_occurrence(occurs_on: NaiveDate, today: NaiveDate) -> String {
    match (occurs_on - today).num_days() {
        0 => "Today!".to_string(),
        1 => "Tomorrow".to_string(),
        _ => format!("on {} {}", occurs_on.format("%B"), occurs_on.day()),
    }
}

fn occurrence_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day()) {
        Some(date) => date,
        // Only Feb 29 can fail to exist in a target year; Mar 1 always
        // exists, so the fallback never triggers.
        None => NaiveDate::from_ymd_opt(year, 3, 1).unwrap_or(birthday),
    }
}
