use chrono::NaiveDate;
use rememberwhen_core::{
    format_occurrence, next_occurrence, upcoming_birthdays, Contact, ReminderOffset,
    DEFAULT_HORIZON_DAYS,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn contact(name: &str, birthday: NaiveDate) -> Contact {
    Contact::new(name, birthday, vec![ReminderOffset::OneDay])
}

#[test]
fn occurrence_within_horizon_is_projected_into_current_year() {
    let today = date(2024, 1, 10);
    let contacts = vec![
        contact("In window", date(1990, 2, 5)),
        contact("Out of window", date(1985, 6, 1)),
    ];

    let upcoming = upcoming_birthdays(&contacts, today, DEFAULT_HORIZON_DAYS);

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].contact.name, "In window");
    assert_eq!(upcoming[0].occurs_on, date(2024, 2, 5));
    assert_eq!(upcoming[0].days_until, 26);
}

#[test]
fn birthday_today_counts_for_any_horizon() {
    let today = date(2024, 1, 10);
    let contacts = vec![contact("Birthday kid", date(2000, 1, 10))];

    let upcoming = upcoming_birthdays(&contacts, today, 0);

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].occurs_on, today);
    assert_eq!(upcoming[0].days_until, 0);
}

#[test]
fn passed_month_day_rolls_over_to_next_year() {
    let today = date(2024, 3, 15);
    let occurrence = next_occurrence(date(1990, 3, 14), today);
    assert_eq!(occurrence, date(2025, 3, 14));
}

#[test]
fn horizon_boundary_is_inclusive() {
    let today = date(2024, 1, 10);
    let contacts = vec![
        contact("On the edge", date(1990, 2, 9)),  // 30 days out
        contact("Past the edge", date(1990, 2, 10)), // 31 days out
    ];

    let upcoming = upcoming_birthdays(&contacts, today, 30);

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].contact.name, "On the edge");
    assert_eq!(upcoming[0].days_until, 30);
}

#[test]
fn output_is_sorted_ascending_by_occurrence() {
    let today = date(2024, 1, 10);
    let contacts = vec![
        contact("Later", date(1990, 2, 5)),
        contact("Sooner", date(1990, 1, 15)),
        contact("Soonest", date(1990, 1, 11)),
    ];

    let names: Vec<String> = upcoming_birthdays(&contacts, today, 30)
        .into_iter()
        .map(|entry| entry.contact.name)
        .collect();
    assert_eq!(names, ["Soonest", "Sooner", "Later"]);
}

#[test]
fn ties_on_occurrence_date_keep_input_order() {
    let today = date(2024, 1, 10);
    let contacts = vec![
        contact("First in", date(1990, 1, 20)),
        contact("Second in", date(1971, 1, 20)),
        contact("Third in", date(2002, 1, 20)),
    ];

    let names: Vec<String> = upcoming_birthdays(&contacts, today, 30)
        .into_iter()
        .map(|entry| entry.contact.name)
        .collect();
    assert_eq!(names, ["First in", "Second in", "Third in"]);
}

#[test]
fn projection_leaves_input_untouched_and_is_repeatable() {
    let today = date(2024, 1, 10);
    let contacts = vec![contact("Stable", date(1990, 1, 20))];

    let first = upcoming_birthdays(&contacts, today, 30);
    let second = upcoming_birthdays(&contacts, today, 30);
    assert_eq!(first, second);
    assert_eq!(contacts[0].name, "Stable");
}

#[test]
fn turns_is_age_reached_on_the_occurrence() {
    let today = date(2024, 1, 10);
    let upcoming = upcoming_birthdays(&[contact("Alex", date(1990, 2, 5))], today, 30);
    assert_eq!(upcoming[0].turns, 34);
}

#[test]
fn leap_day_birthday_occurs_feb_29_in_leap_years() {
    let occurrence = next_occurrence(date(1996, 2, 29), date(2024, 1, 10));
    assert_eq!(occurrence, date(2024, 2, 29));
}

#[test]
fn leap_day_birthday_moves_to_mar_1_in_common_years() {
    let occurrence = next_occurrence(date(1996, 2, 29), date(2023, 1, 10));
    assert_eq!(occurrence, date(2023, 3, 1));
}

#[test]
fn leap_day_birthday_on_mar_1_counts_as_today_in_common_years() {
    let today = date(2023, 3, 1);
    let occurrence = next_occurrence(date(1996, 2, 29), today);
    assert_eq!(occurrence, today);
}

#[test]
fn leap_day_birthday_just_past_mar_1_rolls_to_next_leap_day() {
    let occurrence = next_occurrence(date(1996, 2, 29), date(2023, 3, 2));
    assert_eq!(occurrence, date(2024, 2, 29));
}

#[test]
fn format_occurrence_covers_today_tomorrow_and_dated_forms() {
    let today = date(2024, 1, 10);
    assert_eq!(format_occurrence(date(2024, 1, 10), today), "Today!");
    assert_eq!(format_occurrence(date(2024, 1, 11), today), "Tomorrow");
    assert_eq!(format_occurrence(date(2024, 2, 5), today), "on February 5");
}
