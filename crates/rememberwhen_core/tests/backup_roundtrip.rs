use chrono::NaiveDate;
use rememberwhen_core::backup::json::{export_file_name, parse, to_json, BackupError};
use rememberwhen_core::db::open_db_in_memory;
use rememberwhen_core::{
    Contact, ContactRepository, ContactService, ReminderOffset, SqliteContactRepository,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_set() -> Vec<Contact> {
    let mut with_avatar = Contact::new(
        "Alex Doe",
        date(1995, 7, 20),
        vec![ReminderOffset::OneDay, ReminderOffset::OneWeek],
    );
    with_avatar.avatar_url = Some("https://example.com/alex.png".to_string());
    vec![
        with_avatar,
        Contact::new("Samantha Smith", date(1988, 12, 15), vec![ReminderOffset::ThreeDays]),
        Contact::new("Michael Johnson", date(2001, 3, 2), vec![]),
    ]
}

#[test]
fn export_then_import_preserves_ids_and_fields() {
    let original = sample_set();

    let payload = to_json(&original).unwrap();
    let restored = parse(&payload).unwrap();

    assert_eq!(restored, original);
}

#[test]
fn export_file_name_carries_the_current_date() {
    assert_eq!(
        export_file_name(date(2024, 1, 10)),
        "remember-when-contacts-2024-01-10.json"
    );
}

#[test]
fn parse_rejects_malformed_json() {
    let err = parse("{not json").unwrap_err();
    assert!(matches!(err, BackupError::InvalidJson(_)));
}

#[test]
fn parse_rejects_non_array_payload() {
    let err = parse("{\"contacts\": []}").unwrap_err();
    assert!(matches!(err, BackupError::NotAnArray));
}

#[test]
fn parse_points_at_the_first_invalid_record() {
    let payload = serde_json::json!([
        {
            "id": "11111111-2222-4333-8444-555555555555",
            "name": "Alex Doe",
            "birthday": "1995-07-20",
            "reminders": []
        },
        {
            "id": "22222222-2222-4333-8444-555555555555",
            "birthday": "1988-12-15",
            "reminders": []
        }
    ])
    .to_string();

    match parse(&payload).unwrap_err() {
        BackupError::InvalidRecord { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_accepts_backups_with_datetime_birthdays() {
    let payload = serde_json::json!([
        {
            "id": "11111111-2222-4333-8444-555555555555",
            "name": "Alex Doe",
            "birthday": "1995-07-20T00:00:00.000Z",
            "reminders": ["1_day", "1_week"]
        }
    ])
    .to_string();

    let restored = parse(&payload).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].birthday, date(1995, 7, 20));
}

#[test]
fn import_replaces_the_stored_set_atomically() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    repo.upsert_contact(&Contact::new("Before Import", date(1980, 1, 1), vec![]))
        .unwrap();

    let service = ContactService::new(repo);
    let imported = sample_set();
    let payload = to_json(&imported).unwrap();

    let count = service.import_contacts(&parse(&payload).unwrap()).unwrap();
    assert_eq!(count, imported.len());

    let stored = service.list_contacts().unwrap();
    assert_eq!(stored.len(), imported.len());
    assert!(stored.iter().all(|contact| contact.name != "Before Import"));
    for contact in &imported {
        assert!(stored.contains(contact));
    }
}
