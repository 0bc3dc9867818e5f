//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert/delete/list/replace-all over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Upsert overwrites any existing record with the same id.
//! - Deleting an absent id is a no-op, not an error.
//! - `replace_all_contacts` either commits the full imported set or
//!   leaves the previous set untouched.

use crate::db::DbError;
use crate::model::contact::{parse_birthday, Contact, ContactId};
use crate::model::reminder::ReminderOffset;
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    birthday,
    reminders,
    avatar_url
FROM contacts";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "birthday", "reminders", "avatar_url"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted row cannot be decoded into a valid contact.
    InvalidData(String),
    /// Connection has no applied schema (migrations never ran).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store contract for contact records: upsert, delete, list-all and
/// bulk-replace.
pub trait ContactRepository {
    fn upsert_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Returns whether a record was actually removed.
    fn delete_contact(&self, id: ContactId) -> RepoResult<bool>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Atomically replaces the whole contact set; returns the new count.
    fn replace_all_contacts(&self, contacts: &[Contact]) -> RepoResult<usize>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection after checking it was bootstrapped by
    /// `db::open_db` and carries the expected `contacts` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'contacts'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("contacts"));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('contacts');")?;
        let mut present = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            present.push(row.get::<_, String>(0)?);
        }
        for column in REQUIRED_COLUMNS {
            if !present.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "contacts",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn upsert_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        self.conn.execute(
            "INSERT INTO contacts (id, name, birthday, reminders, avatar_url)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                birthday = excluded.birthday,
                reminders = excluded.reminders,
                avatar_url = excluded.avatar_url,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                contact.id.to_string(),
                contact.name.as_str(),
                contact.birthday.format("%Y-%m-%d").to_string(),
                reminders_to_db(&contact.reminders)?,
                contact.avatar_url.as_deref(),
            ],
        )?;

        Ok(contact.id)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn replace_all_contacts(&self, contacts: &[Contact]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM contacts;", [])?;
        for contact in contacts {
            // Plain INSERT: a duplicate id inside the imported set is a
            // constraint error and rolls the whole replacement back.
            tx.execute(
                "INSERT INTO contacts (id, name, birthday, reminders, avatar_url)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    contact.id.to_string(),
                    contact.name.as_str(),
                    contact.birthday.format("%Y-%m-%d").to_string(),
                    reminders_to_db(&contact.reminders)?,
                    contact.avatar_url.as_deref(),
                ],
            )?;
        }
        tx.commit()?;

        info!(
            "event=contacts_replace module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts.len())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in contacts.id"))
    })?;

    let birthday_text: String = row.get("birthday")?;
    let birthday = parse_birthday(&birthday_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid birthday value `{birthday_text}` in contacts.birthday"
        ))
    })?;

    let reminders_text: String = row.get("reminders")?;
    let reminders = reminders_from_db(&reminders_text)?;

    Ok(Contact {
        id,
        name: row.get("name")?,
        birthday,
        reminders,
        avatar_url: row.get("avatar_url")?,
    })
}

fn reminders_to_db(reminders: &[ReminderOffset]) -> RepoResult<String> {
    serde_json::to_string(reminders)
        .map_err(|err| RepoError::InvalidData(format!("unencodable reminders: {err}")))
}

fn reminders_from_db(raw: &str) -> RepoResult<Vec<ReminderOffset>> {
    serde_json::from_str(raw).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid reminders value `{raw}` in contacts.reminders: {err}"
        ))
    })
}
