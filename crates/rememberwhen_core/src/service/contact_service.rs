//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the form-submission save path (validate, normalize, upsert).
//! - Provide delete/list/import entry points for the UI shell.
//!
//! # Invariants
//! - Form-level validation runs here, never in the store.
//! - Import replaces the whole set through one transactional repository
//!   call.

use crate::model::contact::{Contact, ContactId, ContactValidationError};
use crate::model::reminder::ReminderOffset;
use crate::repo::contact_repo::{ContactRepository, RepoError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Form input for creating or editing a contact.
///
/// `id` is `None` for a new contact; edits carry the existing id and
/// replace every other field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub id: Option<ContactId>,
    pub name: String,
    pub birthday: NaiveDate,
    pub reminders: Vec<ReminderOffset>,
    pub avatar_url: Option<String>,
}

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Input rejected by form-level rules; blocks submission.
    Validation(ContactValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ContactValidationError> for ContactServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case facade over the contact store.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves a form submission: create when `draft.id` is absent, full
    /// replacement of the existing record otherwise.
    ///
    /// # Contract
    /// - Runs form-level validation against `today` before persisting.
    /// - Reminders are normalized (canonical order, deduplicated).
    /// - Returns the stored contact.
    pub fn save_contact(
        &self,
        draft: ContactDraft,
        today: NaiveDate,
    ) -> Result<Contact, ContactServiceError> {
        let id = draft.id.unwrap_or_else(Uuid::new_v4);
        let mut contact = Contact::with_id(id, draft.name, draft.birthday, draft.reminders)?;
        contact.avatar_url = draft.avatar_url;
        contact.validate(today)?;

        self.repo.upsert_contact(&contact)?;
        info!(
            "event=contact_save module=service status=ok contact_id={}",
            contact.id
        );
        Ok(contact)
    }

    /// Deletes a contact by id. Absent ids are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete_contact(&self, id: ContactId) -> Result<bool, ContactServiceError> {
        let removed = self.repo.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id} removed={removed}");
        Ok(removed)
    }

    /// Fetches one contact by id.
    pub fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, ContactServiceError> {
        Ok(self.repo.get_contact(id)?)
    }

    /// Lists all stored contacts in display order.
    pub fn list_contacts(&self) -> Result<Vec<Contact>, ContactServiceError> {
        Ok(self.repo.list_contacts()?)
    }

    /// Replaces the stored set with an imported one, atomically.
    ///
    /// Returns the number of imported contacts.
    pub fn import_contacts(&self, contacts: &[Contact]) -> Result<usize, ContactServiceError> {
        let count = self.repo.replace_all_contacts(contacts)?;
        info!("event=contacts_import module=service status=ok count={count}");
        Ok(count)
    }
}
