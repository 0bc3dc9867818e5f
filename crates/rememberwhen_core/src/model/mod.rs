//! Domain model for contact reminder data.
//!
//! # Responsibility
//! - Define the canonical contact record and the reminder vocabulary.
//! - Keep wire-format naming compatible with existing JSON backups.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Reminder offsets form a closed, ordered vocabulary.

pub mod contact;
pub mod reminder;
