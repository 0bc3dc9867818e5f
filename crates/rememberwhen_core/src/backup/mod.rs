//! JSON backup import/export.
//!
//! # Responsibility
//! - Serialize the contact set to the backup file format and parse it
//!   back.
//! - Name export files after the current date.
//!
//! # Invariants
//! - Parsing is all-or-nothing: a malformed record fails the whole
//!   import, no partial set is ever produced.

pub mod json;
