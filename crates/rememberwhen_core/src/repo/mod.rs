//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the contact store contract consumed by services and the UI
//!   shell.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - The store does not run form-level validation; it persists whatever
//!   shape it is handed and rejects only structurally invalid rows on
//!   read.
//! - Bulk replacement is transactional: all imported records become
//!   visible, or none do.

pub mod contact_repo;
