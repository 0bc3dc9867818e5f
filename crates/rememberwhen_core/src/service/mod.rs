//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and gateway calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage and platform details.

pub mod contact_service;
pub mod notification_service;
