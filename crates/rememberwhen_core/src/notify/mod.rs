//! Notification gateway boundary.
//!
//! # Responsibility
//! - Define the platform seam the settings flow talks to: worker
//!   registration, permission prompts, push subscription, display.
//! - Keep the push payload contract (defaults substitution) in one place.
//!
//! # Invariants
//! - Gateway failures are never retried automatically; callers surface
//!   them to the user and return to the prior state.

pub mod gateway;
