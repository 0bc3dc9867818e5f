//! Upcoming-birthday projection.
//!
//! # Responsibility
//! - Compute the next occurrence of each contact's birthday and filter
//!   it against a day-window.
//! - Shape display text for occurrence dates.
//!
//! # Invariants
//! - Projection functions are pure: callers pass `today`, nothing here
//!   reads the clock.

pub mod projector;
