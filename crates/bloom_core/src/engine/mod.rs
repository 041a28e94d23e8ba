//! Pure derived-state functions.
//!
//! # Responsibility
//! - Streak and achievement derivation from prior profile plus events.
//! - Exercise recommendation and read-only insights.
//!
//! # Invariants
//! - Nothing in this module performs I/O or reads the clock; callers pass
//!   dates and logs explicitly.

pub mod achievements;
pub mod insights;
pub mod recommend;
pub mod streak;
