//! Core use-case services.
//!
//! # Responsibility
//! - Expose the command/query contract consumed by presentation layers.
//! - Keep UI callers decoupled from storage and derivation details.

pub mod session_service;
