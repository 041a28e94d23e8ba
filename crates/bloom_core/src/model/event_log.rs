//! Append-only event log.
//!
//! # Invariants
//! - Entries are ordered most-recent-first; `record` inserts at the head.
//! - Entries are never edited or removed through this type.

use serde::{Deserialize, Serialize};

/// Most-recent-first sequence of immutable entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog<T>(Vec<T>);

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> EventLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `entry` at the head of the log.
    pub fn record(&mut self, entry: T) {
        self.0.insert(0, entry);
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates from newest to oldest.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T> IntoIterator for &'a EventLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
