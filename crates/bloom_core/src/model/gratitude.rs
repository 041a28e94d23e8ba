//! Gratitude journal entry.
//!
//! # Invariants
//! - `items` holds 1..=`MAX_GRATITUDE_ITEMS` non-blank strings.
//! - Item text is kept as typed; only blank items are discarded.

use super::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of items in one entry ("three tiny wins").
pub const MAX_GRATITUDE_ITEMS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<String>,
}

impl GratitudeEntry {
    /// Builds an entry from already filtered items.
    ///
    /// Returns `None` when `items` is empty, so an empty entry cannot exist.
    pub fn new(timestamp: DateTime<Utc>, items: Vec<String>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            id: EntryId::generate(),
            timestamp,
            items,
        })
    }
}

/// Drops blank items, preserving order and original text of the rest.
pub fn filter_gratitude_items<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}
