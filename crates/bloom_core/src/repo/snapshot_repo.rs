//! Snapshot persistence over a key-value byte store.
//!
//! # Responsibility
//! - Encode/decode the whole `Snapshot` as one JSON record.
//! - Classify failures into corrupt data vs. unavailable storage.
//!
//! # Invariants
//! - Exactly one record per storage key; every save replaces it whole.
//! - Encoding is deterministic: `encode(decode(bytes)) == bytes` for bytes
//!   produced by this module.

use crate::model::snapshot::Snapshot;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the snapshot record.
pub const DEFAULT_STORAGE_KEY: &str = "bloomData";

/// Snapshot persistence failure. Never fatal to a session.
#[derive(Debug)]
pub enum StoreError {
    /// Backing store could not be read or written.
    StorageUnavailable(RepoError),
    /// Persisted bytes are not a valid snapshot.
    CorruptSnapshot(serde_json::Error),
    /// In-memory snapshot failed to serialize.
    Encode(serde_json::Error),
    /// A stored record exists that the session could not read at open;
    /// saving would overwrite it.
    UnreadRecord,
}

impl StoreError {
    /// Short stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::CorruptSnapshot(_) => "corrupt_snapshot",
            Self::Encode(_) => "encode_failed",
            Self::UnreadRecord => "unread_record",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::CorruptSnapshot(err) => write!(f, "corrupt snapshot: {err}"),
            Self::Encode(err) => write!(f, "snapshot encoding failed: {err}"),
            Self::UnreadRecord => write!(
                f,
                "stored snapshot was not loaded by this session; refusing to overwrite it"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::CorruptSnapshot(err) | Self::Encode(err) => Some(err),
            Self::UnreadRecord => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Serializes a snapshot to its persisted byte form.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(snapshot).map_err(StoreError::Encode)
}

/// Parses persisted bytes back into a snapshot.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, StoreError> {
    serde_json::from_slice(bytes).map_err(StoreError::CorruptSnapshot)
}

/// Reads and writes the single snapshot record.
pub struct SnapshotRepository<R: KvRepository> {
    kv: R,
    key: String,
}

impl<R: KvRepository> SnapshotRepository<R> {
    pub fn new(kv: R) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: R, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(bytes) = self.kv.get(&self.key).map_err(|err| {
            warn!("event=snapshot_load module=repo status=error error_code=storage_unavailable error={err}");
            StoreError::from(err)
        })?
        else {
            info!("event=snapshot_load module=repo status=absent");
            return Ok(None);
        };

        match decode_snapshot(&bytes) {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=repo status=ok bytes={} moods={} gratitudes={} exercises={}",
                    bytes.len(),
                    snapshot.moods.len(),
                    snapshot.gratitudes.len(),
                    snapshot.exercises.len()
                );
                Ok(Some(snapshot))
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error error_code={} bytes={}",
                    err.code(),
                    bytes.len()
                );
                Err(err)
            }
        }
    }

    /// Replaces the stored snapshot with `snapshot`.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = encode_snapshot(snapshot)?;
        match self.kv.put(&self.key, &bytes) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=repo status=ok bytes={}",
                    bytes.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=snapshot_save module=repo status=error error_code=storage_unavailable error={err}");
                Err(err.into())
            }
        }
    }

    /// Raw stored bytes, for diagnostics and export.
    pub fn load_raw(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.kv.get(&self.key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, encode_snapshot, SnapshotRepository, StoreError};
    use crate::model::mood::{Mood, MoodEntry};
    use crate::model::snapshot::Snapshot;
    use crate::repo::kv_repo::{InMemoryKvRepository, KvRepository};
    use chrono::{TimeZone, Utc};

    #[test]
    fn load_on_empty_store_is_absent() {
        let repo = SnapshotRepository::new(InMemoryKvRepository::new());
        assert!(repo.load().expect("empty store is readable").is_none());
    }

    #[test]
    fn malformed_bytes_are_reported_as_corrupt() {
        let kv = InMemoryKvRepository::new();
        kv.put("bloomData", b"{not json").expect("in-memory put");
        let repo = SnapshotRepository::new(&kv);
        let err = repo.load().unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot(_)));
        assert_eq!(err.code(), "corrupt_snapshot");
    }

    #[test]
    fn reencoding_decoded_bytes_is_stable() {
        let mut snapshot = Snapshot::empty();
        let at = Utc.with_ymd_and_hms(2026, 4, 2, 8, 15, 0).unwrap();
        snapshot.moods.record(MoodEntry::new(at, Mood::Joyful, Some("sunny")));
        let bytes = encode_snapshot(&snapshot).expect("encode snapshot");
        let decoded = decode_snapshot(&bytes).expect("decode own encoding");
        let again = encode_snapshot(&decoded).expect("re-encode snapshot");
        assert_eq!(bytes, again);
    }

    #[test]
    fn custom_key_is_isolated_from_default() {
        let kv = InMemoryKvRepository::new();
        let custom = SnapshotRepository::with_key(&kv, "other");
        custom.save(&Snapshot::empty()).expect("save under custom key");
        let default_record = SnapshotRepository::new(&kv).load().expect("load default key");
        assert!(default_record.is_none());
        assert!(custom.load().expect("load custom key").is_some());
    }
}
