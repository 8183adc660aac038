//! # Queue Synchronizer
//!
//! Owns the authoritative in-memory queue and mediates every read and write
//! of the remote queue object.
//!
//! ## Concurrency model
//!
//! Writes are guarded by the last-known version token. On a conflict the
//! synchronizer re-reads the remote object, re-applies the local mutation on
//! top of the fresh state, and retries the write exactly once; a second
//! conflict abandons the mutation for this cycle and the remote value, being
//! authoritative, is re-read on the next one. Every successful write
//! refreshes the cached token; a version known to be superseded is never
//! knowingly reused.
//!
//! ## Value format
//!
//! The stored value is the JSON queue document wrapped in the transport
//! envelope (see [`crate::envelope`]). Reads tolerate the legacy unwrapped
//! format; unparsable or absent values become an empty queue, never an
//! error.

use relay_traits::error::RemoteError;
use relay_traits::storage::{ObjectStore, ObjectVersion};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::envelope;
use crate::error::{QueueError, Result};
use crate::model::{QueueDocument, SongEntry};

/// Authoritative queue state plus the cached remote version token.
pub struct QueueSynchronizer {
    store: Arc<dyn ObjectStore>,
    key: String,
    entries: Vec<SongEntry>,
    version: Option<ObjectVersion>,
}

impl QueueSynchronizer {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: Vec::new(),
            version: None,
        }
    }

    /// Storage key of the mirrored queue object.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entries in play order. Position 0, if present, is the entry that is
    /// either playing or about to play.
    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn head(&self) -> Option<&SongEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adopt the remote queue state wholesale.
    ///
    /// Absent keys and unparsable values become an empty queue. The cached
    /// version token is replaced by whatever the read reported.
    pub async fn load(&mut self) -> Result<()> {
        match self.store.read(&self.key).await? {
            Some(object) => {
                self.entries = decode_document(&object.value);
                self.version = object.version;
                debug!(key = %self.key, entries = self.entries.len(), "Adopted remote queue state");
            }
            None => {
                self.entries.clear();
                self.version = None;
                debug!(key = %self.key, "Remote queue object absent, starting empty");
            }
        }
        Ok(())
    }

    /// Append an entry to the tail and persist the whole queue.
    pub async fn append(&mut self, entry: SongEntry) -> Result<()> {
        self.entries.push(entry.clone());
        match self.persist().await {
            Ok(()) => Ok(()),
            Err(QueueError::Remote(RemoteError::VersionConflict)) => {
                warn!(key = %self.key, "Queue append conflicted, reconciling");
                // Adopt the fresh remote state (our push is discarded with the
                // stale local copy), re-apply the append on top, retry once.
                self.load().await?;
                self.entries.push(entry);
                match self.persist().await {
                    Ok(()) => Ok(()),
                    Err(QueueError::Remote(RemoteError::VersionConflict)) => {
                        self.entries.pop();
                        Err(QueueError::ConflictUnresolved {
                            key: self.key.clone(),
                        })
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the head entry and persist the whole queue.
    ///
    /// Returns the removed entry. Local state is restored on failure so the
    /// next cycle retries the same pop.
    pub async fn pop_head(&mut self) -> Result<Option<SongEntry>> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        let entry = self.entries.remove(0);

        match self.persist().await {
            Ok(()) => Ok(Some(entry)),
            Err(QueueError::Remote(RemoteError::VersionConflict)) => {
                warn!(key = %self.key, "Queue pop conflicted, reconciling");
                if let Err(e) = self.load().await {
                    self.entries.insert(0, entry);
                    return Err(e);
                }

                // Re-apply the pop against the fresh state. The entry may sit
                // deeper than the head if a concurrent writer appended, or be
                // gone entirely if another instance already popped it.
                match self.entries.iter().position(|e| *e == entry) {
                    Some(index) => {
                        self.entries.remove(index);
                        match self.persist().await {
                            Ok(()) => Ok(Some(entry)),
                            Err(QueueError::Remote(RemoteError::VersionConflict)) => {
                                self.entries.insert(index, entry);
                                Err(QueueError::ConflictUnresolved {
                                    key: self.key.clone(),
                                })
                            }
                            Err(e) => {
                                self.entries.insert(index, entry);
                                Err(e)
                            }
                        }
                    }
                    None => {
                        debug!(key = %self.key, "Entry already removed remotely");
                        Ok(Some(entry))
                    }
                }
            }
            Err(e) => {
                self.entries.insert(0, entry);
                Err(e)
            }
        }
    }

    /// Write the current queue state, guarded by the cached version token.
    ///
    /// Also used at bootstrap to re-write legacy-format values in the
    /// envelope the consuming layer expects.
    pub async fn persist(&mut self) -> Result<()> {
        let payload = encode_document(&self.entries)?;
        let version = self
            .store
            .write(&self.key, &payload, self.version.as_ref())
            .await?;
        self.version = version;
        Ok(())
    }
}

fn decode_document(raw: &str) -> Vec<SongEntry> {
    let inner = envelope::strip(raw).unwrap_or(raw);
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<QueueDocument>(trimmed) {
        Ok(document) => document.q,
        Err(e) => {
            warn!(error = %e, "Unparsable queue payload, starting empty");
            Vec::new()
        }
    }
}

fn encode_document(entries: &[SongEntry]) -> Result<String> {
    let document = QueueDocument {
        q: entries.to_vec(),
    };
    let payload =
        serde_json::to_string(&document).map_err(|e| QueueError::Encode(e.to_string()))?;
    Ok(envelope::wrap(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> SongEntry {
        SongEntry {
            title: title.to_string(),
            url: "http://radio.test/stream".to_string(),
            duration_secs: 30,
            requested_by: "ada".to_string(),
            requested_by_id: "42".to_string(),
        }
    }

    #[test]
    fn test_decode_wrapped_document() {
        let raw = envelope::wrap(r#"{"q":[{"title":"x"}]}"#);
        let entries = decode_document(&raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "x");
    }

    #[test]
    fn test_decode_legacy_unwrapped_document() {
        let entries = decode_document(r#"{"q":[{"title":"x"}]}"#);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_decode_garbage_is_empty() {
        assert!(decode_document("function die() end").is_empty());
        assert!(decode_document("").is_empty());
        assert!(decode_document(r#"{"other":true}"#).is_empty());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let entries = vec![entry("a"), entry("b")];
        let encoded = encode_document(&entries).unwrap();
        assert!(encoded.starts_with(envelope::SCRIPT_PREFIX));
        assert_eq!(decode_document(&encoded), entries);
    }
}
