//! # Inbox Processor
//!
//! Drains one pending listener request per poll cycle: read the inbox
//! object, decode, clear, resolve, append.
//!
//! ## At-most-once
//!
//! The inbox is cleared BEFORE the request's side effects happen. A crash or
//! failure between the clear and the append loses the request instead of
//! replaying it. This is chosen over the opposite ordering, where a crash
//! after the append but before the clear would queue the same song twice on
//! restart.

use relay_traits::error::RemoteError;
use relay_traits::resolver::SongResolver;
use relay_traits::storage::ObjectStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::decoder;
use crate::error::Result;
use crate::model::SongEntry;
use crate::sync::QueueSynchronizer;

pub struct InboxProcessor {
    store: Arc<dyn ObjectStore>,
    resolver: Arc<dyn SongResolver>,
    key: String,
}

impl InboxProcessor {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        resolver: Arc<dyn SongResolver>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            resolver,
            key: key.into(),
        }
    }

    /// Storage key of the inbox object.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Drain the inbox. Returns whether an entry was appended to the queue.
    ///
    /// An absent or empty inbox is a no-op. Decode and resolution failures
    /// after the clear are logged and dropped, never retried; the request
    /// was consumed the moment the clear succeeded.
    pub async fn drain(&self, queue: &mut QueueSynchronizer) -> Result<bool> {
        let Some(object) = self.store.read(&self.key).await? else {
            return Ok(false);
        };
        let Some(request) = decoder::decode(&object.value) else {
            return Ok(false);
        };

        // Clear before any side effect.
        match self.store.write(&self.key, "", object.version.as_ref()).await {
            Ok(_) => {}
            Err(RemoteError::VersionConflict) => {
                // The producer replaced the request mid-cycle; leave the
                // fresh value for the next cycle to read.
                debug!(key = %self.key, "Inbox changed while draining, deferring");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }

        info!(query = %request.query, user = %request.user, "Draining inbox request");

        let song = match self.resolver.resolve(&request.query).await {
            Ok(song) => song,
            Err(e) => {
                warn!(query = %request.query, error = %e, "Resolver failed, request dropped");
                return Ok(false);
            }
        };

        let entry = SongEntry {
            title: song.title,
            url: song.url,
            duration_secs: song.duration_secs,
            requested_by: request.user,
            requested_by_id: request.user_id,
        };

        queue.append(entry).await?;
        Ok(true)
    }
}
