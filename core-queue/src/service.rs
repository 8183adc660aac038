//! # Relay Service
//!
//! Wires the synchronizer, inbox processor, and playback scheduler into the
//! poll loop.
//!
//! ## Cycle ordering
//!
//! Within one cycle the inbox is drained first, then playback is advanced,
//! and the scheduler itself performs at most one transition. A song appended
//! this cycle therefore cannot disturb the deadline check of the song
//! already playing, and cycle N+1 never starts before cycle N's remote calls
//! have finished: there is exactly one logical worker.
//!
//! No error is fatal. Failed cycles log and fall through to the next poll;
//! the remote store holds the state of record, so local staleness
//! self-corrects on a later read.

use relay_traits::resolver::SongResolver;
use relay_traits::storage::ObjectStore;
use relay_traits::time::Clock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::Result;
use crate::inbox::InboxProcessor;
use crate::scheduler::{PlaybackScheduler, PlaybackState};
use crate::sync::QueueSynchronizer;

pub struct RelayService {
    config: RelayConfig,
    queue: QueueSynchronizer,
    scheduler: PlaybackScheduler,
    inbox: InboxProcessor,
}

impl RelayService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        resolver: Arc<dyn SongResolver>,
        clock: Arc<dyn Clock>,
        config: RelayConfig,
    ) -> Self {
        let queue = QueueSynchronizer::new(Arc::clone(&store), config.queue_key.clone());
        let inbox = InboxProcessor::new(store, resolver, config.inbox_key.clone());
        let scheduler = PlaybackScheduler::new(clock);

        Self {
            config,
            queue,
            scheduler,
            inbox,
        }
    }

    pub fn queue(&self) -> &QueueSynchronizer {
        &self.queue
    }

    pub fn playback_state(&self) -> &PlaybackState {
        self.scheduler.state()
    }

    /// Initial reconciliation: adopt the remote queue, then (optionally)
    /// re-write it so the stored value carries the transport envelope even
    /// if a legacy producer left raw JSON behind.
    pub async fn bootstrap(&mut self) -> Result<()> {
        self.queue.load().await?;
        info!(entries = self.queue.len(), "Queue loaded from remote storage");

        if self.config.sanitize_on_start {
            self.queue.persist().await?;
            debug!("Queue value re-written in wrapped format");
        }
        Ok(())
    }

    /// One poll cycle: drain the inbox, then advance playback.
    pub async fn run_cycle(&mut self) {
        match self.inbox.drain(&mut self.queue).await {
            Ok(appended) => {
                if appended {
                    debug!(entries = self.queue.len(), "Inbox request appended to queue");
                }
            }
            Err(e) => warn!(error = %e, "Inbox processing failed this cycle"),
        }

        if let Err(e) = self.scheduler.advance(&mut self.queue).await {
            warn!(error = %e, "Playback advance failed this cycle");
        }
    }

    /// Run the poll loop until the token is cancelled.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        if let Err(e) = self.bootstrap().await {
            warn!(error = %e, "Bootstrap failed, continuing with empty local queue");
        }

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, stopping relay loop");
                    break;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
