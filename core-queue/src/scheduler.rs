//! # Playback Scheduler
//!
//! Two-state machine driving playback off the queue head: `Idle` (nothing
//! playing) and `Playing` (current entry plus wall-clock deadline). The
//! machine is polled, not timer-driven: each cycle performs at most one
//! transition, so a finished song's successor starts on the following cycle
//! and deadline expiry is detected with up to one poll interval of latency.
//!
//! The playing entry stays at queue position 0 until its deadline elapses:
//! external observers read the head as the now-playing indicator.

use chrono::{DateTime, Utc};
use relay_traits::time::Clock;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::model::SongEntry;
use crate::sync::QueueSynchronizer;

/// Current playback state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing {
        entry: SongEntry,
        deadline: DateTime<Utc>,
    },
}

/// State transition performed by one [`PlaybackScheduler::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Started(SongEntry),
    Finished(SongEntry),
}

pub struct PlaybackScheduler {
    clock: Arc<dyn Clock>,
    state: PlaybackState,
}

impl PlaybackScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn now_playing(&self) -> Option<&SongEntry> {
        match &self.state {
            PlaybackState::Playing { entry, .. } => Some(entry),
            PlaybackState::Idle => None,
        }
    }

    /// Advance the machine by at most one transition.
    ///
    /// `Playing` past its deadline pops the finished head and goes `Idle`;
    /// `Idle` with a queued head starts it. If the pop cannot be persisted
    /// the state stays `Playing` and the same expiry is retried next cycle.
    pub async fn advance(&mut self, queue: &mut QueueSynchronizer) -> Result<Option<Transition>> {
        match &self.state {
            PlaybackState::Playing { entry, deadline } => {
                if self.clock.now() < *deadline {
                    return Ok(None);
                }

                let finished = entry.clone();
                let popped = queue.pop_head().await?;
                self.state = PlaybackState::Idle;
                info!(title = %finished.title, "Song finished");
                Ok(Some(Transition::Finished(popped.unwrap_or(finished))))
            }
            PlaybackState::Idle => match queue.head() {
                Some(head) => {
                    let entry = head.clone();
                    let deadline = self.clock.now()
                        + chrono::Duration::seconds(i64::from(entry.duration_secs.max(1)));
                    info!(
                        title = %entry.title,
                        duration_secs = entry.duration_secs,
                        requested_by = %entry.requested_by,
                        "Now playing"
                    );
                    self.state = PlaybackState::Playing {
                        entry: entry.clone(),
                        deadline,
                    };
                    Ok(Some(Transition::Started(entry)))
                }
                None => Ok(None),
            },
        }
    }
}
