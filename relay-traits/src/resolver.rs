//! Song Resolver Abstraction
//!
//! Turns a listener's free-text query into a playable entry. The concrete
//! resolver is a remote service that may be slow or unavailable; failures are
//! surfaced as errors and must never be retried inside the same poll cycle.

use async_trait::async_trait;

use crate::error::Result;

/// A resolved, playable song.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSong {
    /// Display title
    pub title: String,
    /// Stream or file URL
    pub url: String,
    /// Playback length in seconds, always positive
    pub duration_secs: u32,
}

/// Song resolution trait
#[async_trait]
pub trait SongResolver: Send + Sync {
    /// Resolve a free-text query into a playable song.
    async fn resolve(&self, query: &str) -> Result<ResolvedSong>;
}
