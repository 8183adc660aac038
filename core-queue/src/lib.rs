//! # Queue Relay Core
//!
//! Mirrors the remotely-hosted inbox/queue object pair into process state
//! and drives a polled playback state machine.
//!
//! ## Overview
//!
//! Each poll cycle:
//! - Drains the request inbox (read, decode, clear-first, resolve, append)
//! - Advances the playback machine by at most one transition
//! - Persists every queue mutation back to remote storage under optimistic
//!   concurrency, reconciling version conflicts with a single retry
//!
//! ## Components
//!
//! - **Model** (`model`): queue entries and the stored document shape
//! - **Envelope** (`envelope`): transport codec for script-evaluating consumers
//! - **Decoder** (`decoder`): tolerant inbox request decoding (fallback chain)
//! - **Queue Synchronizer** (`sync`): authoritative queue + version tokens
//! - **Playback Scheduler** (`scheduler`): Idle/Playing deadline machine
//! - **Inbox Processor** (`inbox`): at-most-once request draining
//! - **Relay Service** (`service`): poll loop wiring it all together

pub mod config;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod inbox;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod sync;

pub use config::RelayConfig;
pub use decoder::{decode, InboxRequest};
pub use error::{QueueError, Result};
pub use inbox::InboxProcessor;
pub use model::{QueueDocument, SongEntry, DEFAULT_DURATION_SECS};
pub use scheduler::{PlaybackScheduler, PlaybackState, Transition};
pub use service::RelayService;
pub use sync::QueueSynchronizer;
