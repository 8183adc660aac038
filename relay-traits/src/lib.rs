//! # Relay Seam Traits
//!
//! Contracts between the relay core and its external collaborators.
//!
//! ## Overview
//!
//! The relay talks to two remote services: the hosted key-value storage that
//! carries the inbox and queue objects, and the radio service that resolves
//! free-text queries into playable songs. This crate defines those seams as
//! traits so the core stays testable without a network and adapters stay
//! swappable.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - single-attempt async HTTP transport
//! - [`ObjectStore`](storage::ObjectStore) - versioned key-value objects with
//!   optimistic concurrency
//! - [`SongResolver`](resolver::SongResolver) - free-text query to playable
//!   song
//! - [`Clock`](time::Clock) - time source for deterministic deadline testing
//!
//! ## Error Handling
//!
//! All seams use [`RemoteError`](error::RemoteError). Adapters convert
//! service-specific failures into it; `VersionConflict` is the only variant
//! the core reacts to structurally (the reconcile-and-retry-once policy),
//! everything else is logged and deferred to the next poll cycle.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`; the relay holds them behind `Arc`.

pub mod error;
pub mod http;
pub mod resolver;
pub mod storage;
pub mod time;

pub use error::RemoteError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use resolver::{ResolvedSong, SongResolver};
pub use storage::{ObjectStore, ObjectVersion, RemoteObject};
pub use time::{Clock, SystemClock};
