//! # Highrise Storage Provider
//!
//! Implements the `ObjectStore` trait for the Highrise worlds storage API.
//!
//! ## Overview
//!
//! This module provides:
//! - Versioned GET/PUT on storage objects by key
//! - Optimistic concurrency via opaque version tokens (omitted entirely when
//!   no expected version is held, since the API rejects explicit nulls)
//! - Tolerance for both observed response shapes (top-level version and
//!   `metadata`-nested version)

pub mod error;
pub mod storage;
pub mod types;

pub use error::{HighriseError, Result};
pub use storage::{HighriseStorage, DEFAULT_API_BASE};
