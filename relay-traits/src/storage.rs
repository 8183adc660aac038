//! Remote Object Storage Abstraction
//!
//! Contract for the hosted key-value storage service that holds the inbox and
//! queue objects. Writes carry an opaque version token for optimistic
//! concurrency; a stale token yields [`RemoteError::VersionConflict`] and the
//! write does not apply.
//!
//! [`RemoteError::VersionConflict`]: crate::error::RemoteError::VersionConflict

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque version token for optimistic concurrency.
///
/// The service chooses the representation (integers and strings have both
/// been observed); the token is carried back verbatim on the next write and
/// never interpreted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectVersion(serde_json::Value);

impl ObjectVersion {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl std::fmt::Display for ObjectVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote object as read from the storage service.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    /// Storage key
    pub key: String,
    /// Raw string value (interpretation is the caller's concern)
    pub value: String,
    /// Current version token, when the service reported one
    pub version: Option<ObjectVersion>,
}

/// Versioned key-value object store trait
///
/// # Example
///
/// ```ignore
/// use relay_traits::storage::ObjectStore;
///
/// async fn clear(store: &dyn ObjectStore, key: &str) -> relay_traits::error::Result<()> {
///     if let Some(object) = store.read(key).await? {
///         store.write(key, "", object.version.as_ref()).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an object by key.
    ///
    /// Returns `Ok(None)` when the key has never been written; absence is
    /// an ordinary state, not an error.
    async fn read(&self, key: &str) -> Result<Option<RemoteObject>>;

    /// Write an object, optionally guarded by an expected version.
    ///
    /// With `expected` set, the service must reject the write with
    /// `VersionConflict` if its current version differs. With `expected`
    /// omitted the write is an unconditional overwrite.
    ///
    /// Returns the version token assigned to the new value, when the service
    /// reports one. `None` means the next guarded write has no token to carry
    /// and the caller must re-read before relying on conflict detection.
    async fn write(
        &self,
        key: &str,
        value: &str,
        expected: Option<&ObjectVersion>,
    ) -> Result<Option<ObjectVersion>>;
}
