use relay_traits::error::RemoteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    /// The guarded write conflicted, and so did the single reconcile retry.
    /// The local mutation is abandoned; the remote value is authoritative and
    /// is re-read on the next poll cycle.
    #[error("Queue write for {key} conflicted twice, abandoned until next cycle")]
    ConflictUnresolved { key: String },

    #[error("Failed to encode queue document: {0}")]
    Encode(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type Result<T> = std::result::Result<T, QueueError>;
