use thiserror::Error;

/// Errors surfaced by the external collaborators (storage service, resolver,
/// raw HTTP transport).
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The expected version token no longer matches the server's current
    /// version. The write did not apply.
    #[error("remote version conflict: the object was modified concurrently")]
    VersionConflict,

    /// The request did not complete within the transport deadline.
    #[error("remote request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused, reset).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("remote API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response arrived but could not be interpreted.
    #[error("invalid remote payload: {0}")]
    InvalidPayload(String),
}

impl RemoteError {
    /// Transient failures clear up on their own; the poll loop skips the
    /// affected key this cycle and re-reads on the next one.
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Timeout | RemoteError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
