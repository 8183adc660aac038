//! Error types for the radio resolver provider

use relay_traits::error::RemoteError;
use thiserror::Error;

/// Radio resolver provider errors
#[derive(Error, Debug)]
pub enum RadioError {
    /// The radio service refused the request
    #[error("Radio service rejected request (status {status_code}): {message}")]
    Rejected { status_code: u16, message: String },

    /// Seam-level error (transport, timeout)
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result type for radio resolver operations
pub type Result<T> = std::result::Result<T, RadioError>;

impl From<RadioError> for RemoteError {
    fn from(error: RadioError) -> Self {
        match error {
            RadioError::Rejected {
                status_code,
                message,
            } => RemoteError::Api {
                status: status_code,
                message,
            },
            RadioError::Remote(e) => e,
        }
    }
}
