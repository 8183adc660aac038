//! Error types for the Highrise storage provider

use relay_traits::error::RemoteError;
use thiserror::Error;

/// Highrise storage provider errors
#[derive(Error, Debug)]
pub enum HighriseError {
    /// The guarded write lost to a concurrent writer
    #[error("Storage object version conflict")]
    VersionConflict,

    /// API request returned an error status
    #[error("Highrise API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Seam-level error (transport, timeout)
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result type for Highrise storage operations
pub type Result<T> = std::result::Result<T, HighriseError>;

impl From<HighriseError> for RemoteError {
    fn from(error: HighriseError) -> Self {
        match error {
            HighriseError::VersionConflict => RemoteError::VersionConflict,
            HighriseError::ApiError {
                status_code,
                message,
            } => RemoteError::Api {
                status: status_code,
                message,
            },
            HighriseError::ParseError(msg) => RemoteError::InvalidPayload(msg),
            HighriseError::Remote(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = HighriseError::ApiError {
            status_code: 403,
            message: "forbidden".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Highrise API error (status 403): forbidden"
        );
    }

    #[test]
    fn test_conflict_conversion() {
        let remote: RemoteError = HighriseError::VersionConflict.into();
        assert!(matches!(remote, RemoteError::VersionConflict));
    }
}
