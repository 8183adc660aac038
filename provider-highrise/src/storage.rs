//! Highrise worlds API storage connector
//!
//! Implements the `ObjectStore` trait over the `/storage/object/{key}`
//! endpoints.

use async_trait::async_trait;
use relay_traits::error::Result;
use relay_traits::http::{HttpClient, HttpMethod, HttpRequest};
use relay_traits::storage::{ObjectStore, ObjectVersion, RemoteObject};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::HighriseError;
use crate::types::{GetObjectResponse, PutObjectRequest, PutObjectResponse};

/// Default worlds API base URL
pub const DEFAULT_API_BASE: &str = "https://api.worlds.highrise.game/api";

/// Per-request timeout for storage calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Highrise worlds storage connector
///
/// Implements [`ObjectStore`] for the hosted key-value storage API.
///
/// # Behavior
///
/// - `404` on read maps to `Ok(None)`; a never-written key is an ordinary
///   state, not a failure
/// - `409`/`412` on a guarded write map to `VersionConflict` and the write is
///   known not to have applied
/// - The version token is accepted from the top level or from `metadata`,
///   whichever shape the API revision uses
///
/// # Example
///
/// ```ignore
/// use provider_highrise::HighriseStorage;
/// use relay_traits::storage::ObjectStore;
///
/// let storage = HighriseStorage::new(http_client, api_key);
/// let object = storage.read("music_queue").await?;
/// ```
pub struct HighriseStorage {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Worlds API bearer token
    api_key: String,

    /// API base URL
    base_url: String,
}

impl HighriseStorage {
    /// Create a connector against the default API base.
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http_client, api_key, DEFAULT_API_BASE)
    }

    /// Create a connector against a custom API base (tests, staging).
    pub fn with_base_url(
        http_client: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_key: api_key.into().trim().to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/object/{}",
            self.base_url,
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl ObjectStore for HighriseStorage {
    #[instrument(skip(self), fields(key = %key))]
    async fn read(&self, key: &str) -> Result<Option<RemoteObject>> {
        let request = HttpRequest::new(HttpMethod::Get, self.object_url(key))
            .bearer_token(&self.api_key)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        match response.status {
            404 => {
                debug!("Storage object absent");
                Ok(None)
            }
            status if response.is_success() => {
                let parsed: GetObjectResponse = response.json().map_err(|e| {
                    HighriseError::ParseError(format!("storage object response: {}", e))
                })?;

                debug!(status, "Fetched storage object");
                Ok(Some(RemoteObject {
                    key: key.to_string(),
                    value: parsed.value.clone().unwrap_or_default(),
                    version: parsed.version_token().map(ObjectVersion::new),
                }))
            }
            status => {
                warn!(status, "Storage read rejected");
                Err(HighriseError::ApiError {
                    status_code: status,
                    message: response.text(),
                }
                .into())
            }
        }
    }

    #[instrument(skip(self, value), fields(key = %key, guarded = expected.is_some()))]
    async fn write(
        &self,
        key: &str,
        value: &str,
        expected: Option<&ObjectVersion>,
    ) -> Result<Option<ObjectVersion>> {
        let body = PutObjectRequest {
            value,
            attributes: vec![],
            version: expected.map(|v| v.as_raw()),
        };

        let request = HttpRequest::new(HttpMethod::Put, self.object_url(key))
            .bearer_token(&self.api_key)
            .json(&body)?
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        match response.status {
            409 | 412 => {
                warn!("Guarded write lost to a concurrent writer");
                Err(HighriseError::VersionConflict.into())
            }
            status if response.is_success() => {
                let parsed: PutObjectResponse = response.json().map_err(|e| {
                    HighriseError::ParseError(format!("storage put response: {}", e))
                })?;

                let version = parsed.version_token().map(ObjectVersion::new);
                debug!(status, version = ?version, "Wrote storage object");
                Ok(version)
            }
            status => {
                warn!(status, "Storage write rejected");
                Err(HighriseError::ApiError {
                    status_code: status,
                    message: response.text(),
                }
                .into())
            }
        }
    }
}
