//! Radio service resolver connector
//!
//! Implements the `SongResolver` trait against the radio VPS `/play`
//! endpoint.

use async_trait::async_trait;
use relay_traits::error::Result;
use relay_traits::http::{HttpClient, HttpMethod, HttpRequest};
use relay_traits::resolver::{ResolvedSong, SongResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::RadioError;
use crate::types::PlayResponse;

/// Fallback playback length when the service reports none
pub const DEFAULT_DURATION_SECS: u32 = 30;

/// Per-request timeout for resolver calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Radio VPS resolver
///
/// Asks the radio service to queue a query for broadcast and returns the
/// playable entry. The service's answer is best-effort: an unparsable or
/// partial body is NOT a failure; missing fields fall back to the query
/// itself as title, the configured station stream as URL, and
/// [`DEFAULT_DURATION_SECS`]. Only a non-success status rejects the request.
pub struct RadioResolver {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Base URL of the radio service (e.g. `http://radio.example:5000`)
    base_url: String,

    /// Station stream URL used when the service does not name one
    stream_url: String,
}

impl RadioResolver {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stream_url: stream_url.into(),
        }
    }

    fn play_url(&self, query: &str) -> String {
        format!("{}/play?q={}", self.base_url, urlencoding::encode(query))
    }
}

#[async_trait]
impl SongResolver for RadioResolver {
    #[instrument(skip(self), fields(query = %query))]
    async fn resolve(&self, query: &str) -> Result<ResolvedSong> {
        let request = HttpRequest::new(HttpMethod::Get, self.play_url(query))
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "Radio service rejected request");
            return Err(RadioError::Rejected {
                status_code: response.status,
                message: response.text(),
            }
            .into());
        }

        // Best-effort body: the service accepted the request even if it sent
        // nothing useful back.
        let parsed: PlayResponse = response.json().unwrap_or_default();

        let song = ResolvedSong {
            title: parsed.title.unwrap_or_else(|| query.to_string()),
            url: parsed.url.unwrap_or_else(|| self.stream_url.clone()),
            duration_secs: match parsed.duration {
                Some(secs) if secs > 0 => secs,
                _ => DEFAULT_DURATION_SECS,
            },
        };

        debug!(title = %song.title, duration_secs = song.duration_secs, "Resolved song");
        Ok(song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockall::mock;
    use relay_traits::http::HttpResponse;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: Bytes::from(body.to_string()),
        }
    }

    fn resolver(mock_http: MockHttpClient) -> RadioResolver {
        RadioResolver::new(
            Arc::new(mock_http),
            "http://radio.test:5000",
            "http://radio.test:8000/stream",
        )
    }

    #[tokio::test]
    async fn test_resolve_merges_service_answer() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().returning(|request| {
            assert!(request.url.starts_with("http://radio.test:5000/play?q="));
            Ok(response(200, r#"{ "title": "Blue Monday", "duration": 187 }"#))
        });

        let song = resolver(mock_http).resolve("blue monday").await.unwrap();

        assert_eq!(song.title, "Blue Monday");
        assert_eq!(song.duration_secs, 187);
        assert_eq!(song.url, "http://radio.test:8000/stream");
    }

    #[tokio::test]
    async fn test_resolve_query_is_encoded() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().returning(|request| {
            assert!(request.url.ends_with("/play?q=daft%20punk%20%26%20friends"));
            Ok(response(200, "{}"))
        });

        resolver(mock_http).resolve("daft punk & friends").await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_falls_back_on_empty_body() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .returning(|_| Ok(response(200, "queued")));

        let song = resolver(mock_http).resolve("some song").await.unwrap();

        assert_eq!(song.title, "some song");
        assert_eq!(song.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[tokio::test]
    async fn test_resolve_zero_duration_falls_back() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .returning(|_| Ok(response(200, r#"{ "duration": 0 }"#)));

        let song = resolver(mock_http).resolve("x").await.unwrap();
        assert_eq!(song.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[tokio::test]
    async fn test_resolve_rejection_is_an_error() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .returning(|_| Ok(response(503, "overloaded")));

        let result = resolver(mock_http).resolve("x").await;
        assert!(matches!(
            result,
            Err(relay_traits::RemoteError::Api { status: 503, .. })
        ));
    }
}
