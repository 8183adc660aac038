//! Radio service response types

use serde::Deserialize;

/// `/play` response body
///
/// The service answers with whatever it managed to look up; every field is
/// optional and missing ones fall back to resolver defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayResponse {
    /// Resolved display title
    pub title: Option<String>,

    /// Playback length in seconds
    pub duration: Option<u32>,

    /// Stream URL override
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_response() {
        let response: PlayResponse =
            serde_json::from_str(r#"{ "title": "Blue Monday", "duration": 187 }"#).unwrap();

        assert_eq!(response.title.as_deref(), Some("Blue Monday"));
        assert_eq!(response.duration, Some(187));
        assert_eq!(response.url, None);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let response: PlayResponse =
            serde_json::from_str(r#"{ "title": "x", "bitrate": 320 }"#).unwrap();
        assert_eq!(response.title.as_deref(), Some("x"));
    }
}
