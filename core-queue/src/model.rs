//! Queue data model
//!
//! Wire field names (`user`, `userid`, `duration`) match what producers and
//! the consuming world script already read and write; changing them would
//! orphan every value in flight.

use serde::{Deserialize, Serialize};

/// Fallback playback length for entries whose producer omitted one.
pub const DEFAULT_DURATION_SECS: u32 = 30;

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}

/// One queued song. Immutable while queued; entries are only ever appended
/// and removed, never edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongEntry {
    /// Display title
    pub title: String,

    /// Stream or file URL
    #[serde(default)]
    pub url: String,

    /// Playback length in seconds
    #[serde(rename = "duration", default = "default_duration")]
    pub duration_secs: u32,

    /// Display name of the requesting listener
    #[serde(rename = "user", default)]
    pub requested_by: String,

    /// Stable ID of the requesting listener
    #[serde(rename = "userid", default)]
    pub requested_by_id: String,
}

/// The queue as stored remotely: `{ "q": [ ...entries ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueDocument {
    #[serde(default)]
    pub q: Vec<SongEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let entry = SongEntry {
            title: "Blue Monday".to_string(),
            url: "http://radio.test/stream".to_string(),
            duration_secs: 187,
            requested_by: "ada".to_string(),
            requested_by_id: "42".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["duration"], 187);
        assert_eq!(json["user"], "ada");
        assert_eq!(json["userid"], "42");
        assert!(json.get("duration_secs").is_none());
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let entry: SongEntry = serde_json::from_str(r#"{ "title": "x" }"#).unwrap();

        assert_eq!(entry.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(entry.requested_by, "");
        assert_eq!(entry.url, "");
    }

    #[test]
    fn test_document_default_is_empty() {
        let document: QueueDocument = serde_json::from_str("{}").unwrap();
        assert!(document.q.is_empty());
    }
}
