//! Highrise worlds API storage types
//!
//! Data structures for the `/storage/object/{key}` endpoints. The version
//! token has been observed both at the top level and nested under `metadata`
//! depending on API revision, so both shapes are accepted.

use serde::{Deserialize, Serialize};

/// Object metadata envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectMetadata {
    /// Version token (opaque, echoed back on guarded writes)
    pub version: Option<serde_json::Value>,

    /// Creation time (RFC 3339)
    pub created_at: Option<String>,

    /// Last update time (RFC 3339)
    pub updated_at: Option<String>,
}

/// GET `/storage/object/{key}` response
#[derive(Debug, Clone, Deserialize)]
pub struct GetObjectResponse {
    /// Storage key
    pub key: Option<String>,

    /// Raw string value; absent for never-initialized objects
    #[serde(default)]
    pub value: Option<String>,

    /// Nested metadata (newer API shape)
    pub metadata: Option<ObjectMetadata>,

    /// Top-level version (older API shape)
    pub version: Option<serde_json::Value>,
}

impl GetObjectResponse {
    /// Version token regardless of which shape carried it.
    pub fn version_token(&self) -> Option<serde_json::Value> {
        self.version
            .clone()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.version.clone()))
    }
}

/// PUT `/storage/object/{key}` request body
///
/// `version` must be omitted entirely (not serialized as null) when no
/// expected version is supplied; the service rejects explicit nulls.
#[derive(Debug, Clone, Serialize)]
pub struct PutObjectRequest<'a> {
    /// New raw string value
    pub value: &'a str,

    /// Object attributes (unused by the relay, always empty)
    pub attributes: Vec<serde_json::Value>,

    /// Expected current version for optimistic concurrency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a serde_json::Value>,
}

/// PUT `/storage/object/{key}` response
#[derive(Debug, Clone, Deserialize)]
pub struct PutObjectResponse {
    /// New version token (older API shape)
    pub version: Option<serde_json::Value>,

    /// Nested metadata carrying the new version (newer API shape)
    pub metadata: Option<ObjectMetadata>,
}

impl PutObjectResponse {
    /// New version token regardless of which shape carried it.
    pub fn version_token(&self) -> Option<serde_json::Value> {
        self.version
            .clone()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.version.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_get_response_nested_version() {
        let json = r#"{
            "key": "music_queue",
            "value": "return [[{\"q\":[]}]]",
            "metadata": { "version": 4, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-02T00:00:00Z" }
        }"#;

        let response: GetObjectResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.version_token(), Some(serde_json::json!(4)));
        assert!(response.value.unwrap().starts_with("return [["));
    }

    #[test]
    fn test_deserialize_get_response_top_level_version() {
        let json = r#"{ "key": "bot_inbox", "value": "", "version": "v-12" }"#;

        let response: GetObjectResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.version_token(), Some(serde_json::json!("v-12")));
    }

    #[test]
    fn test_put_request_omits_absent_version() {
        let request = PutObjectRequest {
            value: "payload",
            attributes: vec![],
            version: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("version"));
    }

    #[test]
    fn test_put_request_carries_version_verbatim() {
        let version = serde_json::json!(9);
        let request = PutObjectRequest {
            value: "payload",
            attributes: vec![],
            version: Some(&version),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"version\":9"));
    }

    #[test]
    fn test_put_response_version_either_shape() {
        let top: PutObjectResponse = serde_json::from_str(r#"{ "version": 5 }"#).unwrap();
        assert_eq!(top.version_token(), Some(serde_json::json!(5)));

        let nested: PutObjectResponse =
            serde_json::from_str(r#"{ "metadata": { "version": 6, "created_at": null, "updated_at": null } }"#)
                .unwrap();
        assert_eq!(nested.version_token(), Some(serde_json::json!(6)));
    }
}
