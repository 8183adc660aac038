//! Inbox request decoder
//!
//! The inbox is written by an external, less-trusted producer whose encoding
//! has varied between versions: structured JSON, JSON that was encoded twice,
//! the in-world `!play` command line, and bare text have all been observed.
//! Decoding is an ordered fallback chain; a non-empty value always yields a
//! request, never a silent drop.

use serde::Deserialize;

/// Command grammar recognized from in-world chat relays:
/// `!play <query> | <user> | <userid>`
pub const COMMAND_PREFIX: &str = "!play ";

fn default_user() -> String {
    "Unknown".to_string()
}

/// A decoded listener request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InboxRequest {
    /// Free-text song query
    pub query: String,

    /// Display name of the requester
    #[serde(default = "default_user")]
    pub user: String,

    /// Stable requester ID
    #[serde(default, rename = "userId", alias = "userid")]
    pub user_id: String,
}

impl InboxRequest {
    fn from_text(query: &str) -> Self {
        Self {
            query: query.to_string(),
            user: default_user(),
            user_id: String::new(),
        }
    }
}

/// Decode an inbox value into a request.
///
/// Fallback chain, in order:
/// 1. empty or blank value: no request pending
/// 2. structured JSON object
/// 3. JSON string containing a JSON object (double-encoding producer)
/// 4. `!play <query> | <user> | <userid>` command line
/// 5. anything else becomes the query itself, requester unknown
pub fn decode(raw: &str) -> Option<InboxRequest> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(inner)) => {
            if let Ok(request) = serde_json::from_str::<InboxRequest>(&inner) {
                return Some(request);
            }
            Some(decode_text(&inner))
        }
        Ok(value) => match serde_json::from_value::<InboxRequest>(value) {
            Ok(request) => Some(request),
            Err(_) => Some(decode_text(trimmed)),
        },
        Err(_) => Some(decode_text(trimmed)),
    }
}

fn decode_text(text: &str) -> InboxRequest {
    parse_command(text).unwrap_or_else(|| InboxRequest::from_text(text))
}

fn parse_command(text: &str) -> Option<InboxRequest> {
    let trimmed = text.trim();
    if !trimmed.starts_with(COMMAND_PREFIX) {
        return None;
    }

    let mut parts = trimmed.splitn(3, '|');
    let head = parts.next()?.trim();
    let user = parts.next()?.trim();
    let user_id = parts.next()?.trim();

    let query = head.strip_prefix(COMMAND_PREFIX)?.trim();
    if query.is_empty() {
        return None;
    }

    Some(InboxRequest {
        query: query.to_string(),
        user: if user.is_empty() {
            default_user()
        } else {
            user.to_string()
        },
        user_id: user_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_no_request() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("   \n"), None);
    }

    #[test]
    fn test_structured_json() {
        let request = decode(r#"{"query":"x","user":"a","userId":"1"}"#).unwrap();
        assert_eq!(request.query, "x");
        assert_eq!(request.user, "a");
        assert_eq!(request.user_id, "1");
    }

    #[test]
    fn test_legacy_userid_field_name() {
        let request = decode(r#"{"query":"x","user":"a","userid":"1"}"#).unwrap();
        assert_eq!(request.user_id, "1");
    }

    #[test]
    fn test_double_encoded_json() {
        let request = decode(r#""{\"query\":\"x\",\"user\":\"a\",\"userId\":\"1\"}""#).unwrap();
        assert_eq!(request.query, "x");
        assert_eq!(request.user, "a");
        assert_eq!(request.user_id, "1");
    }

    #[test]
    fn test_bare_text_becomes_query() {
        let request = decode("just text").unwrap();
        assert_eq!(request.query, "just text");
        assert_eq!(request.user, "Unknown");
        assert_eq!(request.user_id, "");
    }

    #[test]
    fn test_quoted_plain_text_uses_inner_text() {
        // A producer that single-encoded a bare query: the inner text is the
        // query, not the quoted wrapper.
        let request = decode(r#""just text""#).unwrap();
        assert_eq!(request.query, "just text");
        assert_eq!(request.user, "Unknown");
    }

    #[test]
    fn test_json_without_query_field_falls_back_to_raw() {
        let raw = r#"{"song":"x"}"#;
        let request = decode(raw).unwrap();
        assert_eq!(request.query, raw);
        assert_eq!(request.user, "Unknown");
    }

    #[test]
    fn test_play_command_line() {
        let request = decode("!play Blue Monday | ada | 42").unwrap();
        assert_eq!(request.query, "Blue Monday");
        assert_eq!(request.user, "ada");
        assert_eq!(request.user_id, "42");
    }

    #[test]
    fn test_play_command_without_requester_falls_back_to_raw() {
        // The command grammar needs all three segments; anything else is
        // treated as bare text.
        let request = decode("!play Blue Monday").unwrap();
        assert_eq!(request.query, "!play Blue Monday");
        assert_eq!(request.user, "Unknown");
    }
}
