//! Transport envelope codec
//!
//! The consuming world script evaluates the stored queue value as script
//! text, so a bare JSON document fails its loader. Wrapping the payload in a
//! `return [[ ... ]]` long-bracket literal makes the value inert to the
//! script runtime while staying trivially recoverable here.
//!
//! Reads must also accept the legacy unwrapped format left behind by older
//! producers; [`strip`] returns `None` for those and callers fall back to the
//! raw value.

/// Fixed literal opening the envelope
pub const SCRIPT_PREFIX: &str = "return [[";

/// Fixed literal closing the envelope
pub const SCRIPT_SUFFIX: &str = "]]";

/// Wrap a payload for transport through the script-evaluating layer.
pub fn wrap(payload: &str) -> String {
    format!("{}{}{}", SCRIPT_PREFIX, payload, SCRIPT_SUFFIX)
}

/// Strip the envelope, returning the embedded payload.
///
/// Returns `None` when the value is not enveloped (legacy format or
/// arbitrary garbage); the caller decides how to treat the raw value.
pub fn strip(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix(SCRIPT_PREFIX)?
        .strip_suffix(SCRIPT_SUFFIX)
}
