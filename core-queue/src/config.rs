//! Relay configuration

use std::time::Duration;

/// Relay service configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Storage key of the shared queue object
    pub queue_key: String,

    /// Storage key of the request inbox object
    pub inbox_key: String,

    /// Delay between poll cycle completions
    pub poll_interval: Duration,

    /// Re-write the queue value in the wrapped format at bootstrap, repairing
    /// values left behind by legacy producers
    pub sanitize_on_start: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            queue_key: "music_queue".to_string(),
            inbox_key: "bot_inbox".to_string(),
            poll_interval: Duration::from_secs(3),
            sanitize_on_start: true,
        }
    }
}
