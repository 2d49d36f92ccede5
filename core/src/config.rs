//! Client Configuration
//!
//! Timeout and channel defaults for the transport layer. The 3 second
//! read/write bounds suit the local-network sessions this client is
//! built for; they are defaults, not hard constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the client and its transport
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Read timeout in milliseconds.
    ///
    /// Bounds the connect/upgrade handshake. Once the connection is open
    /// the server pushes frames at its own pace, so there is no idle
    /// read bound.
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds, applied per outbound frame
    pub write_timeout_ms: u64,

    /// Capacity of the transport's frame/event channels
    pub channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: 3000,
            write_timeout_ms: 3000,
            channel_capacity: 16,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `BIRTHDAY_READ_TIMEOUT`: read timeout in ms
    /// - `BIRTHDAY_WRITE_TIMEOUT`: write timeout in ms
    /// - `BIRTHDAY_CHANNEL_CAPACITY`: channel capacity
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            read_timeout_ms: std::env::var("BIRTHDAY_READ_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.read_timeout_ms),
            write_timeout_ms: std::env::var("BIRTHDAY_WRITE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.write_timeout_ms),
            channel_capacity: std::env::var("BIRTHDAY_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.channel_capacity),
        }
    }

    /// Read timeout as a [`Duration`]
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Write timeout as a [`Duration`]
    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}
