//! Transport Layer
//!
//! Abstraction over the bidirectional message connection the client runs
//! on:
//! - [`WsTransport`]: real WebSocket connection (tokio-tungstenite)
//! - [`InProcessTransport`]: channel-backed pair for tests and embedding
//!
//! A transport hands back a [`TransportLink`] once the connection is
//! open: an outbound frame sender and an inbound event receiver. Events
//! on a link preserve the order frames arrived on the wire.

pub mod in_process;
pub mod ws;

use async_trait::async_trait;
use tokio::sync::mpsc;

// Re-exports for convenience
pub use in_process::{InProcessTransport, PeerHandle};
pub use ws::WsTransport;

/// Frames the client pushes down the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundFrame {
    /// A whole text frame
    Text(String),
    /// Closing handshake with code and reason
    Close {
        /// WebSocket close code (1000 = normal closure)
        code: u16,
        /// Human-readable close reason
        reason: String,
    },
}

/// Events the transport reports after the connection has opened
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// A whole inbound text frame
    Message(String),
    /// The connection closed gracefully (peer- or transport-initiated)
    Closed {
        /// WebSocket close code
        code: u16,
        /// Close reason supplied by the peer, possibly empty
        reason: String,
    },
    /// The connection dropped with an error
    Failed(String),
}

/// Errors opening a transport connection
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The url was not something this transport can dial
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The connection could not be established
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    /// The connect handshake did not finish within the read timeout
    #[error("connect timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// An open connection: push frames out, pull events in.
///
/// Dropping the `outbound` sender tears the connection down.
pub struct TransportLink {
    /// Channel for frames toward the server
    pub outbound: mpsc::Sender<OutboundFrame>,
    /// Channel for events from the server
    pub events: mpsc::Receiver<TransportEvent>,
}

/// A way of opening one connection to a server.
///
/// `open` resolving with `Ok` is the "transport reports open" moment;
/// everything after that travels over the returned link.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection to `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the url is invalid or the
    /// connection cannot be established in time.
    async fn open(&self, url: &str) -> Result<TransportLink, TransportError>;
}
