//! In-Process Transport
//!
//! Channel-backed transport for tests and embedded fakes. The peer half
//! behaves like a live server: it sees the frames the client sends and
//! injects events as if they came off the wire, with no sockets involved.

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{OutboundFrame, Transport, TransportError, TransportEvent, TransportLink};

/// The server half of an in-process connection
pub struct PeerHandle {
    /// Frames the client pushed (handshake, close)
    pub incoming: mpsc::Receiver<OutboundFrame>,
    /// Inject events as if the server sent them
    pub events: mpsc::Sender<TransportEvent>,
}

/// Transport that hands out one pre-built in-process connection.
///
/// The first `open` succeeds and connects the caller to the scripted
/// peer; subsequent opens fail like a refused connection.
pub struct InProcessTransport {
    link: Mutex<Option<TransportLink>>,
}

impl InProcessTransport {
    /// Create a transport and the peer handle for its single connection
    #[must_use]
    pub fn new_pair() -> (Self, PeerHandle) {
        let (out_tx, out_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(16);

        let transport = Self {
            link: Mutex::new(Some(TransportLink {
                outbound: out_tx,
                events: event_rx,
            })),
        };
        let peer = PeerHandle {
            incoming: out_rx,
            events: event_tx,
        };

        (transport, peer)
    }

    /// A transport whose connections always fail to open
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            link: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    async fn open(&self, _url: &str) -> Result<TransportLink, TransportError> {
        self.link
            .lock()
            .take()
            .ok_or_else(|| TransportError::ConnectFailed("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_open_hands_out_the_scripted_link() {
        let (transport, mut peer) = InProcessTransport::new_pair();

        let link = transport.open("ws://test/nanit").await.unwrap();
        link.outbound
            .send(OutboundFrame::Text("hello".into()))
            .await
            .unwrap();
        assert_eq!(
            peer.incoming.recv().await,
            Some(OutboundFrame::Text("hello".into()))
        );
    }

    #[tokio::test]
    async fn test_second_open_is_refused() {
        let (transport, _peer) = InProcessTransport::new_pair();

        transport.open("ws://test/nanit").await.unwrap();
        let second = transport.open("ws://test/nanit").await;
        assert!(matches!(second, Err(TransportError::ConnectFailed(_))));
    }

    #[tokio::test]
    async fn test_refusing_transport_never_opens() {
        let transport = InProcessTransport::refusing();
        let result = transport.open("ws://test/nanit").await;
        assert!(matches!(result, Err(TransportError::ConnectFailed(_))));
    }

    #[tokio::test]
    async fn test_peer_events_reach_the_link() {
        let (transport, peer) = InProcessTransport::new_pair();
        let mut link = transport.open("ws://test/nanit").await.unwrap();

        peer.events
            .send(TransportEvent::Message("frame".into()))
            .await
            .unwrap();
        assert_eq!(
            link.events.recv().await,
            Some(TransportEvent::Message("frame".into()))
        );
    }
}
