//! WebSocket Transport
//!
//! The real network transport. `open` performs the TCP connect and
//! WebSocket upgrade bounded by the configured read timeout, then spawns
//! a pump task that owns the socket for the life of the connection and
//! translates between [`OutboundFrame`]s/[`TransportEvent`]s and
//! tungstenite messages.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::config::ClientConfig;

use super::{OutboundFrame, Transport, TransportError, TransportEvent, TransportLink};

/// Close code reported when the stream ends without a closing handshake
const ABNORMAL_CLOSURE: u16 = 1006;

/// WebSocket transport with the read/write bounds from [`ClientConfig`]
pub struct WsTransport {
    config: ClientConfig,
}

impl WsTransport {
    /// Create a transport with the given configuration
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Default for WsTransport {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn open(&self, url: &str) -> Result<TransportLink, TransportError> {
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(TransportError::InvalidUrl(url.to_string()));
        }

        let read_timeout = self.config.read_timeout();
        let write_timeout = self.config.write_timeout();

        let (stream, _response) = timeout(read_timeout, connect_async(url))
            .await
            .map_err(|_| TransportError::Timeout(read_timeout))?
            .map_err(|err| TransportError::ConnectFailed(err.to_string()))?;
        debug!(url, "websocket open");

        let (out_tx, mut out_rx) = mpsc::channel(self.config.channel_capacity);
        let (event_tx, event_rx) = mpsc::channel(self.config.channel_capacity);

        let (mut sink, mut source) = stream.split();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = out_rx.recv() => match frame {
                        Some(OutboundFrame::Text(text)) => {
                            match timeout(write_timeout, sink.send(Message::Text(text))).await {
                                Ok(Ok(())) => {}
                                Ok(Err(err)) => {
                                    let _ = event_tx
                                        .send(TransportEvent::Failed(err.to_string()))
                                        .await;
                                    break;
                                }
                                Err(_) => {
                                    let _ = event_tx
                                        .send(TransportEvent::Failed("write timed out".into()))
                                        .await;
                                    break;
                                }
                            }
                        }
                        Some(OutboundFrame::Close { code, reason }) => {
                            let frame = CloseFrame {
                                code: CloseCode::from(code),
                                reason: reason.into(),
                            };
                            let _ = timeout(write_timeout, sink.send(Message::Close(Some(frame))))
                                .await;
                            // Local close is final; don't wait for the peer echo.
                            break;
                        }
                        None => break,
                    },
                    message = source.next() => match message {
                        Some(Ok(Message::Text(text))) => {
                            if event_tx.send(TransportEvent::Message(text)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = frame
                                .map(|f| (u16::from(f.code), f.reason.into_owned()))
                                .unwrap_or((ABNORMAL_CLOSURE, String::new()));
                            let _ = event_tx.send(TransportEvent::Closed { code, reason }).await;
                            break;
                        }
                        // Binary and ping/pong frames are outside the protocol
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            let _ = event_tx.send(TransportEvent::Failed(err.to_string())).await;
                            break;
                        }
                        None => {
                            let _ = event_tx
                                .send(TransportEvent::Closed {
                                    code: ABNORMAL_CLOSURE,
                                    reason: "stream ended".into(),
                                })
                                .await;
                            break;
                        }
                    }
                }
            }
            debug!("websocket pump finished");
        });

        Ok(TransportLink {
            outbound: out_tx,
            events: event_rx,
        })
    }
}
