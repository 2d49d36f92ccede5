//! Birthday Client
//!
//! Thin WebSocket client around a single connect / handshake / receive /
//! disconnect lifecycle. The client owns at most one live connection and
//! surfaces everything it produces on two FIFO event streams: parsed
//! payloads (absent on malformed frames) and connection status.
//!
//! There is deliberately no retry, reconnection or backoff here; a failed
//! attempt ends in [`ConnectionStatus::Failed`] and the caller decides
//! whether to try again.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::payload::BirthdayPayload;
use crate::transport::{OutboundFrame, Transport, TransportEvent};

/// Text frame sent to the server immediately after the connection opens
pub const HANDSHAKE: &str = "HappyBirthday";

/// Fixed path segment of the server url
pub const SERVER_PATH: &str = "nanit";

/// Close code for a user-initiated disconnect
const NORMAL_CLOSURE: u16 = 1000;

/// Close reason sent on a user-initiated disconnect
const CLOSE_REASON: &str = "user disconnected";

/// Connection lifecycle states. Exactly one is current at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// A connect attempt is in flight (set by the controller, not by the
    /// client itself)
    Connecting,
    /// The transport reported open and the handshake was sent
    Connected,
    /// No connection, or the last one closed gracefully
    #[default]
    Disconnected,
    /// The last connection could not be established or dropped with an
    /// error
    Failed,
}

/// One payload event: the parsed payload, or `None` for a malformed frame
pub type PayloadEvent = Option<BirthdayPayload>;

/// The connection currently held by the client
struct ActiveLink {
    outbound: mpsc::Sender<OutboundFrame>,
    /// Set on disconnect; events observed after this are discarded
    closed: Arc<AtomicBool>,
    /// Which connect attempt this link belongs to
    attempt: u64,
}

/// WebSocket client for the birthday feed.
///
/// Cheap to share: `connect` and `disconnect` take `&self` and return
/// immediately, with effects observed on the event streams handed out by
/// [`BirthdayClient::new`].
pub struct BirthdayClient {
    transport: Arc<dyn Transport>,
    payload_tx: mpsc::Sender<PayloadEvent>,
    status_tx: mpsc::Sender<ConnectionStatus>,
    link: Arc<Mutex<Option<ActiveLink>>>,
    attempts: AtomicU64,
    /// Attempts numbered below this watermark were cancelled by a
    /// disconnect, including ones still waiting on their open
    cancelled: Arc<AtomicU64>,
}

impl BirthdayClient {
    /// Create a client and its two event streams (payload, status)
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
    ) -> (
        Self,
        mpsc::Receiver<PayloadEvent>,
        mpsc::Receiver<ConnectionStatus>,
    ) {
        Self::with_capacity(transport, 16)
    }

    /// Create a client with a custom event channel capacity
    #[must_use]
    pub fn with_capacity(
        transport: Arc<dyn Transport>,
        capacity: usize,
    ) -> (
        Self,
        mpsc::Receiver<PayloadEvent>,
        mpsc::Receiver<ConnectionStatus>,
    ) {
        let (payload_tx, payload_rx) = mpsc::channel(capacity);
        let (status_tx, status_rx) = mpsc::channel(capacity);

        let client = Self {
            transport,
            payload_tx,
            status_tx,
            link: Arc::new(Mutex::new(None)),
            attempts: AtomicU64::new(0),
            cancelled: Arc::new(AtomicU64::new(0)),
        };

        (client, payload_rx, status_rx)
    }

    /// Full server url for a `host:port` address
    #[must_use]
    pub fn server_url(address: &str) -> String {
        format!("ws://{address}/{SERVER_PATH}")
    }

    /// Open a connection to `address` and send the handshake once the
    /// transport reports open.
    ///
    /// Returns immediately; progress arrives on the event streams. A
    /// previous connection is not implicitly closed by this call - its
    /// events keep flowing until it ends, the caller owns its lifecycle.
    /// A [`disconnect`](Self::disconnect) issued while the open is still
    /// in flight cancels the attempt.
    pub fn connect(&self, address: &str) {
        let url = Self::server_url(address);
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        let transport = Arc::clone(&self.transport);
        let payload_tx = self.payload_tx.clone();
        let status_tx = self.status_tx.clone();
        let slot = Arc::clone(&self.link);
        let cancelled = Arc::clone(&self.cancelled);

        tokio::spawn(async move {
            let link = match transport.open(&url).await {
                Ok(link) => link,
                Err(err) => {
                    warn!(%url, "connect failed: {err}");
                    if cancelled.load(Ordering::SeqCst) <= attempt {
                        let _ = status_tx.send(ConnectionStatus::Failed).await;
                    }
                    return;
                }
            };

            let closed = Arc::new(AtomicBool::new(false));
            // Keeping a sender clone alive here means a newer connect
            // overwriting the slot does not tear this connection down.
            let outbound = link.outbound;
            let mut events = link.events;

            // Register under the lock: a disconnect racing the open
            // either raised the watermark before this check or finds
            // the registered link and closes it.
            let was_cancelled = {
                let mut guard = slot.lock();
                if cancelled.load(Ordering::SeqCst) > attempt {
                    true
                } else {
                    *guard = Some(ActiveLink {
                        outbound: outbound.clone(),
                        closed: Arc::clone(&closed),
                        attempt,
                    });
                    false
                }
            };
            if was_cancelled {
                // A disconnect arrived while the open was in flight;
                // shut the fresh connection down and report nothing.
                debug!(%url, "connect attempt cancelled by disconnect");
                let _ = outbound
                    .send(OutboundFrame::Close {
                        code: NORMAL_CLOSURE,
                        reason: CLOSE_REASON.to_string(),
                    })
                    .await;
                return;
            }

            debug!(%url, "connected");
            let _ = status_tx.send(ConnectionStatus::Connected).await;

            // Exactly one handshake, right after open, before any events
            // are processed.
            if outbound
                .send(OutboundFrame::Text(HANDSHAKE.to_string()))
                .await
                .is_err()
            {
                clear_attempt(&slot, attempt);
                let _ = status_tx.send(ConnectionStatus::Failed).await;
                return;
            }
            debug!("sent handshake: {HANDSHAKE}");

            while let Some(event) = events.recv().await {
                if closed.load(Ordering::SeqCst) {
                    break;
                }
                match event {
                    TransportEvent::Message(text) => {
                        let _ = payload_tx.send(BirthdayPayload::from_frame(&text)).await;
                    }
                    TransportEvent::Closed { code, reason } => {
                        debug!(code, %reason, "connection closed");
                        clear_attempt(&slot, attempt);
                        let _ = status_tx.send(ConnectionStatus::Disconnected).await;
                        break;
                    }
                    TransportEvent::Failed(err) => {
                        warn!("connection failed: {err}");
                        clear_attempt(&slot, attempt);
                        let _ = status_tx.send(ConnectionStatus::Failed).await;
                        break;
                    }
                }
            }
            drop(outbound);
        });
    }

    /// Close the held connection with a normal-closure code.
    ///
    /// Also cancels a connect attempt whose open is still in flight;
    /// such an attempt shuts its connection down on arrival and emits
    /// nothing. Idempotent: calling with no connection and nothing in
    /// flight is a no-op. Events still in flight for the closed
    /// connection are discarded, not delivered.
    pub fn disconnect(&self) {
        // Every attempt started so far is cancelled, including ones
        // still waiting on their open.
        self.cancelled
            .store(self.attempts.load(Ordering::SeqCst), Ordering::SeqCst);

        let Some(active) = self.link.lock().take() else {
            debug!("disconnect: no open connection");
            return;
        };

        active.closed.store(true, Ordering::SeqCst);
        // Awaited sends: neither the closing handshake nor the terminal
        // status may be lost to a momentarily full channel.
        let status_tx = self.status_tx.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = active
                    .outbound
                    .send(OutboundFrame::Close {
                        code: NORMAL_CLOSURE,
                        reason: CLOSE_REASON.to_string(),
                    })
                    .await;
                let _ = status_tx.send(ConnectionStatus::Disconnected).await;
                debug!("disconnected");
            });
        } else {
            // No runtime on this thread (teardown path); best effort.
            let _ = active.outbound.try_send(OutboundFrame::Close {
                code: NORMAL_CLOSURE,
                reason: CLOSE_REASON.to_string(),
            });
            let _ = status_tx.try_send(ConnectionStatus::Disconnected);
        }
    }
}

/// Clear the held link, but only if it still belongs to this attempt
fn clear_attempt(slot: &Mutex<Option<ActiveLink>>, attempt: u64) {
    let mut guard = slot.lock();
    if guard.as_ref().is_some_and(|link| link.attempt == attempt) {
        guard.take();
    }
}
