//! Birthday Controller
//!
//! The view-model between a presentation surface and the client. Holds
//! the current payload and connection status as observable state
//! (`tokio::sync::watch`), republishes the client's event streams into
//! that state, and forwards connect/disconnect intents down.
//!
//! A surface renders the connection-entry screen while the payload is
//! absent and the birthday screen once one arrives; it never talks to
//! the client directly.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{BirthdayClient, ConnectionStatus, PayloadEvent};
use crate::payload::BirthdayPayload;

/// Observable state holder over a [`BirthdayClient`].
///
/// Subscribes to the client's event streams once, for its whole
/// lifetime; dropping the controller tears the subscriptions down and
/// releases the connection.
pub struct BirthdayController {
    client: BirthdayClient,
    payload: Arc<watch::Sender<Option<BirthdayPayload>>>,
    status: Arc<watch::Sender<ConnectionStatus>>,
    forwarders: [JoinHandle<()>; 2],
}

impl BirthdayController {
    /// Wire a controller to a client and the event streams it was
    /// created with
    #[must_use]
    pub fn new(
        client: BirthdayClient,
        mut payload_rx: mpsc::Receiver<PayloadEvent>,
        mut status_rx: mpsc::Receiver<ConnectionStatus>,
    ) -> Self {
        let payload = Arc::new(watch::Sender::new(None));
        let status = Arc::new(watch::Sender::new(ConnectionStatus::Disconnected));

        let payload_forwarder = tokio::spawn({
            let payload = Arc::clone(&payload);
            async move {
                while let Some(event) = payload_rx.recv().await {
                    payload.send_replace(event);
                }
            }
        });

        let status_forwarder = tokio::spawn({
            let status = Arc::clone(&status);
            async move {
                while let Some(event) = status_rx.recv().await {
                    status.send_replace(event);
                }
            }
        });

        Self {
            client,
            payload,
            status,
            forwarders: [payload_forwarder, status_forwarder],
        }
    }

    /// Observable current payload; `None` means "show the connection
    /// screen"
    #[must_use]
    pub fn payload(&self) -> watch::Receiver<Option<BirthdayPayload>> {
        self.payload.subscribe()
    }

    /// Observable connection status
    #[must_use]
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    /// Begin a connect attempt against a `host:port` address
    pub fn connect_to_server(&self, address: &str) {
        debug!(address, "connect requested");
        self.status.send_replace(ConnectionStatus::Connecting);
        self.payload.send_replace(None);
        self.client.connect(address);
    }

    /// Tear the connection down and reset the observable state
    pub fn disconnect(&self) {
        self.client.disconnect();
        self.payload.send_replace(None);
        self.status.send_replace(ConnectionStatus::Disconnected);
    }
}

impl Drop for BirthdayController {
    fn drop(&mut self) {
        // Release the socket and end the lifetime subscriptions.
        self.client.disconnect();
        for task in &self.forwarders {
            task.abort();
        }
    }
}
