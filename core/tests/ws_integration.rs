//! End-to-end tests over a real WebSocket loopback server.
//!
//! These spin up a tokio-tungstenite server on an ephemeral port and run
//! the full client stack against it: connect, handshake, payload, close.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use birthday_core::{
    BirthdayClient, BirthdayController, ConnectionStatus, WsTransport, HANDSHAKE,
};

const PAYLOAD_FRAME: &str = r#"{"name":"Nanit","dob":1685826000000,"theme":"fox"}"#;

async fn recv_status(
    rx: &mut tokio::sync::mpsc::Receiver<ConnectionStatus>,
) -> ConnectionStatus {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for status")
        .expect("status stream ended")
}

#[tokio::test]
async fn full_session_against_loopback_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        // The client speaks first.
        let greeting = ws.next().await.unwrap().unwrap();
        assert_eq!(greeting.into_text().unwrap(), HANDSHAKE);

        ws.send(Message::Text(PAYLOAD_FRAME.to_string()))
            .await
            .unwrap();
        ws.close(None).await.unwrap();
        // Drain until the connection ends so the close completes.
        while let Some(Ok(_)) = ws.next().await {}
    });

    let (client, mut payload_rx, mut status_rx) =
        BirthdayClient::new(Arc::new(WsTransport::default()));
    client.connect(&addr.to_string());

    assert_eq!(recv_status(&mut status_rx).await, ConnectionStatus::Connected);

    let payload = timeout(Duration::from_secs(5), payload_rx.recv())
        .await
        .expect("timed out waiting for payload")
        .expect("payload stream ended")
        .expect("payload did not parse");
    assert_eq!(payload.name, "Nanit");
    assert_eq!(payload.dob, 1_685_826_000_000);
    assert_eq!(payload.theme, "fox");

    assert_eq!(
        recv_status(&mut status_rx).await,
        ConnectionStatus::Disconnected
    );

    server.await.unwrap();
}

#[tokio::test]
async fn malformed_frame_emits_absent_payload_over_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.next().await;
        ws.send(Message::Text(
            r#"{"invalid":"json structure"}"#.to_string(),
        ))
        .await
        .unwrap();
        // Hold the connection open until the test is done with it.
        while let Some(Ok(_)) = ws.next().await {}
    });

    let (client, mut payload_rx, mut status_rx) =
        BirthdayClient::new(Arc::new(WsTransport::default()));
    client.connect(&addr.to_string());

    assert_eq!(recv_status(&mut status_rx).await, ConnectionStatus::Connected);

    let event = timeout(Duration::from_secs(5), payload_rx.recv())
        .await
        .expect("timed out waiting for payload event")
        .expect("payload stream ended");
    assert_eq!(event, None);

    client.disconnect();
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_reports_failed() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (client, _payload_rx, mut status_rx) =
        BirthdayClient::new(Arc::new(WsTransport::default()));
    client.connect(&addr.to_string());

    assert_eq!(recv_status(&mut status_rx).await, ConnectionStatus::Failed);
}

#[tokio::test]
async fn controller_drives_a_real_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.next().await;
        ws.send(Message::Text(PAYLOAD_FRAME.to_string()))
            .await
            .unwrap();
        while let Some(Ok(_)) = ws.next().await {}
    });

    let (client, payload_rx, status_rx) = BirthdayClient::new(Arc::new(WsTransport::default()));
    let controller = BirthdayController::new(client, payload_rx, status_rx);

    let mut status = controller.status();
    let mut payload = controller.payload();

    controller.connect_to_server(&addr.to_string());
    timeout(
        Duration::from_secs(5),
        status.wait_for(|s| *s == ConnectionStatus::Connected),
    )
    .await
    .expect("never connected")
    .unwrap();

    timeout(Duration::from_secs(5), payload.wait_for(|p| p.is_some()))
        .await
        .expect("payload never arrived")
        .unwrap();
    assert_eq!(payload.borrow().as_ref().unwrap().theme(), birthday_core::Theme::Fox);

    controller.disconnect();
    assert_eq!(*status.borrow(), ConnectionStatus::Disconnected);

    server.await.unwrap();
}
