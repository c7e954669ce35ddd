//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use recap_server::{
    config::ServerConfig,
    domain::AllowList,
    infrastructure::dto::websocket::{InboundFrame, OutboundFrame},
    ui::{router, state::AppState},
};
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Router bound to an ephemeral port, backed by a temporary data directory
pub struct TestServer {
    pub addr: SocketAddr,
    pub data_dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with a configuration tweaked by `configure`
    pub async fn start_with(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = ServerConfig::with_data_dir(data_dir.path());
        config.canvas_width = 4;
        config.canvas_height = 3;
        config.override_ids = AllowList::from_raw(["admin"]);
        config.uploader_ids = AllowList::from_raw(["curator"]);
        config.public_base_url = "http://recap.test/".to_string();
        configure(&mut config);

        let app = router(Arc::new(AppState::from_config(&config)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            addr,
            data_dir,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a chat connection and consume the initial snapshot
    pub async fn connect(&self) -> (WsClient, OutboundFrame) {
        let (mut ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect");
        let snapshot = next_frame(&mut ws).await;
        (ws, snapshot)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Authenticated request headers for `identity`
pub fn as_user(request: reqwest::RequestBuilder, identity: &str) -> reqwest::RequestBuilder {
    request
        .header("x-user-id", identity)
        .header("x-user-name", format!("{identity} display"))
}

pub async fn send_frame(ws: &mut WsClient, frame: &InboundFrame) {
    let json = serde_json::to_string(frame).expect("Failed to encode frame");
    ws.send(Message::Text(json.into()))
        .await
        .expect("Failed to send frame");
}

pub async fn send_raw(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Send a `join` frame and give the server a moment to process it
pub async fn join(ws: &mut WsClient, identity: &str, display_name: &str) {
    send_frame(
        ws,
        &InboundFrame::Join {
            identity: identity.to_string(),
            display_name: display_name.to_string(),
            avatar_ref: None,
        },
    )
    .await;
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Next text frame, failing the test after two seconds
pub async fn next_frame(ws: &mut WsClient) -> OutboundFrame {
    let deadline = Duration::from_secs(2);
    loop {
        let message = tokio::time::timeout(deadline, ws.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("Failed to decode frame");
        }
    }
}

/// Assert that nothing arrives within a short window
pub async fn assert_silent(ws: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "unexpected frame: {:?}", result);
}
