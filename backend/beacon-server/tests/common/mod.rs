#![allow(dead_code)]

//! Test infrastructure for beacon-server tests

use beacon_config::Config;
use beacon_server::{build_components, build_router};
use beacon_ws::{AppState, ShutdownCoordinator, TickerHandle};

use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

pub const PREFIX: &str = "Message from server, current time: ";

pub type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Config with a fast ticker so eviction tests finish quickly
pub fn test_config(interval_ms: u64, session_limit_ticks: u64) -> Config {
    let mut config = Config::default();
    config.ticker.interval_ms = interval_ms;
    config.ticker.session_limit_ticks = session_limit_ticks;
    config
}

/// A running server bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub shutdown: ShutdownCoordinator,
    ticker: Option<TickerHandle>,
    server: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start(config: Config) -> Self {
        let shutdown = ShutdownCoordinator::new();
        let (state, ticker) = build_components(&config, shutdown.clone());
        let ticker = ticker.spawn(shutdown.subscribe_guard());
        let app = build_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let mut guard = shutdown.subscribe_guard();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { guard.wait().await })
                .await
                .expect("Test server failed");
        });

        Self {
            addr,
            state,
            shutdown,
            ticker: Some(ticker),
            server: Some(server),
        }
    }

    pub fn ws_url(&self, param: &str) -> String {
        format!("ws://{}/ws/{}", self.addr, param)
    }

    pub async fn connect(&self, param: &str) -> WsStream {
        let (stream, _) = tokio_tungstenite::connect_async(self.ws_url(param))
            .await
            .expect("Failed to connect to WebSocket");
        stream
    }

    /// Wait until the registry holds `expected` connections
    pub async fn wait_for_connections(&self, expected: usize) {
        let result = tokio::time::timeout(Duration::from_secs(2), async {
            while self.state.registry.len().await != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(
            result.is_ok(),
            "Expected {expected} registered connections, found {}",
            self.state.registry.len().await
        );
    }

    pub async fn stop(mut self) {
        self.shutdown.shutdown();
        if let Some(ticker) = self.ticker.take() {
            ticker.shutdown().await;
        }
        if let Some(server) = self.server.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), server).await;
        }
    }
}

/// Next text frame that is not a periodic broadcast
pub async fn next_reply<S>(read: &mut S) -> String
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) if !text.as_str().starts_with(PREFIX) => {
                    return text.as_str().to_string();
                }
                Some(Ok(_)) => continue,
                other => panic!("Connection ended before a reply arrived: {other:?}"),
            }
        }
    })
    .await
    .expect("Timed out waiting for reply")
}

/// Drain frames until the server closes the connection; returns broadcasts seen
pub async fn read_until_closed<S>(read: &mut S) -> Vec<String>
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        let mut broadcasts = Vec::new();
        loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => broadcasts.push(text.as_str().to_string()),
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return broadcasts,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .expect("Timed out waiting for server close")
}
