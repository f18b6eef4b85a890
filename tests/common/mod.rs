//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use image_fixture::config::FixtureConfig;
use image_fixture::http::HttpServer;
use image_fixture::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Directory holding `green.png`.
pub fn resources_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

pub fn green_png() -> Vec<u8> {
    std::fs::read(resources_dir().join("green.png")).unwrap()
}

/// Default config pointing at the crate's resources.
pub fn test_config() -> FixtureConfig {
    let mut config = FixtureConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.fixture.resource_dir = resources_dir();
    config
}

/// Start a fixture server on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for as long as the server is needed.
pub async fn start_fixture_server(config: FixtureConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    wait_until_healthy(addr).await;
    (addr, shutdown)
}

async fn wait_until_healthy(addr: SocketAddr) {
    let client = client();
    for _ in 0..50 {
        if let Ok(res) = client.get(format!("http://{}/health", addr)).send().await {
            if res.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("fixture server at {} never became healthy", addr);
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A response read straight off the socket, headers in wire order.
#[allow(dead_code)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

/// Send a bare HTTP/1.1 GET and read the response until the server closes.
#[allow(dead_code)]
pub async fn raw_get(addr: SocketAddr, path_and_query: &str) -> RawResponse {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path_and_query, addr
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut raw))
        .await
        .expect("response timed out")
        .unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no end of headers");
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().as_bytes().to_vec()))
        .collect();

    RawResponse {
        status_line,
        headers,
        body,
    }
}
