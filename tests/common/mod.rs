//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use cardano_gateway::compiler::StagingSdk;
use cardano_gateway::config::GatewayConfig;
use cardano_gateway::http::HttpServer;

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

async fn serve_connection(mut socket: tokio::net::TcpStream, status: u16, body: String) {
    // Drain the request head before answering.
    let mut buf = [0u8; 4096];
    let mut head = Vec::new();
    loop {
        match socket.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text(status),
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a mock backend that returns a fixed response for every path.
pub async fn start_mock_backend(status: u16, body: &str) -> SocketAddr {
    let body = body.to_string();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(serve_connection(socket, status, body));
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend whose response depends on the request path.
#[allow(dead_code)]
pub async fn start_routing_backend<F>(route: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let route = Arc::new(route);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let route = route.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let mut head = Vec::new();
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    head.extend_from_slice(&buf[..n]);
                                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }
                        // Request line: "GET /path HTTP/1.1"
                        let head = String::from_utf8_lossy(&head);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = route(&path);
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing listens on (bound once, then released).
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Gateway config pointing every provider at an unreachable endpoint.
pub fn base_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.providers.ogmios_url = unreachable_url();
    config.providers.kupo_url = unreachable_url();
    config.providers.dolos_grpc_url = unreachable_url();
    config.providers.dolos_rest_url = unreachable_url();
    // Keep probe deadlines short so the all-down cases stay fast.
    config.probes.ping_timeout_ms = 500;
    config.probes.health_timeout_ms = 500;
    config
}

/// Spawn the gateway on an ephemeral port and return its base URL.
pub async fn spawn_gateway(config: GatewayConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, Arc::new(StagingSdk));

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    format!("http://{addr}")
}

#[allow(dead_code)]
pub fn http_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}
