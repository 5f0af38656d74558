//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use app_status_poller::config::{AppConfig, ServiceConfig};
use app_status_poller::health::DualProbeCoordinator;
use app_status_poller::RetryDriver;

/// Start a programmable mock status service on an ephemeral port.
///
/// `f` receives the request path and returns `(status code, body)`; it may
/// sleep to simulate a slow service.
pub async fn start_programmable_service<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock service that always answers `{"status": <status>}` with 200.
pub async fn start_status_service(status: &'static str) -> SocketAddr {
    start_programmable_service(move |_| async move {
        (200, format!(r#"{{"status": "{}"}}"#, status))
    })
    .await
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn read_request_path(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

/// Config pointing at two local services with a short retry delay.
pub fn local_config(first: SocketAddr, second: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.services = vec![
        ServiceConfig::new("service1", &format!("http://{}", first)),
        ServiceConfig::new("service2", &format!("http://{}", second)),
    ];
    config.retries.delay_ms = 20;
    config
}

pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn driver(config: &AppConfig) -> RetryDriver<DualProbeCoordinator> {
    let coordinator = DualProbeCoordinator::from_config(config, test_client()).unwrap();
    RetryDriver::new(coordinator, &config.retries)
}
