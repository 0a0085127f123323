//! HTTP clients for the upstream services
//!
//! Each client implements one of the service traits from [`crate::filter`],
//! so the pipeline can run against in-memory fakes in tests.

pub mod dexscreener;
pub mod gmgn;
pub mod pumpfun;
pub mod rocker;
pub mod rugcheck;
pub mod tweetscout;

pub use dexscreener::DexScreenerClient;
pub use gmgn::GmgnClient;
pub use pumpfun::PumpFunClient;
pub use rocker::RockerClient;
pub use rugcheck::{RugCheckClient, RugCheckFile};
pub use tweetscout::TweetScoutClient;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Error, Result};

/// Build the shared HTTP client. No retries; the timeout is the only guard.
pub fn http_client(timeout_ms: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Reject non-success statuses, then decode the body
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            service,
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::Deserialization(format!("Failed to parse {} response: {}", service, e)))
}

/// Serve one canned HTTP response on a local port and return its base URL
#[cfg(test)]
pub(crate) async fn serve_once(status: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

/// Base URL of a local port with nothing listening on it
#[cfg(test)]
pub(crate) async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[cfg(test)]
pub(crate) fn test_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}
