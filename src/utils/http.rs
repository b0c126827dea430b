//! HTTP client utilities.

use reqwest::{Client, ClientBuilder, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Default request timeout for provider calls
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::build(base_builder().timeout(timeout))
    }

    /// Create a client whose requests may run for as long as the peer takes
    pub fn without_timeout() -> Result<Self, reqwest::Error> {
        Self::build(base_builder())
    }

    fn build(builder: ClientBuilder) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Arc::new(builder.build()?),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// Start a POST request
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }
}

fn base_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one request per connection, answering after `delay`
    async fn slow_server(delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
                        .await;
                });
            }
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_timeout_applies_only_when_set() {
        let url = slow_server(Duration::from_millis(1500)).await;

        let timed = HttpClient::with_timeout(Duration::from_millis(300)).unwrap();
        let err = timed.get(&url).send().await.unwrap_err();
        assert!(err.is_timeout());

        let untimed = HttpClient::without_timeout().unwrap();
        let response = untimed.get(&url).send().await.unwrap();
        assert_eq!(response.text().await.unwrap(), "ok");
    }
}
