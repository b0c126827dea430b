//! Utility modules shared by both tool servers.
//!
//! - [`HttpClient`]: shared reqwest client with a user agent and optional timeout
//! - [`with_retry`]: retry transient provider failures with backoff
//! - [`check_bind`]: check a local TCP address before starting a server

mod http;
mod net;
mod retry;

pub use http::HttpClient;
pub use net::check_bind;
pub use retry::{arxiv_retry_config, with_retry, RetryConfig, TransientError};
