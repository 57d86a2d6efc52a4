use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Shared HTTP client for dialogue providers
///
/// Keeps connections to the generation API warm between chat turns.
/// Request timeouts come from configuration at each call.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = http::HeaderMap::new();
            headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

            Client::builder()
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .default_headers(headers)
                .build()
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "tuned dialogue HTTP client unavailable, using defaults");
                    Client::new()
                })
        })
        .clone()
}
