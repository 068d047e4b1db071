use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the shared HTTP client used for prediction calls.
    ///
    /// No retry middleware: every call is a single attempt. `request_timeout`
    /// bounds the whole exchange; the connect phase is capped separately.
    pub fn create_client(request_timeout: Duration) -> Client {
        let connect_timeout = request_timeout.min(DEFAULT_CONNECT_TIMEOUT);

        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("smartpay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
