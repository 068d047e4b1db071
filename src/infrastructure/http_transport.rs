use crate::domain::errors::TransportError;
use crate::domain::ports::{HttpMethod, HttpTransport, TransportRequest, TransportResponse};
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// `HttpTransport` backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client(request_timeout),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| describe_failure(&e, request.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| describe_failure(&e, request.timeout))?;

        debug!(
            "ReqwestTransport: {:?} {} -> {} ({} bytes)",
            request.method,
            request.url,
            status,
            body.len()
        );

        Ok(TransportResponse { status, body })
    }
}

fn describe_failure(err: &reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::new(format!("request timed out after {:?}: {}", timeout, err))
    } else if err.is_connect() {
        TransportError::new(format!("connection failed: {}", error_chain(err)))
    } else {
        TransportError::new(error_chain(err))
    }
}

/// Join the error with its sources; reqwest hides the useful part (DNS,
/// refused connection) in the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
