use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Body of a non-success response, kept structured when it is valid JSON
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteBody {
    Json(Value),
    Text(String),
}

impl RemoteBody {
    /// Parse a raw response body, falling back to the text itself.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => RemoteBody::Json(value),
            Err(_) => RemoteBody::Text(text.to_string()),
        }
    }
}

impl fmt::Display for RemoteBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteBody::Json(value) => write!(f, "{}", value),
            RemoteBody::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Failure of a single exchange with the prediction service
///
/// Every variant is recoverable from the process point of view; the caller
/// decides whether to let the user resubmit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    /// No usable endpoint; no request was sent.
    #[error("Backend not configured: {reason}")]
    Configuration { reason: String },

    /// The request never produced an HTTP response.
    #[error("Request error: {cause}")]
    Network { cause: String },

    /// The service answered with something other than a usable 200.
    #[error("API returned status {status}: {body}")]
    Remote { status: u16, body: RemoteBody },
}

impl PredictionError {
    /// Only transport failures are worth a manual resubmission
    pub fn is_retryable(&self) -> bool {
        matches!(self, PredictionError::Network { .. })
    }

    /// Short label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Configuration { .. } => "configuration_error",
            PredictionError::Network { .. } => "network_error",
            PredictionError::Remote { .. } => "remote_error",
        }
    }
}

/// Transport-level failure reported by an `HttpTransport`
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for PredictionError {
    fn from(err: TransportError) -> Self {
        PredictionError::Network { cause: err.message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_body_prefers_json() {
        let body = RemoteBody::from_text(r#"{"detail":"model error"}"#);
        assert_eq!(body, RemoteBody::Json(json!({"detail": "model error"})));

        let body = RemoteBody::from_text("Bad Gateway");
        assert_eq!(body, RemoteBody::Text("Bad Gateway".to_string()));
    }

    #[test]
    fn test_prediction_error_formatting() {
        let error = PredictionError::Remote {
            status: 500,
            body: RemoteBody::Json(json!({"detail": "model error"})),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model error"));

        let error = PredictionError::Configuration {
            reason: "BACKEND_URL is empty".to_string(),
        };
        assert!(error.to_string().contains("BACKEND_URL"));
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        let network: PredictionError = TransportError::new("connection refused").into();
        assert!(network.is_retryable());
        assert_eq!(network.kind(), "network_error");

        let remote = PredictionError::Remote {
            status: 503,
            body: RemoteBody::Text(String::new()),
        };
        assert!(!remote.is_retryable());
        assert!(
            !PredictionError::Configuration {
                reason: String::new()
            }
            .is_retryable()
        );
    }
}
