use crate::domain::errors::PredictionError;
use url::Url;

/// Validated base address of the prediction service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Trailing slashes are dropped; a blank or unparsable address is a
    /// configuration error.
    pub fn parse(base: &str) -> Result<Self, PredictionError> {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(PredictionError::Configuration {
                reason: "BACKEND_URL not configured. Set BACKEND_URL environment variable."
                    .to_string(),
            });
        }

        let parsed = Url::parse(base).map_err(|e| PredictionError::Configuration {
            reason: format!("Invalid BACKEND_URL '{}': {}", base, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PredictionError::Configuration {
                reason: format!("Unsupported BACKEND_URL scheme: {}", parsed.scheme()),
            });
        }

        Ok(Self {
            base: base.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoint = Endpoint::parse("https://smartpay.example.com/").unwrap();
        assert_eq!(endpoint.base(), "https://smartpay.example.com");
        assert_eq!(
            endpoint.url_for("predict"),
            "https://smartpay.example.com/predict"
        );
        assert_eq!(
            endpoint.url_for("/health"),
            "https://smartpay.example.com/health"
        );
    }

    #[test]
    fn test_base_path_is_preserved() {
        let endpoint = Endpoint::parse("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(endpoint.url_for("analyze"), "http://127.0.0.1:8000/api/analyze");
    }

    #[test]
    fn test_blank_base_is_configuration_error() {
        for raw in ["", "   ", "/"] {
            assert!(matches!(
                Endpoint::parse(raw),
                Err(PredictionError::Configuration { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_base_is_configuration_error() {
        assert!(matches!(
            Endpoint::parse("not a url"),
            Err(PredictionError::Configuration { .. })
        ));
        assert!(matches!(
            Endpoint::parse("ftp://files.example.com"),
            Err(PredictionError::Configuration { .. })
        ));
    }
}
