use crate::config::BackendEnvConfig;
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::{PredictionError, RemoteBody};
use crate::domain::insights::{AnalyzeResponse, DatasetSummary, ExplainResponse, FeatureImportance};
use crate::domain::ports::{HttpTransport, TransportRequest, TransportResponse};
use crate::domain::prediction::PredictionResult;
use crate::domain::profile::CandidateProfile;
use crate::infrastructure::ReqwestTransport;
use crate::infrastructure::observability::{LatencyGuard, Metrics};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the remote salary-prediction service
///
/// Holds no per-request state: clones share the transport and can submit
/// concurrently without seeing each other's payloads or results.
#[derive(Clone)]
pub struct PredictionClient {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    transport: Arc<dyn HttpTransport>,
    metrics: Option<Metrics>,
}

impl PredictionClient {
    pub fn new(config: &BackendEnvConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
            transport,
            metrics: None,
        }
    }

    /// Client talking HTTP through reqwest
    pub fn from_config(config: &BackendEnvConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new(config.timeout)))
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Request a salary prediction for `profile`.
    ///
    /// Exactly one POST to `{base}/predict`, no retries. An unconfigured
    /// endpoint fails before any I/O.
    pub async fn submit(
        &self,
        profile: &CandidateProfile,
    ) -> Result<PredictionResult, PredictionError> {
        let outcome = self.submit_inner(profile).await;

        if let Some(metrics) = &self.metrics {
            match &outcome {
                Ok(_) => metrics.inc_predictions("success"),
                Err(e) => metrics.inc_predictions(e.kind()),
            }
        }

        outcome
    }

    async fn submit_inner(
        &self,
        profile: &CandidateProfile,
    ) -> Result<PredictionResult, PredictionError> {
        let endpoint = self.endpoint()?;
        let request = self.authorize(TransportRequest::post_json(
            endpoint.url_for("predict"),
            profile.to_payload(),
            self.timeout,
        ));

        info!(
            "PredictionClient: Requesting prediction for '{}' from {}",
            profile.job_title,
            endpoint.base()
        );

        let response = self.send("predict", request).await?;
        let fields = match expect_ok(response)? {
            Value::Object(fields) => fields,
            other => {
                warn!("PredictionClient: /predict returned a non-object body");
                return Err(PredictionError::Remote {
                    status: 200,
                    body: RemoteBody::Json(other),
                });
            }
        };

        let result = PredictionResult::from_response(&fields);
        if !result.is_well_ordered() {
            warn!(
                "PredictionClient: Service returned an ill-ordered range: {}",
                result
            );
        }
        info!("PredictionClient: Prediction received: {}", result);

        Ok(result)
    }

    /// Dataset summary from `GET {base}/analyze`
    pub async fn analyze(&self) -> Result<DatasetSummary, PredictionError> {
        let response: AnalyzeResponse = self.get_typed("analyze").await?;
        Ok(response.summary)
    }

    /// Feature importances from `GET {base}/explain`
    pub async fn explain(&self) -> Result<Vec<FeatureImportance>, PredictionError> {
        let response: ExplainResponse = self.get_typed("explain").await?;
        Ok(response.top_features)
    }

    /// Raw body of `GET {base}/health`; plain-text bodies are wrapped as `{"status": ...}`
    pub async fn health(&self) -> Result<Value, PredictionError> {
        let endpoint = self.endpoint()?;
        let request = self.authorize(TransportRequest::get(
            endpoint.url_for("health"),
            self.timeout,
        ));

        let response = self.send("health", request).await?;
        if response.status != 200 {
            return Err(remote_error(response));
        }

        Ok(serde_json::from_str(&response.body)
            .unwrap_or_else(|_| json!({ "status": response.body.trim() })))
    }

    async fn get_typed<T: DeserializeOwned>(&self, path: &str) -> Result<T, PredictionError> {
        let endpoint = self.endpoint()?;
        let request = self.authorize(TransportRequest::get(endpoint.url_for(path), self.timeout));

        let response = self.send(path, request).await?;
        let value = expect_ok(response)?;

        serde_json::from_value::<T>(value.clone()).map_err(|e| {
            warn!("PredictionClient: Unexpected /{} body: {}", path, e);
            PredictionError::Remote {
                status: 200,
                body: RemoteBody::Json(value),
            }
        })
    }

    fn endpoint(&self) -> Result<Endpoint, PredictionError> {
        let endpoint = Endpoint::parse(self.base_url.as_deref().unwrap_or_default());
        if let Err(e) = &endpoint {
            error!("PredictionClient: {}", e);
        }
        endpoint
    }

    fn authorize(&self, request: TransportRequest) -> TransportRequest {
        match &self.api_key {
            Some(key) => request.with_header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send(
        &self,
        label: &str,
        request: TransportRequest,
    ) -> Result<TransportResponse, PredictionError> {
        let _latency = LatencyGuard::for_endpoint(self.metrics.as_ref(), label);

        debug!("PredictionClient: {:?} {}", request.method, request.url);
        self.transport.send(request).await.map_err(|e| {
            error!("PredictionClient: /{} request failed: {}", label, e);
            PredictionError::from(e)
        })
    }
}

/// Decode a 200 body as JSON; anything else is a remote error.
fn expect_ok(response: TransportResponse) -> Result<Value, PredictionError> {
    if response.status != 200 {
        return Err(remote_error(response));
    }

    serde_json::from_str::<Value>(&response.body).map_err(|_| {
        warn!("PredictionClient: 200 response body is not JSON");
        PredictionError::Remote {
            status: 200,
            body: RemoteBody::Text(response.body),
        }
    })
}

fn remote_error(response: TransportResponse) -> PredictionError {
    warn!(
        "PredictionClient: Service responded with status {}",
        response.status
    );
    PredictionError::Remote {
        status: response.status,
        body: RemoteBody::from_text(&response.body),
    }
}
