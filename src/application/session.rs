use crate::application::prediction_client::PredictionClient;
use crate::domain::errors::PredictionError;
use crate::domain::history::{HistoryEntry, PredictionHistory};
use crate::domain::prediction::PredictionResult;
use crate::domain::profile::CandidateProfile;
use std::fmt;
use tracing::{info, warn};

/// Lifecycle of the most recent submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Per-session prediction context
///
/// One session per user. It owns its history and last result; nothing is
/// shared between sessions except the stateless client handle. Submitting
/// takes `&mut self`, so a session never has two requests in flight.
pub struct PredictionSession {
    client: PredictionClient,
    history: PredictionHistory,
    last_result: Option<PredictionResult>,
    last_error: Option<PredictionError>,
    state: SubmissionState,
}

impl PredictionSession {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            history: PredictionHistory::new(),
            last_result: None,
            last_error: None,
            state: SubmissionState::Idle,
        }
    }

    /// Submit one profile and record the outcome.
    ///
    /// Successes are inserted at the front of the history. Failures leave
    /// the history untouched and are returned unchanged.
    ///
    /// If the returned future is dropped before it completes, the state stays
    /// `Requesting` and nothing is recorded; the next call starts over.
    pub async fn submit(
        &mut self,
        profile: CandidateProfile,
    ) -> Result<PredictionResult, PredictionError> {
        self.state = SubmissionState::Requesting;

        match self.client.submit(&profile).await {
            Ok(result) => {
                let entry = self.history.record(HistoryEntry::new(profile, result));
                info!(
                    "PredictionSession: Recorded prediction {} ({})",
                    entry.short_id(),
                    result
                );
                self.last_result = Some(result);
                self.last_error = None;
                self.state = SubmissionState::Succeeded;
                Ok(result)
            }
            Err(e) => {
                warn!("PredictionSession: Prediction failed: {}", e);
                self.last_error = Some(e.clone());
                self.state = SubmissionState::Failed;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&PredictionError> {
        self.last_error.as_ref()
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendEnvConfig;
    use crate::domain::errors::TransportError;
    use crate::domain::ports::{HttpTransport, TransportRequest, TransportResponse};
    use crate::domain::profile::tests::sample_profile;
    use crate::infrastructure::MockTransport;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn session_with(transport: &MockTransport) -> PredictionSession {
        let config = BackendEnvConfig::new("http://localhost:8000", None);
        PredictionSession::new(PredictionClient::new(&config, Arc::new(transport.clone())))
    }

    #[tokio::test]
    async fn test_session_starts_idle() {
        let session = session_with(&MockTransport::new());
        assert_eq!(session.state(), SubmissionState::Idle);
        assert!(session.history().is_empty());
        assert!(session.last_result().is_none());
    }

    #[tokio::test]
    async fn test_success_is_recorded() {
        let transport = MockTransport::new();
        transport.respond_json(200, json!({"predicted_salary_usd": 80000}));
        let mut session = session_with(&transport);

        let result = session.submit(sample_profile()).await.unwrap();

        assert_eq!(session.state(), SubmissionState::Succeeded);
        assert_eq!(session.last_result(), Some(&result));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().latest().unwrap().profile, sample_profile());
    }

    struct StalledTransport;

    #[async_trait]
    impl HttpTransport for StalledTransport {
        async fn send(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_abandoned_submission_stays_requesting() {
        let config = BackendEnvConfig::new("http://localhost:8000", None);
        let mut session =
            PredictionSession::new(PredictionClient::new(&config, Arc::new(StalledTransport)));

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), session.submit(sample_profile())).await;

        assert!(outcome.is_err());
        assert_eq!(session.state(), SubmissionState::Requesting);
        assert!(session.history().is_empty());
        assert!(session.last_result().is_none());
    }

    #[tokio::test]
    async fn test_failure_leaves_history_untouched() {
        let transport = MockTransport::new();
        transport
            .respond_json(200, json!({"predicted_salary_usd": 80000}))
            .respond_json(500, json!({"detail": "model error"}));
        let mut session = session_with(&transport);

        session.submit(sample_profile()).await.unwrap();
        let err = session.submit(sample_profile()).await.unwrap_err();

        assert_eq!(session.state(), SubmissionState::Failed);
        assert_eq!(session.last_error(), Some(&err));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.last_result().unwrap().predicted, 80000.0);
    }
}
