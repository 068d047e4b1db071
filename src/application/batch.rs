//! JSON-lines replay through a single prediction session

use crate::application::session::PredictionSession;
use crate::domain::profile::CandidateProfile;
use tracing::{error, warn};

/// Why a line produced no history entry
#[derive(Debug, Clone, PartialEq)]
pub enum LineFailure {
    /// Not a profile document
    Malformed(String),
    /// Parsed but failed profile validation; never sent
    Invalid(String),
    /// Sent and rejected, or the service was unreachable
    Prediction(String),
}

/// Outcome of one replay, lines numbered from 1
#[derive(Debug, Default)]
pub struct BatchReport {
    pub recorded: usize,
    pub failures: Vec<(usize, LineFailure)>,
}

impl BatchReport {
    /// Lines that went out to the service, successful or not
    pub fn submitted(&self) -> usize {
        self.recorded
            + self
                .failures
                .iter()
                .filter(|(_, f)| matches!(f, LineFailure::Prediction(_)))
                .count()
    }
}

/// Submit every non-blank line of `content` in order.
///
/// Bad lines are logged and skipped; the replay always runs to the end.
pub async fn replay_lines(session: &mut PredictionSession, content: &str) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let profile = match serde_json::from_str::<CandidateProfile>(line) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Line {}: skipping malformed profile: {}", line_no, e);
                report
                    .failures
                    .push((line_no, LineFailure::Malformed(e.to_string())));
                continue;
            }
        };
        if let Err(e) = profile.validate() {
            warn!("Line {}: skipping invalid profile: {}", line_no, e);
            report
                .failures
                .push((line_no, LineFailure::Invalid(e.to_string())));
            continue;
        }

        match session.submit(profile).await {
            Ok(_) => report.recorded += 1,
            Err(e) => {
                error!("Line {}: prediction failed: {}", line_no, e);
                report
                    .failures
                    .push((line_no, LineFailure::Prediction(e.to_string())));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PredictionClient;
    use crate::config::BackendEnvConfig;
    use crate::domain::profile::tests::sample_profile;
    use crate::infrastructure::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn session_with(transport: &MockTransport) -> PredictionSession {
        let config = BackendEnvConfig::new("http://localhost:8000", None);
        PredictionSession::new(PredictionClient::new(&config, Arc::new(transport.clone())))
    }

    fn profile_line(job_title: &str) -> String {
        let mut profile = sample_profile();
        profile.job_title = job_title.to_string();
        serde_json::to_string(&profile).unwrap()
    }

    #[tokio::test]
    async fn test_bad_lines_are_skipped_without_a_request() {
        let transport = MockTransport::new();
        transport
            .respond_json(200, json!({"predicted_salary_usd": 70000}))
            .respond_json(500, json!({"detail": "model error"}));
        let mut session = session_with(&transport);

        let mut invalid = sample_profile();
        invalid.age = 9;
        let content = [
            profile_line("Analyst"),
            String::new(),
            "{not json".to_string(),
            serde_json::to_string(&invalid).unwrap(),
            profile_line("Engineer"),
        ]
        .join("\n");

        let report = replay_lines(&mut session, &content).await;

        assert_eq!(transport.call_count(), 2);
        assert_eq!(report.recorded, 1);
        assert_eq!(report.submitted(), 2);
        assert_eq!(report.failures.len(), 3);
        assert!(matches!(report.failures[0], (3, LineFailure::Malformed(_))));
        assert!(matches!(report.failures[1], (4, LineFailure::Invalid(_))));
        assert!(matches!(report.failures[2], (5, LineFailure::Prediction(_))));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_history_is_newest_first_and_display_cut() {
        let transport = MockTransport::new();
        for salary in 1..=10 {
            transport.respond_json(200, json!({"predicted_salary_usd": salary * 1000}));
        }
        let mut session = session_with(&transport);

        let content = (1..=10)
            .map(|i| profile_line(&format!("Role {}", i)))
            .collect::<Vec<_>>()
            .join("\n");

        let report = replay_lines(&mut session, &content).await;

        assert_eq!(report.recorded, 10);
        assert!(report.failures.is_empty());
        assert_eq!(session.history().len(), 10);

        let shown: Vec<&str> = session
            .history()
            .recent(3)
            .map(|entry| entry.profile.job_title.as_str())
            .collect();
        assert_eq!(shown, vec!["Role 10", "Role 9", "Role 8"]);
    }

    #[tokio::test]
    async fn test_empty_input_sends_nothing() {
        let transport = MockTransport::new();
        let mut session = session_with(&transport);

        let report = replay_lines(&mut session, "\n   \n").await;

        assert_eq!(report.recorded, 0);
        assert_eq!(report.submitted(), 0);
        assert_eq!(transport.call_count(), 0);
    }
}
