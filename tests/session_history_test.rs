mod common;

use serde_json::json;
use smartpay::application::{PredictionClient, PredictionSession, SubmissionState};
use smartpay::config::BackendEnvConfig;
use smartpay::domain::errors::PredictionError;
use smartpay::infrastructure::MockTransport;
use std::sync::Arc;

fn client_for(transport: &MockTransport) -> PredictionClient {
    PredictionClient::new(
        &BackendEnvConfig::new("http://localhost:8000", Some("test_key_456")),
        Arc::new(transport.clone()),
    )
}

#[tokio::test]
async fn history_is_newest_first_after_three_submissions() {
    let transport = MockTransport::new();
    transport
        .respond_json(200, json!({"predicted_salary_usd": 70000}))
        .respond_json(200, json!({"predicted_salary_usd": 85000}))
        .respond_json(200, json!({"predicted_salary_usd": 99000}));
    let mut session = PredictionSession::new(client_for(&transport));

    for title in ["Analyst", "Data Engineer", "ML Engineer"] {
        session.submit(common::profile(title)).await.unwrap();

        // Newest-first must hold after every submission, not just the last
        let latest = session.history().latest().unwrap();
        assert_eq!(latest.profile.job_title, title);
        assert_eq!(Some(&latest.result), session.last_result());
    }

    let titles: Vec<&str> = session
        .history()
        .iter()
        .map(|e| e.profile.job_title.as_str())
        .collect();
    assert_eq!(titles, vec!["ML Engineer", "Data Engineer", "Analyst"]);
    assert_eq!(session.history().latest().unwrap().result.predicted, 99000.0);

    let timestamps: Vec<_> = session.history().iter().map(|e| e.timestamp).collect();
    assert!(timestamps.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn failed_submission_does_not_touch_history() {
    let transport = MockTransport::new();
    transport
        .respond_json(200, json!({"predicted_salary_usd": 70000}))
        .fail("dns error: no such host");
    let mut session = PredictionSession::new(client_for(&transport));

    session.submit(common::profile("Analyst")).await.unwrap();
    let err = session.submit(common::profile("Analyst")).await.unwrap_err();

    assert!(matches!(err, PredictionError::Network { .. }));
    assert_eq!(session.state(), SubmissionState::Failed);
    assert_eq!(session.history().len(), 1);

    // The session stays usable after a failure
    transport.respond_json(200, json!({"predicted_salary_usd": 72000}));
    session.submit(common::profile("Analyst")).await.unwrap();
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn sessions_sharing_a_client_keep_separate_histories() {
    let transport = MockTransport::new();
    transport
        .respond_json(200, json!({"predicted_salary_usd": 50000}))
        .respond_json(200, json!({"predicted_salary_usd": 60000}))
        .respond_json(200, json!({"predicted_salary_usd": 70000}));
    let client = client_for(&transport);

    let mut alice = PredictionSession::new(client.clone());
    let mut bob = PredictionSession::new(client);

    alice.submit(common::profile("Designer")).await.unwrap();
    bob.submit(common::profile("Nurse")).await.unwrap();
    alice.submit(common::profile("Designer")).await.unwrap();

    assert_eq!(alice.history().len(), 2);
    assert_eq!(bob.history().len(), 1);
    assert!(bob.history().iter().all(|e| e.profile.job_title == "Nurse"));
    assert_eq!(bob.last_result().unwrap().predicted, 60000.0);
}

#[tokio::test]
async fn concurrent_submissions_are_isolated() {
    let transport = MockTransport::new();
    for _ in 0..4 {
        transport.respond_json(200, json!({"predicted_salary_usd": 1000}));
    }
    let client = client_for(&transport);

    let titles = ["A", "B", "C", "D"];
    let handles: Vec<_> = titles
        .iter()
        .map(|title| {
            let client = client.clone();
            let profile = common::profile(title);
            tokio::spawn(async move { client.submit(&profile).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let mut sent: Vec<String> = transport
        .requests()
        .into_iter()
        .map(|r| r.body.unwrap()["job_title"].as_str().unwrap().to_string())
        .collect();
    sent.sort();
    assert_eq!(sent, vec!["A", "B", "C", "D"]);
    assert!(
        transport
            .requests()
            .iter()
            .all(|r| r.header("x-api-key") == Some("test_key_456"))
    );
}
