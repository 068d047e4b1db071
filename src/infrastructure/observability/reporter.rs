//! Push-based metrics reporter for SmartPay
//!
//! Outputs a metrics snapshot as a structured JSON line on stderr, keeping
//! stdout for command results.

use crate::domain::history::PredictionHistory;
use crate::domain::prediction::PredictionResult;
use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: f64,
    pub version: String,
    pub predictions: PredictionStats,
    pub history: HistorySnapshot,
}

#[derive(Serialize)]
pub struct PredictionStats {
    pub succeeded: u64,
    pub configuration_errors: u64,
    pub network_errors: u64,
    pub remote_errors: u64,
}

#[derive(Serialize)]
pub struct HistorySnapshot {
    pub entries: usize,
    pub latest: Option<PredictionResult>,
}

pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
        }
    }

    /// Emit one `METRICS_JSON:` line for the given session history
    pub fn report_once(&self, history: &PredictionHistory) {
        let snapshot = self.collect_snapshot(history);
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                // Prefix keeps the line easy to filter out of mixed output
                eprintln!("METRICS_JSON:{}", json);
                info!(
                    "Predictions: {} ok / {} failed | History: {} | Uptime: {:.3}s",
                    snapshot.predictions.succeeded,
                    snapshot.predictions.configuration_errors
                        + snapshot.predictions.network_errors
                        + snapshot.predictions.remote_errors,
                    snapshot.history.entries,
                    snapshot.uptime_seconds
                );
            }
            Err(e) => warn!("Failed to serialize metrics: {}", e),
        }
    }

    pub fn collect_snapshot(&self, history: &PredictionHistory) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs_f64();
        let latest = history.latest().map(|entry| entry.result);

        self.metrics.uptime_seconds.set(uptime);
        self.metrics.history_entries.set(history.len() as f64);
        if let Some(result) = latest {
            self.metrics.last_prediction_usd.set(result.predicted);
        }

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            predictions: PredictionStats {
                succeeded: self.metrics.prediction_count("success"),
                configuration_errors: self.metrics.prediction_count("configuration_error"),
                network_errors: self.metrics.prediction_count("network_error"),
                remote_errors: self.metrics.prediction_count("remote_error"),
            },
            history: HistorySnapshot {
                entries: history.len(),
                latest,
            },
        }
    }
}
