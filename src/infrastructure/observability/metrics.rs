//! Prometheus metrics definitions for SmartPay
//!
//! All metrics use the `smartpay_` prefix and are read-only.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the prediction client
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// `/predict` calls by outcome (success, configuration_error, network_error, remote_error)
    pub predictions_total: CounterVec,
    /// Request latency per endpoint in seconds
    pub request_latency_seconds: HistogramVec,
    /// Entries in the session history
    pub history_entries: GenericGauge<AtomicF64>,
    /// Most recent point estimate in USD
    pub last_prediction_usd: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new(
                "smartpay_predictions_total",
                "Prediction requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let request_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "smartpay_request_latency_seconds",
                "Backend request latency in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_latency_seconds.clone()))?;

        let history_entries = Gauge::with_opts(Opts::new(
            "smartpay_history_entries",
            "Predictions recorded in the current session",
        ))?;
        registry.register(Box::new(history_entries.clone()))?;

        let last_prediction_usd = Gauge::with_opts(Opts::new(
            "smartpay_last_prediction_usd",
            "Most recent predicted salary in USD",
        ))?;
        registry.register(Box::new(last_prediction_usd.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "smartpay_uptime_seconds",
            "Process uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            predictions_total,
            request_latency_seconds,
            history_entries,
            last_prediction_usd,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_predictions(&self, outcome: &str) {
        self.predictions_total.with_label_values(&[outcome]).inc();
    }

    pub fn prediction_count(&self, outcome: &str) -> u64 {
        self.predictions_total.with_label_values(&[outcome]).get() as u64
    }
}
