//! Push-based observability for SmartPay
//!
//! Metrics are kept in a local Prometheus registry and pushed out as a
//! structured JSON line on stdout. Nothing listens for incoming requests.

pub mod latency_tracker;
pub mod metrics;
pub mod reporter;

pub use latency_tracker::LatencyGuard;
pub use metrics::Metrics;
pub use reporter::MetricsReporter;
