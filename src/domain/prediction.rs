//! Prediction result value object
//!
//! The service contract is loose: the point estimate and both bounds may
//! appear under several names, or not at all. Each logical value has an
//! ordered alias table, resolved once when the response is decoded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Accepted names for the point estimate, highest precedence first
pub const PREDICTED_ALIASES: [&str; 2] = ["predicted_salary_usd", "predicted_salary"];
/// Accepted names for the lower bound, highest precedence first
pub const LOW_ALIASES: [&str; 2] = ["low", "low_usd"];
/// Accepted names for the upper bound, highest precedence first
pub const HIGH_ALIASES: [&str; 2] = ["high", "high_usd"];

pub const LOW_BAND_FACTOR: f64 = 0.85;
pub const HIGH_BAND_FACTOR: f64 = 1.15;

/// Annual salary estimate with its range band (USD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted: f64,
    pub low: f64,
    pub high: f64,
}

impl PredictionResult {
    /// Build a result from a point estimate, deriving the ±15% band.
    pub fn from_point(predicted: f64) -> Self {
        Self {
            predicted,
            low: predicted * LOW_BAND_FACTOR,
            high: predicted * HIGH_BAND_FACTOR,
        }
    }

    /// Resolve a `/predict` response object.
    ///
    /// A missing or zero point estimate resolves to `0`. Each bound falls
    /// back to the derived band independently of the other.
    pub fn from_response(fields: &Map<String, Value>) -> Self {
        let predicted = resolve_alias(fields, &PREDICTED_ALIASES).unwrap_or(0.0);
        let derived = Self::from_point(predicted);

        Self {
            predicted,
            low: resolve_alias(fields, &LOW_ALIASES).unwrap_or(derived.low),
            high: resolve_alias(fields, &HIGH_ALIASES).unwrap_or(derived.high),
        }
    }

    /// `low <= predicted <= high`; the service does not guarantee it.
    pub fn is_well_ordered(&self) -> bool {
        self.low <= self.predicted && self.predicted <= self.high
    }

}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            format_usd(self.predicted),
            format_usd(self.low),
            format_usd(self.high)
        )
    }
}

/// First alias holding a usable amount.
fn resolve_alias(fields: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|name| fields.get(*name).and_then(amount))
}

/// Numbers and numeric strings are amounts. Numeric zero and anything else
/// count as absent, so the next alias is tried.
fn amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| *v != 0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Render a dollar amount rounded to whole units with thousands separators.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}", sign, grouped)
}
