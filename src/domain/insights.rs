//! Read-only dataset views served by `/analyze` and `/explain`

use serde::{Deserialize, Serialize};

/// Aggregate statistics over the training data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub average_salary: f64,
    #[serde(default)]
    pub max_salary: f64,
}

/// Model feature weight as reported by `/explain`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeResponse {
    pub summary: DatasetSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplainResponse {
    #[serde(default)]
    pub top_features: Vec<FeatureImportance>,
}
