use crate::domain::prediction::{PredictionResult, format_usd};
use crate::domain::profile::CandidateProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// One completed prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub profile: CandidateProfile,
    pub result: PredictionResult,
}

impl HistoryEntry {
    pub fn new(profile: CandidateProfile, result: PredictionResult) -> Self {
        Self::at(Utc::now(), profile, result)
    }

    pub fn at(timestamp: DateTime<Utc>, profile: CandidateProfile, result: PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            profile,
            result,
        }
    }

    /// First block of the id, enough to tell entries apart in a listing
    pub fn short_id(&self) -> String {
        let mut id = self.id.simple().to_string();
        id.truncate(8);
        id
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            format_usd(self.result.predicted),
            self.profile.job_title,
            self.timestamp.format("%b %d %Y %I:%M %p")
        )
    }
}

/// Session-local prediction log, newest first
///
/// Growth is unbounded; [`PredictionHistory::recent`] is only a display cut.
#[derive(Debug, Clone, Default)]
pub struct PredictionHistory {
    entries: VecDeque<HistoryEntry>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front and return the stored entry.
    pub fn record(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        &self.entries[0]
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// At most `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
