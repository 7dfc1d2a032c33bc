//! acuity-history
//!
//! Local cache of past evaluation results keyed by rule set, for trend
//! display. The evaluator neither reads nor writes this store; the host
//! application records results and owns where the JSON dump is
//! persisted.

pub mod error;

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use acuity_core::result::EvaluationResult;

use crate::error::HistoryError;

/// One recorded evaluation, reduced to what a trend chart needs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendEntry {
    pub id: Uuid,
    pub rule_set: String,
    pub score: f64,
    pub band_label: String,
    pub recorded_at: Timestamp,
}

/// In-memory store of past results, keyed by rule set id. Entries keep
/// insertion order within a rule set.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrendStore {
    entries: BTreeMap<String, Vec<TrendEntry>>,
}

impl TrendStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result. The caller supplies the timestamp so recording
    /// stays deterministic under test.
    pub fn record(&mut self, result: &EvaluationResult, recorded_at: Timestamp) -> Uuid {
        let entry = TrendEntry {
            id: Uuid::new_v4(),
            rule_set: result.rule_set.clone(),
            score: result.score,
            band_label: result.band.label.clone(),
            recorded_at,
        };
        let id = entry.id;
        self.entries
            .entry(result.rule_set.clone())
            .or_default()
            .push(entry);
        id
    }

    /// Past results for one rule set, oldest first.
    pub fn history(&self, rule_set: &str) -> &[TrendEntry] {
        self.entries.get(rule_set).map_or(&[], Vec::as_slice)
    }

    pub fn latest(&self, rule_set: &str) -> Option<&TrendEntry> {
        self.history(rule_set).last()
    }

    pub fn clear(&mut self, rule_set: &str) {
        self.entries.remove(rule_set);
    }

    /// Dump the store as pretty JSON for the host to persist.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }
}
