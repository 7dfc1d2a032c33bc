use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::field::TypedValues;
use crate::rules::Band;

/// Output of one evaluation. Created per call and never mutated; carries
/// no timestamp, so identical inputs produce identical results.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationResult {
    /// Id of the rule set that produced this result.
    pub rule_set: String,
    pub score: f64,
    /// The matched interpretation band.
    pub band: Band,
    /// The validated, coerced input values actually used.
    pub echoes: TypedValues,
}
