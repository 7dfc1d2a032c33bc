use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// One field's validation failure. The form layer renders these as
/// inline messages next to the offending widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "error", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldError {
    #[error("required field '{field}' is missing")]
    MissingField { field: String },

    #[error("field '{field}' is not a number")]
    NotANumber { field: String },

    #[error("field '{field}' must be a whole number")]
    NotAnInteger { field: String },

    #[error("field '{field}' value {value} is outside [{min}, {max}]")]
    OutOfDomain {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field '{field}' has no option '{token}'")]
    InvalidOption {
        field: String,
        token: String,
        allowed: Vec<String>,
    },
}

/// Why an evaluation failed. `Invalid` is the user's input; the other
/// variants mean the rule set itself is defective and are additionally
/// logged at error level, since no change of input can fix them.
#[derive(Debug, Clone, PartialEq, Serialize, TS, Error)]
#[serde(tag = "error", rename_all = "snake_case")]
#[ts(export)]
pub enum EvalError {
    #[error("{n} field(s) failed validation", n = .fields.len())]
    Invalid { fields: Vec<FieldError> },

    #[error("score {score} matched no band in rule set '{rule_set}'")]
    UnbandedScore { rule_set: String, score: f64 },

    #[error("value for field '{field}' matched no point entry in rule set '{rule_set}'")]
    NoMatchingPointEntry { rule_set: String, field: String },

    #[error("formula input '{field}' is missing or not numeric in rule set '{rule_set}'")]
    MissingFormulaInput { rule_set: String, field: String },
}
