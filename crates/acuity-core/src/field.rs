use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Declared shape and domain of one clinical input.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    /// Unique identifier within a rule set.
    pub name: String,
    /// Display name shown next to the form widget.
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Clinical unit (e.g., "mg/dL"), where one applies.
    pub unit: Option<String>,
    pub description: Option<String>,
}

/// The kind of value a field accepts, carrying its own domain.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Real-valued measurement within an inclusive range.
    Numeric { min: f64, max: f64 },
    /// Whole-valued measurement within an inclusive range.
    Integer { min: i64, max: i64 },
    /// Present/absent finding.
    Boolean,
    /// Exactly one token out of a fixed set of options.
    Enum { options: Vec<String> },
}

/// A coerced, typed input value as used for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Token(String),
}

impl FieldValue {
    /// The value as seen by a formula. Booleans read as 1.0 / 0.0;
    /// enum tokens have no numeric reading.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Token(_) => None,
        }
    }
}

/// Raw form input: field name to whatever JSON the UI collected
/// (string-typed numbers, option tokens, checkbox booleans).
pub type RawValues = BTreeMap<String, serde_json::Value>;

/// Validated input: field name to coerced value. Doubles as the field
/// echoes of an evaluation result.
pub type TypedValues = BTreeMap<String, FieldValue>;
