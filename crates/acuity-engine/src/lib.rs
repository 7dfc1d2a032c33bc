//! acuity-engine
//!
//! The rule-scoring evaluator: validate raw input against a rule set,
//! compute the score via the declared strategy, select the matching
//! interpretation band. Pure and synchronous — rule sets are read-only
//! configuration, every call is independent, and nothing here performs
//! I/O, so concurrent evaluation needs no coordination.

pub mod error;
pub mod interpret;
pub mod score;
pub mod validate;

use acuity_core::field::RawValues;
use acuity_core::result::EvaluationResult;
use acuity_core::rules::RuleSet;

use crate::error::EvalError;

pub use crate::interpret::interpret;
pub use crate::score::score;
pub use crate::validate::validate;

/// Validate, score, and interpret in one call.
///
/// Returns a structured error on the first failing stage; validation
/// itself reports every failing field at once.
pub fn evaluate(rules: &RuleSet, values: &RawValues) -> Result<EvaluationResult, EvalError> {
    let typed = validate::validate(rules, values).map_err(|fields| EvalError::Invalid { fields })?;
    let score = score::score(rules, &typed)?;
    let band = interpret::interpret(rules, score)?;
    Ok(EvaluationResult {
        rule_set: rules.id.clone(),
        score,
        band: band.clone(),
        echoes: typed,
    })
}
