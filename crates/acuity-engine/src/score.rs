use acuity_core::field::{FieldValue, TypedValues};
use acuity_core::formula::Expr;
use acuity_core::rules::{Criterion, RuleSet, Scorer};

use crate::error::EvalError;

/// Compute the score for already-validated values.
///
/// On input that passed `validate` against a verified rule set this
/// cannot fail; the error paths cover internal inconsistencies between
/// a rule set's fields and its scorer, which are authoring defects.
pub fn score(rules: &RuleSet, typed: &TypedValues) -> Result<f64, EvalError> {
    match &rules.scorer {
        Scorer::PointTable { allocations } => {
            let mut total = 0.0;
            for alloc in allocations {
                // An absent optional field contributes nothing.
                let Some(value) = typed.get(&alloc.field) else {
                    continue;
                };
                match alloc.entries.iter().find(|e| matches(&e.when, value)) {
                    Some(entry) => total += entry.points,
                    None => {
                        tracing::error!(
                            rule_set = %rules.id,
                            field = %alloc.field,
                            "validated value matched no point entry"
                        );
                        return Err(EvalError::NoMatchingPointEntry {
                            rule_set: rules.id.clone(),
                            field: alloc.field.clone(),
                        });
                    }
                }
            }
            Ok(total)
        }
        Scorer::Formula { expr } => eval(expr, rules, typed),
    }
}

fn matches(when: &Criterion, value: &FieldValue) -> bool {
    match (when, value) {
        (Criterion::Within { min, max }, FieldValue::Number(n)) => n >= min && n <= max,
        (Criterion::Is { token }, FieldValue::Token(t)) => token == t,
        (Criterion::Flag { set }, FieldValue::Bool(b)) => set == b,
        _ => false,
    }
}

fn eval(expr: &Expr, rules: &RuleSet, typed: &TypedValues) -> Result<f64, EvalError> {
    Ok(match expr {
        Expr::Field { name } => typed
            .get(name)
            .and_then(FieldValue::numeric)
            .ok_or_else(|| {
                tracing::error!(
                    rule_set = %rules.id,
                    field = %name,
                    "formula input missing or not numeric"
                );
                EvalError::MissingFormulaInput {
                    rule_set: rules.id.clone(),
                    field: name.clone(),
                }
            })?,
        Expr::Const { value } => *value,
        Expr::Add { terms } => {
            let mut sum = 0.0;
            for term in terms {
                sum += eval(term, rules, typed)?;
            }
            sum
        }
        Expr::Sub { lhs, rhs } => eval(lhs, rules, typed)? - eval(rhs, rules, typed)?,
        Expr::Mul { factors } => {
            let mut product = 1.0;
            for factor in factors {
                product *= eval(factor, rules, typed)?;
            }
            product
        }
        Expr::Div { num, den } => eval(num, rules, typed)? / eval(den, rules, typed)?,
        Expr::Ln { arg } => eval(arg, rules, typed)?.ln(),
        Expr::Sqrt { arg } => eval(arg, rules, typed)?.sqrt(),
        Expr::Clamp { arg, min, max } => eval(arg, rules, typed)?.clamp(*min, *max),
        Expr::Round { arg, decimals } => {
            let factor = 10f64.powi(*decimals as i32);
            (eval(arg, rules, typed)? * factor).round() / factor
        }
    })
}
