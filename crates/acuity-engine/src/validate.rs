use acuity_core::field::{FieldKind, FieldSpec, FieldValue, RawValues, TypedValues};
use acuity_core::rules::RuleSet;
use serde_json::Value;

use crate::error::FieldError;

/// Validate raw form input against a rule set's field specs, coercing
/// string-typed numbers and checkbox booleans into typed values.
///
/// Every failing field is reported, not just the first. Fields are
/// checked in declaration order, so errors come back in display order.
/// Keys that match no declared field are ignored.
pub fn validate(rules: &RuleSet, values: &RawValues) -> Result<TypedValues, Vec<FieldError>> {
    let mut typed = TypedValues::new();
    let mut errors = Vec::new();

    for spec in &rules.fields {
        match check_field(spec, values.get(&spec.name)) {
            Ok(Some(value)) => {
                typed.insert(spec.name.clone(), value);
            }
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() { Ok(typed) } else { Err(errors) }
}

/// At most one error is reported per field; later checks only run once
/// earlier ones pass (a non-number is never also out of domain).
fn check_field(spec: &FieldSpec, raw: Option<&Value>) -> Result<Option<FieldValue>, FieldError> {
    // Null and whitespace-only strings count as absent.
    let raw = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => Some(value),
    };

    let Some(raw) = raw else {
        if spec.required {
            return Err(FieldError::MissingField {
                field: spec.name.clone(),
            });
        }
        // An unchecked checkbox arrives as an absent key.
        return Ok(match spec.kind {
            FieldKind::Boolean => Some(FieldValue::Bool(false)),
            _ => None,
        });
    };

    match &spec.kind {
        FieldKind::Numeric { min, max } => {
            let number = coerce_number(raw).ok_or_else(|| FieldError::NotANumber {
                field: spec.name.clone(),
            })?;
            check_domain(spec, number, *min, *max)?;
            Ok(Some(FieldValue::Number(number)))
        }
        FieldKind::Integer { min, max } => {
            let number = coerce_number(raw).ok_or_else(|| FieldError::NotANumber {
                field: spec.name.clone(),
            })?;
            if number.fract() != 0.0 {
                return Err(FieldError::NotAnInteger {
                    field: spec.name.clone(),
                });
            }
            check_domain(spec, number, *min as f64, *max as f64)?;
            Ok(Some(FieldValue::Number(number)))
        }
        FieldKind::Enum { options } => {
            let token = match raw {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            if options.contains(&token) {
                Ok(Some(FieldValue::Token(token)))
            } else {
                Err(FieldError::InvalidOption {
                    field: spec.name.clone(),
                    token,
                    allowed: options.clone(),
                })
            }
        }
        FieldKind::Boolean => match raw {
            Value::Bool(b) => Ok(Some(FieldValue::Bool(*b))),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => {
                Ok(Some(FieldValue::Bool(true)))
            }
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => {
                Ok(Some(FieldValue::Bool(false)))
            }
            // The boolean domain is the implicit {true, false} option set.
            other => Err(FieldError::InvalidOption {
                field: spec.name.clone(),
                token: other.to_string(),
                allowed: vec!["true".to_string(), "false".to_string()],
            }),
        },
    }
}

fn check_domain(spec: &FieldSpec, value: f64, min: f64, max: f64) -> Result<(), FieldError> {
    if value < min || value > max {
        return Err(FieldError::OutOfDomain {
            field: spec.name.clone(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    // "NaN" and "inf" parse, but are never valid clinical input.
    number.is_finite().then_some(number)
}
