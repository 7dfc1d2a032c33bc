use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Closed-form scoring expression over field values.
///
/// Clamping and rounding are part of each instrument's published
/// definition and are authored into its expression here; the evaluator
/// never applies them on its own.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "snake_case")]
#[ts(export)]
pub enum Expr {
    /// The value of a named field. Booleans read as 1.0 / 0.0.
    Field { name: String },
    Const { value: f64 },
    Add { terms: Vec<Expr> },
    Sub { lhs: Box<Expr>, rhs: Box<Expr> },
    Mul { factors: Vec<Expr> },
    Div { num: Box<Expr>, den: Box<Expr> },
    /// Natural logarithm.
    Ln { arg: Box<Expr> },
    Sqrt { arg: Box<Expr> },
    /// Restrict the argument to an inclusive range.
    Clamp { arg: Box<Expr>, min: f64, max: f64 },
    /// Round to the given number of decimal places.
    Round { arg: Box<Expr>, decimals: u32 },
}

impl Expr {
    pub fn field(name: &str) -> Self {
        Expr::Field {
            name: name.to_string(),
        }
    }

    pub fn constant(value: f64) -> Self {
        Expr::Const { value }
    }

    pub fn add(terms: Vec<Expr>) -> Self {
        Expr::Add { terms }
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn mul(factors: Vec<Expr>) -> Self {
        Expr::Mul { factors }
    }

    pub fn div(num: Expr, den: Expr) -> Self {
        Expr::Div {
            num: Box::new(num),
            den: Box::new(den),
        }
    }

    pub fn ln(arg: Expr) -> Self {
        Expr::Ln { arg: Box::new(arg) }
    }

    pub fn sqrt(arg: Expr) -> Self {
        Expr::Sqrt { arg: Box::new(arg) }
    }

    pub fn clamp(arg: Expr, min: f64, max: f64) -> Self {
        Expr::Clamp {
            arg: Box::new(arg),
            min,
            max,
        }
    }

    pub fn round(arg: Expr, decimals: u32) -> Self {
        Expr::Round {
            arg: Box::new(arg),
            decimals,
        }
    }

    /// Every field name referenced anywhere in the expression.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_fields(&mut names);
        names
    }

    fn collect_fields<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Field { name } => names.push(name),
            Expr::Const { .. } => {}
            Expr::Add { terms } | Expr::Mul { factors: terms } => {
                for term in terms {
                    term.collect_fields(names);
                }
            }
            Expr::Sub { lhs, rhs } => {
                lhs.collect_fields(names);
                rhs.collect_fields(names);
            }
            Expr::Div { num, den } => {
                num.collect_fields(names);
                den.collect_fields(names);
            }
            Expr::Ln { arg } | Expr::Sqrt { arg } => arg.collect_fields(names),
            Expr::Clamp { arg, .. } | Expr::Round { arg, .. } => arg.collect_fields(names),
        }
    }
}
