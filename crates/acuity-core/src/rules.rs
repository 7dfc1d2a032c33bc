use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::DefinitionError;
use crate::field::{FieldKind, FieldSpec};
use crate::formula::Expr;

/// Tolerance for floating-point comparisons on band edges and point
/// sub-ranges.
const EPS: f64 = 1e-9;

/// Declared codomain of a scorer, and the resolution at which adjacent
/// bands abut (e.g., 1.0 for integer point totals, 0.01 for FIB-4).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

/// A labeled sub-range of scores with interpretation text. Both bounds
/// are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    /// Static clinical guidance shown with the result. Opaque to the
    /// evaluator.
    pub guidance: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Band {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower && score <= self.upper
    }
}

/// How a point entry decides whether it applies to a field's value.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "criterion", rename_all = "snake_case")]
#[ts(export)]
pub enum Criterion {
    /// Inclusive numeric sub-range.
    Within { min: f64, max: f64 },
    /// Exact enum token.
    Is { token: String },
    /// Boolean state.
    Flag { set: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointEntry {
    pub when: Criterion,
    pub points: f64,
}

/// Per-field point contributions. Entries are tried in order and the
/// first match wins, so overlapping sub-ranges are resolved
/// deterministically.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointAllocation {
    pub field: String,
    pub entries: Vec<PointEntry>,
}

/// The scoring strategy of a rule set.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "strategy", rename_all = "snake_case")]
#[ts(export)]
pub enum Scorer {
    /// Sum of per-field contributions, each chosen by which sub-range,
    /// option, or flag state the field's value falls into.
    PointTable { allocations: Vec<PointAllocation> },
    /// Closed-form numeric expression over field values.
    Formula { expr: Expr },
}

/// Declarative definition of one clinical scoring instrument. Authored
/// once as static clinical knowledge and immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleSet {
    /// Stable identifier (e.g., "qsofa", "meld").
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Primary literature citation for the published instrument.
    pub reference: Option<String>,
    /// Declaration order is display and reporting order.
    pub fields: Vec<FieldSpec>,
    pub scorer: Scorer,
    pub score_range: ScoreRange,
    /// Ordered, non-overlapping partition of the score range.
    pub bands: Vec<Band>,
}

impl RuleSet {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check every structural invariant of the definition. Run once at
    /// load time; a rule set that passes cannot produce the
    /// internal-consistency failures the evaluator guards against.
    pub fn verify(&self) -> Result<(), Vec<DefinitionError>> {
        let mut errors = Vec::new();
        self.check_fields(&mut errors);
        self.check_scorer(&mut errors);
        self.check_bands(&mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn check_fields(&self, errors: &mut Vec<DefinitionError>) {
        let mut seen = BTreeSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.name.as_str()) {
                errors.push(DefinitionError::DuplicateField(spec.name.clone()));
            }
            match &spec.kind {
                FieldKind::Numeric { min, max } => {
                    if min > max {
                        errors.push(DefinitionError::InvertedDomain {
                            field: spec.name.clone(),
                            min: *min,
                            max: *max,
                        });
                    }
                }
                FieldKind::Integer { min, max } => {
                    if min > max {
                        errors.push(DefinitionError::InvertedDomain {
                            field: spec.name.clone(),
                            min: *min as f64,
                            max: *max as f64,
                        });
                    }
                }
                FieldKind::Boolean => {}
                FieldKind::Enum { options } => {
                    if options.is_empty() {
                        errors.push(DefinitionError::EmptyEnumDomain(spec.name.clone()));
                    }
                    let mut tokens = BTreeSet::new();
                    for token in options {
                        if !tokens.insert(token.as_str()) {
                            errors.push(DefinitionError::DuplicateOption {
                                field: spec.name.clone(),
                                token: token.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    fn check_scorer(&self, errors: &mut Vec<DefinitionError>) {
        match &self.scorer {
            Scorer::PointTable { allocations } => {
                let mut allocated = BTreeSet::new();
                for alloc in allocations {
                    if !allocated.insert(alloc.field.as_str()) {
                        errors.push(DefinitionError::DuplicateAllocation(alloc.field.clone()));
                        continue;
                    }
                    let Some(spec) = self.field(&alloc.field) else {
                        errors.push(DefinitionError::UnknownScorerField(alloc.field.clone()));
                        continue;
                    };
                    if alloc.entries.is_empty() {
                        errors.push(DefinitionError::EmptyAllocation(alloc.field.clone()));
                        continue;
                    }
                    check_allocation(spec, alloc, errors);
                }
                self.check_point_extrema(allocations, errors);
            }
            Scorer::Formula { expr } => {
                let referenced: BTreeSet<&str> = expr.referenced_fields().into_iter().collect();
                for name in referenced {
                    match self.field(name) {
                        None => {
                            errors.push(DefinitionError::UnknownScorerField(name.to_string()));
                        }
                        Some(spec) => {
                            if matches!(spec.kind, FieldKind::Enum { .. }) {
                                errors.push(DefinitionError::NonNumericFormulaField(
                                    name.to_string(),
                                ));
                            }
                            if !spec.required {
                                errors
                                    .push(DefinitionError::OptionalFormulaField(name.to_string()));
                            }
                        }
                    }
                }
            }
        }
    }

    /// The reachable sum extrema of a point table must lie inside the
    /// declared score range, or the band coverage guarantee is void.
    fn check_point_extrema(
        &self,
        allocations: &[PointAllocation],
        errors: &mut Vec<DefinitionError>,
    ) {
        let mut lo = 0.0;
        let mut hi = 0.0;
        for alloc in allocations {
            if alloc.entries.is_empty() {
                continue;
            }
            let mut emin = f64::INFINITY;
            let mut emax = f64::NEG_INFINITY;
            for entry in &alloc.entries {
                emin = emin.min(entry.points);
                emax = emax.max(entry.points);
            }
            // An optional field can be absent, contributing 0.
            if self.field(&alloc.field).is_some_and(|s| !s.required) {
                emin = emin.min(0.0);
                emax = emax.max(0.0);
            }
            lo += emin;
            hi += emax;
        }
        if lo + EPS < self.score_range.min || hi - EPS > self.score_range.max {
            errors.push(DefinitionError::ScoreRangeMismatch { min: lo, max: hi });
        }
    }

    fn check_bands(&self, errors: &mut Vec<DefinitionError>) {
        if self.bands.is_empty() {
            errors.push(DefinitionError::NoBands);
            return;
        }
        for band in &self.bands {
            if band.lower > band.upper {
                errors.push(DefinitionError::InvertedBand(band.label.clone()));
            }
        }
        let step = self.score_range.step.unwrap_or(0.0);
        for pair in self.bands.windows(2) {
            let gap = pair[1].lower - pair[0].upper;
            if gap < -EPS {
                errors.push(DefinitionError::BandOverlap {
                    first: pair[0].label.clone(),
                    second: pair[1].label.clone(),
                });
            } else if gap > step + EPS {
                errors.push(DefinitionError::BandGap {
                    first: pair[0].label.clone(),
                    second: pair[1].label.clone(),
                });
            }
        }
        let first = &self.bands[0];
        let last = self.bands.last().unwrap_or(first);
        if first.lower > self.score_range.min + EPS || last.upper + EPS < self.score_range.max {
            errors.push(DefinitionError::BandCoverage {
                min: self.score_range.min,
                max: self.score_range.max,
            });
        }
    }
}

/// Kind-specific checks for one point allocation: criterion shape, token
/// validity, and full coverage of the field's domain.
fn check_allocation(spec: &FieldSpec, alloc: &PointAllocation, errors: &mut Vec<DefinitionError>) {
    match &spec.kind {
        FieldKind::Boolean => {
            let mut covered = [false, false];
            for entry in &alloc.entries {
                match &entry.when {
                    Criterion::Flag { set } => covered[usize::from(*set)] = true,
                    _ => {
                        errors.push(DefinitionError::CriterionMismatch(spec.name.clone()));
                        return;
                    }
                }
            }
            if !covered[0] || !covered[1] {
                errors.push(DefinitionError::PointTableGap(spec.name.clone()));
            }
        }
        FieldKind::Enum { options } => {
            let mut covered = BTreeSet::new();
            for entry in &alloc.entries {
                match &entry.when {
                    Criterion::Is { token } => {
                        if !options.contains(token) {
                            errors.push(DefinitionError::UnknownCriterionToken {
                                field: spec.name.clone(),
                                token: token.clone(),
                            });
                        }
                        covered.insert(token.as_str());
                    }
                    _ => {
                        errors.push(DefinitionError::CriterionMismatch(spec.name.clone()));
                        return;
                    }
                }
            }
            if options.iter().any(|o| !covered.contains(o.as_str())) {
                errors.push(DefinitionError::PointTableGap(spec.name.clone()));
            }
        }
        FieldKind::Numeric { min, max } => {
            check_range_cover(spec, alloc, *min, *max, 0.0, errors);
        }
        FieldKind::Integer { min, max } => {
            check_range_cover(spec, alloc, *min as f64, *max as f64, 1.0, errors);
        }
    }
}

/// Sub-ranges must cover [dmin, dmax] with no hole wider than the
/// domain's granularity (0 for real-valued fields, 1 for integers).
fn check_range_cover(
    spec: &FieldSpec,
    alloc: &PointAllocation,
    dmin: f64,
    dmax: f64,
    gap_allow: f64,
    errors: &mut Vec<DefinitionError>,
) {
    let mut ranges = Vec::with_capacity(alloc.entries.len());
    for entry in &alloc.entries {
        match &entry.when {
            Criterion::Within { min, max } => ranges.push((*min, *max)),
            _ => {
                errors.push(DefinitionError::CriterionMismatch(spec.name.clone()));
                return;
            }
        }
    }
    ranges.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut reach = f64::NEG_INFINITY;
    for (lo, hi) in ranges {
        let threshold = if reach == f64::NEG_INFINITY {
            dmin
        } else {
            reach + gap_allow
        };
        if lo > threshold + EPS {
            errors.push(DefinitionError::PointTableGap(spec.name.clone()));
            return;
        }
        reach = reach.max(hi);
    }
    if reach + EPS < dmax {
        errors.push(DefinitionError::PointTableGap(spec.name.clone()));
    }
}
