use serde::{Deserialize, Serialize};

use super::enums::{Category, RangeOp};

/// Normalized reference range as printed on a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReferenceRange {
    /// Textual form "low - high".
    Bounded { low: f64, high: f64 },
    /// Textual form "<threshold" or ">threshold", no separator.
    OneSided { op: RangeOp, threshold: f64 },
}

impl ReferenceRange {
    /// Classify a value against this range.
    ///
    /// One-sided ranges flag on the open side only: a value under a
    /// "less-than" ceiling is never Low, and a value over a
    /// "greater-than" floor is never High.
    pub fn classify(&self, value: f64) -> Category {
        match self {
            Self::Bounded { low, high } => {
                if value < *low {
                    Category::Low
                } else if value > *high {
                    Category::High
                } else {
                    Category::Normal
                }
            }
            Self::OneSided {
                op: RangeOp::LessThan,
                threshold,
            } => {
                if value > *threshold {
                    Category::High
                } else {
                    Category::Normal
                }
            }
            Self::OneSided {
                op: RangeOp::GreaterThan,
                threshold,
            } => {
                if value < *threshold {
                    Category::Low
                } else {
                    Category::Normal
                }
            }
        }
    }

    /// The (low, high) pair used to annotate a chart region.
    /// One-sided ranges have no bound on their open side.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Bounded { low, high } => (Some(*low), Some(*high)),
            Self::OneSided {
                op: RangeOp::LessThan,
                threshold,
            } => (None, Some(*threshold)),
            Self::OneSided {
                op: RangeOp::GreaterThan,
                threshold,
            } => (Some(*threshold), None),
        }
    }
}
