//! Snapshot of every accounting output and metric for one association.

use std::fmt;

use serde::Serialize;

use super::{MatchCountSummary, Scorer};
use crate::accounting::Accounting;
use crate::objects::ObjectId;

/// Everything a reporting layer consumes for one match set.
///
/// Undefined ratios (no predictions, no true objects) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    /// Number of true objects
    pub num_true: usize,
    /// Number of predicted objects
    pub num_pred: usize,
    /// True ids with no match
    pub lost: Vec<ObjectId>,
    /// Predicted ids with no match
    pub found: Vec<ObjectId>,
    /// Matches per true object, in true-id order
    pub match_counts: Vec<usize>,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    /// Distribution of `match_counts`
    pub match_count_summary: Option<MatchCountSummary>,
}

impl MatchReport {
    /// Compute the report from any accounting source.
    pub fn from_accounting<S: Accounting + ?Sized>(source: &S) -> Self {
        let scorer = Scorer::new(source);
        let match_counts = source.match_counts();

        Self {
            num_true: source.num_true(),
            num_pred: source.num_pred(),
            lost: source.lost(),
            found: source.found(),
            match_count_summary: MatchCountSummary::from_counts(&match_counts),
            match_counts,
            true_positives: scorer.true_positive_count(),
            false_positives: scorer.false_positive_count(),
            false_negatives: scorer.false_negative_count(),
            precision: scorer.precision().ok(),
            recall: scorer.recall().ok(),
            f1_score: scorer.f1_score().ok(),
        }
    }
}

fn ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "undefined".to_string(),
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "true objects:      {}", self.num_true)?;
        writeln!(f, "predicted objects: {}", self.num_pred)?;
        writeln!(f, "lost:              {}", self.lost.len())?;
        writeln!(f, "found:             {}", self.found.len())?;
        writeln!(
            f,
            "tp / fp / fn:      {} / {} / {}",
            self.true_positives, self.false_positives, self.false_negatives
        )?;
        writeln!(f, "precision:         {}", ratio(self.precision))?;
        writeln!(f, "recall:            {}", ratio(self.recall))?;
        writeln!(f, "f1 score:          {}", ratio(self.f1_score))?;
        match &self.match_count_summary {
            Some(summary) => write!(f, "match counts:      {}", summary),
            None => write!(f, "match counts:      n/a"),
        }
    }
}
