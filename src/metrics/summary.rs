//! Human-readable summary of an association.

use std::fmt;

use serde::Serialize;

use crate::accounting::Accounting;
use crate::utils::quantile;

/// Distribution of per-true-object match counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchCountSummary {
    pub min: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: usize,
    pub mean: f64,
}

impl MatchCountSummary {
    /// Summarize match counts; `None` when there are no true objects.
    pub fn from_counts(counts: &[usize]) -> Option<Self> {
        let mut sorted: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        sorted.sort_by(f64::total_cmp);

        let q = |p| quantile(&sorted, p);
        Some(Self {
            min: *counts.iter().min()?,
            q1: q(0.25)?,
            median: q(0.5)?,
            q3: q(0.75)?,
            max: *counts.iter().max()?,
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

impl fmt::Display for MatchCountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {}, q1 {}, median {}, q3 {}, max {} (IQR {})",
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
            self.iqr()
        )
    }
}

/// One-line summary: lost count, found count and the match-count distribution.
pub fn summary_line<S: Accounting + ?Sized>(source: &S) -> String {
    let counts = match MatchCountSummary::from_counts(&source.match_counts()) {
        Some(summary) => summary.to_string(),
        None => "n/a".to_string(),
    };
    format!(
        "lost: {}, found: {}, match counts: {}",
        source.lost().len(),
        source.found().len(),
        counts
    )
}
