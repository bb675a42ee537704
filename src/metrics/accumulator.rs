//! Batch accumulation of detection counts across frames.

use serde::Serialize;

use super::Scorer;
use crate::accounting::Accounting;
use crate::{Error, Result};

/// Counts for a single frame (one match set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameCounts {
    /// Frame number
    pub frame: i32,
    /// Distinct matched predicted objects
    pub true_positives: usize,
    /// Unmatched predicted objects
    pub false_positives: usize,
    /// Unmatched true objects
    pub false_negatives: usize,
    /// Number of true objects
    pub num_true: usize,
    /// Number of predicted objects
    pub num_pred: usize,
}

impl FrameCounts {
    /// Count one frame's association.
    pub fn from_accounting<S: Accounting + ?Sized>(frame: i32, source: &S) -> Self {
        let scorer = Scorer::new(source);
        Self {
            frame,
            true_positives: scorer.true_positive_count(),
            false_positives: scorer.false_positive_count(),
            false_negatives: scorer.false_negative_count(),
            num_true: source.num_true(),
            num_pred: source.num_pred(),
        }
    }

    /// True objects matched by at least one prediction.
    pub fn detected(&self) -> usize {
        self.num_true - self.false_negatives
    }
}

/// Accumulator for detection counts over many independent match sets.
///
/// Frames are independent, so accumulators built on separate threads can be
/// combined with [`MatchAccumulator::merge`] in any order.
#[derive(Debug, Clone, Default)]
pub struct MatchAccumulator {
    frames: Vec<FrameCounts>,
}

impl MatchAccumulator {
    /// Create a new accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's association.
    pub fn update<S: Accounting + ?Sized>(&mut self, frame: i32, source: &S) -> FrameCounts {
        let counts = FrameCounts::from_accounting(frame, source);
        self.frames.push(counts);
        counts
    }

    /// Fold another accumulator's frames into this one.
    pub fn merge(&mut self, other: MatchAccumulator) {
        self.frames.extend(other.frames);
    }

    /// Get all per-frame counts, in insertion order.
    pub fn frames(&self) -> &[FrameCounts] {
        &self.frames
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Sum of every frame's counts (`frame` is left at 0).
    pub fn totals(&self) -> FrameCounts {
        self.frames.iter().fold(FrameCounts::default(), |acc, f| FrameCounts {
            frame: 0,
            true_positives: acc.true_positives + f.true_positives,
            false_positives: acc.false_positives + f.false_positives,
            false_negatives: acc.false_negatives + f.false_negatives,
            num_true: acc.num_true + f.num_true,
            num_pred: acc.num_pred + f.num_pred,
        })
    }

    /// Pooled precision over all frames.
    pub fn precision(&self) -> Result<f64> {
        let t = self.totals();
        let denom = t.true_positives + t.false_positives;
        if denom == 0 {
            return Err(Error::DivisionUndefined {
                metric: "precision",
                reason: "no frame has predicted objects",
            });
        }
        Ok(t.true_positives as f64 / denom as f64)
    }

    /// Pooled recall over all frames.
    pub fn recall(&self) -> Result<f64> {
        let t = self.totals();
        if t.num_true == 0 {
            return Err(Error::DivisionUndefined {
                metric: "recall",
                reason: "no frame has true objects",
            });
        }
        Ok(t.detected() as f64 / t.num_true as f64)
    }
}

impl Extend<FrameCounts> for MatchAccumulator {
    fn extend<I: IntoIterator<Item = FrameCounts>>(&mut self, iter: I) {
        self.frames.extend(iter);
    }
}

impl FromIterator<FrameCounts> for MatchAccumulator {
    fn from_iter<I: IntoIterator<Item = FrameCounts>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
