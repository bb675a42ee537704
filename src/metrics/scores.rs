//! Detection scores computed from accounting sets.

use crate::accounting::Accounting;
use crate::objects::ObjectId;
use crate::{Error, Result};

/// Computes detection metrics over any [`Accounting`] source.
///
/// Counting convention: a predicted object is a true positive once, however
/// many true objects it matches; `precision` uses that count. `recall` counts
/// true objects matched by at least one prediction, so a true object matched
/// by several predictions is recalled once. Both agree with the usual
/// definitions under one-to-one matching and stay within `[0, 1]` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a, S: Accounting + ?Sized> {
    source: &'a S,
}

impl<'a, S: Accounting + ?Sized> Scorer<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Distinct predicted ids matched to at least one true object.
    pub fn true_positive_count(&self) -> usize {
        self.source.matched_preds().len()
    }

    /// Predicted ids matched to nothing.
    pub fn false_positive_count(&self) -> usize {
        self.source.found().len()
    }

    /// True ids matched to nothing.
    pub fn false_negative_count(&self) -> usize {
        self.source.lost().len()
    }

    /// True ids matched by at least one prediction.
    pub fn detected_count(&self) -> usize {
        self.source.num_true() - self.false_negative_count()
    }

    /// Object-wise matching has no negative class, so this always fails.
    pub fn true_negative_count(&self) -> Result<usize> {
        Err(Error::NotSupported(
            "true negatives need a pixel- or region-wise evaluation; object matching has no negative class"
                .to_string(),
        ))
    }

    /// `tp / (tp + fp)`.
    ///
    /// # Errors
    /// `DivisionUndefined` when there are no predicted objects.
    pub fn precision(&self) -> Result<f64> {
        let tp = self.true_positive_count();
        let fp = self.false_positive_count();
        if tp + fp == 0 {
            return Err(Error::DivisionUndefined {
                metric: "precision",
                reason: "there are no predicted objects",
            });
        }
        Ok(tp as f64 / (tp + fp) as f64)
    }

    /// Fraction of true objects matched by at least one prediction.
    ///
    /// # Errors
    /// `DivisionUndefined` when there are no true objects.
    pub fn recall(&self) -> Result<f64> {
        let num_true = self.source.num_true();
        if num_true == 0 {
            return Err(Error::DivisionUndefined {
                metric: "recall",
                reason: "there are no true objects",
            });
        }
        Ok(self.detected_count() as f64 / num_true as f64)
    }

    /// Harmonic mean of precision and recall.
    ///
    /// # Errors
    /// `DivisionUndefined` when either input is undefined or both are zero.
    pub fn f1_score(&self) -> Result<f64> {
        let precision = self.precision()?;
        let recall = self.recall()?;
        if precision + recall == 0.0 {
            return Err(Error::DivisionUndefined {
                metric: "f1 score",
                reason: "precision and recall are both zero",
            });
        }
        Ok(2.0 * precision * recall / (precision + recall))
    }

    /// Predicted id with the highest weight among `true_id`'s matches.
    ///
    /// Ties go to the lowest predicted id. `Ok(None)` for a lost object.
    ///
    /// # Errors
    /// `UnknownObject` when `true_id` is not a true id of the source.
    pub fn best_match(&self, true_id: ObjectId) -> Result<Option<ObjectId>> {
        let matches = self
            .source
            .matches_of(true_id)
            .ok_or(Error::UnknownObject(true_id))?;

        let best = matches.into_iter().reduce(|best, m| {
            if m.weight > best.weight || (m.weight == best.weight && m.pred_id < best.pred_id) {
                m
            } else {
                best
            }
        });
        Ok(best.map(|m| m.pred_id))
    }

    /// Best match of every true object, in true-id order.
    pub fn best_matches(&self) -> Vec<Option<ObjectId>> {
        self.source
            .true_ids()
            .into_iter()
            .map(|id| self.best_match(id).ok().flatten())
            .collect()
    }
}
