//! Validated association between true and predicted objects.

use std::collections::{HashMap, HashSet};
use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IngestConfig;
use crate::objects::ObjectId;
use crate::utils::warn_once;
use crate::{Result, ValidationError};

/// One weighted match from a true object to a predicted object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Predicted object id.
    pub pred_id: ObjectId,
    /// Non-negative, finite confidence (or inverse distance).
    pub weight: f64,
}

/// Raw matcher output, as deserialized from an upstream collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub true_ids: Vec<ObjectId>,
    pub pred_ids: Vec<ObjectId>,
    /// One list of matched predicted ids per true id.
    pub matches: Vec<Vec<ObjectId>>,
    /// Same nested shape as `matches`; omitted means every weight is the default.
    #[serde(default)]
    pub weights: Option<Vec<Vec<f64>>>,
}

/// Immutable, validated set of matches between true and predicted objects.
///
/// Every true id has an entry (possibly empty), every referenced predicted id
/// is declared, and every weight is finite and non-negative. `A` is an opaque
/// ancillary payload carried through unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet<A = ()> {
    true_ids: Vec<ObjectId>,
    pred_ids: Vec<ObjectId>,
    /// Parallel to `true_ids`.
    matches: Vec<Vec<Match>>,
    true_index: HashMap<ObjectId, usize>,
    ancil: A,
}

impl MatchSet<()> {
    /// Build a match set with the default ingestion configuration.
    ///
    /// # Arguments
    /// * `matches` - One list of matched predicted ids per true id
    /// * `true_ids` - Ordered true object ids
    /// * `pred_ids` - Ordered predicted object ids
    /// * `weights` - Optional weights, same nested shape as `matches`
    pub fn new(
        matches: Vec<Vec<ObjectId>>,
        true_ids: Vec<ObjectId>,
        pred_ids: Vec<ObjectId>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Result<Self> {
        Self::with_config(matches, true_ids, pred_ids, weights, &IngestConfig::default())
    }

    /// Build a match set, validating against `config`.
    pub fn with_config(
        matches: Vec<Vec<ObjectId>>,
        true_ids: Vec<ObjectId>,
        pred_ids: Vec<ObjectId>,
        weights: Option<Vec<Vec<f64>>>,
        config: &IngestConfig,
    ) -> Result<Self> {
        config.validate()?;

        if matches.len() != true_ids.len() {
            return Err(ValidationError::LengthMismatch {
                matches: matches.len(),
                true_ids: true_ids.len(),
            }
            .into());
        }

        let true_index = index_unique(&true_ids, "true")?;
        let declared_preds: HashSet<ObjectId> = index_unique(&pred_ids, "pred")?
            .into_keys()
            .collect();

        // Fill default weights once so nothing downstream branches on absence.
        let weights = match weights {
            Some(w) => {
                check_weight_shape(&matches, &w, &true_ids)?;
                w
            }
            None => matches
                .iter()
                .map(|m| vec![config.default_weight; m.len()])
                .collect(),
        };

        let mut validated = Vec::with_capacity(matches.len());
        for ((&true_id, preds), ws) in true_ids.iter().zip(&matches).zip(&weights) {
            let mut seen = HashSet::with_capacity(preds.len());
            let mut row = Vec::with_capacity(preds.len());
            for (&pred_id, &weight) in preds.iter().zip(ws) {
                if !declared_preds.contains(&pred_id) {
                    return Err(ValidationError::DanglingReference { true_id, pred_id }.into());
                }
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ValidationError::InvalidWeight {
                        true_id,
                        pred_id,
                        weight,
                    }
                    .into());
                }
                if !seen.insert(pred_id) && !config.allow_duplicate_matches {
                    return Err(ValidationError::DuplicateMatch { true_id, pred_id }.into());
                }
                row.push(Match { pred_id, weight });
            }
            validated.push(row);
        }

        let set = Self {
            true_ids,
            pred_ids,
            matches: validated,
            true_index,
            ancil: (),
        };

        debug!(
            num_true = set.true_ids.len(),
            num_pred = set.pred_ids.len(),
            num_matches = set.num_matches(),
            "built match set"
        );
        if set.is_complete() {
            warn_once(
                "every true object matches every predicted object; precision and recall are saturated",
            );
        }

        Ok(set)
    }

    /// Build a match set from deserialized matcher output.
    pub fn from_input(input: MatchInput, config: &IngestConfig) -> Result<Self> {
        Self::with_config(
            input.matches,
            input.true_ids,
            input.pred_ids,
            input.weights,
            config,
        )
    }

    /// Build a match set from a dense association matrix.
    ///
    /// Rows follow `true_ids`, columns follow `pred_ids`. A `NaN` entry means
    /// "no match"; every other entry is a match with that weight and goes
    /// through the usual weight validation.
    pub fn from_weight_matrix(
        true_ids: Vec<ObjectId>,
        pred_ids: Vec<ObjectId>,
        matrix: &DMatrix<f64>,
        config: &IngestConfig,
    ) -> Result<Self> {
        if matrix.nrows() != true_ids.len() || matrix.ncols() != pred_ids.len() {
            return Err(ValidationError::WeightShape(format!(
                "expected a {}x{} matrix, got {}x{}",
                true_ids.len(),
                pred_ids.len(),
                matrix.nrows(),
                matrix.ncols()
            ))
            .into());
        }

        let mut matches = Vec::with_capacity(true_ids.len());
        let mut weights = Vec::with_capacity(true_ids.len());
        for i in 0..matrix.nrows() {
            let mut row_matches = Vec::new();
            let mut row_weights = Vec::new();
            for (j, &pred_id) in pred_ids.iter().enumerate() {
                let w = matrix[(i, j)];
                if w.is_nan() {
                    continue;
                }
                row_matches.push(pred_id);
                row_weights.push(w);
            }
            matches.push(row_matches);
            weights.push(row_weights);
        }

        Self::with_config(matches, true_ids, pred_ids, Some(weights), config)
    }
}

impl<A> MatchSet<A> {
    /// Attach an ancillary payload, replacing any existing one.
    pub fn with_ancil<B>(self, ancil: B) -> MatchSet<B> {
        MatchSet {
            true_ids: self.true_ids,
            pred_ids: self.pred_ids,
            matches: self.matches,
            true_index: self.true_index,
            ancil,
        }
    }

    /// The ancillary payload.
    pub fn ancil(&self) -> &A {
        &self.ancil
    }

    /// Ordered true ids.
    pub fn true_ids(&self) -> &[ObjectId] {
        &self.true_ids
    }

    /// Ordered predicted ids.
    pub fn pred_ids(&self) -> &[ObjectId] {
        &self.pred_ids
    }

    /// Matches of one true object, or `None` for an unknown id.
    pub fn matches_for(&self, true_id: ObjectId) -> Option<&[Match]> {
        self.true_index
            .get(&true_id)
            .map(|&i| self.matches[i].as_slice())
    }

    /// Iterate `(true_id, matches)` in true-id order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &[Match])> + '_ {
        self.true_ids
            .iter()
            .copied()
            .zip(self.matches.iter().map(Vec::as_slice))
    }

    /// Total number of match edges.
    pub fn num_matches(&self) -> usize {
        self.matches.iter().map(Vec::len).sum()
    }

    /// True when every true object matches every predicted object and both sides are non-empty.
    pub fn is_complete(&self) -> bool {
        if self.true_ids.is_empty() || self.pred_ids.is_empty() {
            return false;
        }
        self.matches.iter().all(|row| {
            let distinct: HashSet<ObjectId> = row.iter().map(|m| m.pred_id).collect();
            distinct.len() == self.pred_ids.len()
        })
    }

    /// Dense weight matrix (rows = true ids, columns = predicted ids, `NaN` = no match).
    ///
    /// Duplicate matches keep the highest weight.
    pub fn weight_matrix(&self) -> DMatrix<f64> {
        let col: HashMap<ObjectId, usize> = self
            .pred_ids
            .iter()
            .enumerate()
            .map(|(j, &id)| (id, j))
            .collect();

        let mut matrix = DMatrix::from_element(self.true_ids.len(), self.pred_ids.len(), f64::NAN);
        for (i, row) in self.matches.iter().enumerate() {
            for m in row {
                if let Some(&j) = col.get(&m.pred_id) {
                    let cell = &mut matrix[(i, j)];
                    if cell.is_nan() || m.weight > *cell {
                        *cell = m.weight;
                    }
                }
            }
        }
        matrix
    }
}

impl<A> fmt::Display for MatchSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::metrics::summary_line(self))
    }
}

fn index_unique(ids: &[ObjectId], group: &'static str) -> Result<HashMap<ObjectId, usize>> {
    let mut index = HashMap::with_capacity(ids.len());
    for (i, &id) in ids.iter().enumerate() {
        if index.insert(id, i).is_some() {
            return Err(ValidationError::DuplicateId { group, id }.into());
        }
    }
    Ok(index)
}

fn check_weight_shape(
    matches: &[Vec<ObjectId>],
    weights: &[Vec<f64>],
    true_ids: &[ObjectId],
) -> Result<()> {
    if weights.len() != matches.len() {
        return Err(ValidationError::WeightShape(format!(
            "expected {} weight lists, got {}",
            matches.len(),
            weights.len()
        ))
        .into());
    }
    for ((m, w), id) in matches.iter().zip(weights).zip(true_ids) {
        if m.len() != w.len() {
            return Err(ValidationError::WeightShape(format!(
                "true id {} has {} matches but {} weights",
                id,
                m.len(),
                w.len()
            ))
            .into());
        }
    }
    Ok(())
}
