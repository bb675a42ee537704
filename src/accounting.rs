//! Derived accounting sets: lost, found, matched and per-object match counts.
//!
//! `Accounting` is implemented by every representation of an association
//! (`MatchSet` and `BipartiteGraph`), so the metrics layer works on either.
//! All methods are pure: calling them twice yields identical results.

use std::collections::BTreeSet;

use crate::match_set::{Match, MatchSet};
use crate::objects::ObjectId;

/// Accounting queries over a true/predicted association.
pub trait Accounting {
    /// Ordered true ids.
    fn true_ids(&self) -> Vec<ObjectId>;

    /// Ordered predicted ids.
    fn pred_ids(&self) -> Vec<ObjectId>;

    /// True ids with zero matches, in true-id order.
    fn lost(&self) -> Vec<ObjectId>;

    /// Predicted ids with zero matches (false positives), ascending.
    fn found(&self) -> Vec<ObjectId>;

    /// Predicted ids appearing in at least one match, ascending.
    fn matched_preds(&self) -> Vec<ObjectId>;

    /// Number of matches of each true object, in true-id order.
    fn match_counts(&self) -> Vec<usize>;

    /// Matches of one true object, or `None` if `true_id` is unknown.
    fn matches_of(&self, true_id: ObjectId) -> Option<Vec<Match>>;

    /// Total number of true objects.
    fn num_true(&self) -> usize {
        self.true_ids().len()
    }

    /// Total number of predicted objects.
    fn num_pred(&self) -> usize {
        self.pred_ids().len()
    }

    /// True ids with at least one match (the complement of `lost`), in true-id order.
    fn matched_trues(&self) -> Vec<ObjectId> {
        let lost: BTreeSet<ObjectId> = self.lost().into_iter().collect();
        self.true_ids()
            .into_iter()
            .filter(|id| !lost.contains(id))
            .collect()
    }
}

impl<A> Accounting for MatchSet<A> {
    fn true_ids(&self) -> Vec<ObjectId> {
        MatchSet::true_ids(self).to_vec()
    }

    fn pred_ids(&self) -> Vec<ObjectId> {
        MatchSet::pred_ids(self).to_vec()
    }

    fn lost(&self) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, matches)| matches.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    fn found(&self) -> Vec<ObjectId> {
        let matched = matched_pred_set(self);
        let all: BTreeSet<ObjectId> = MatchSet::pred_ids(self).iter().copied().collect();
        all.difference(&matched).copied().collect()
    }

    fn matched_preds(&self) -> Vec<ObjectId> {
        matched_pred_set(self).into_iter().collect()
    }

    fn match_counts(&self) -> Vec<usize> {
        self.iter().map(|(_, matches)| matches.len()).collect()
    }

    fn matches_of(&self, true_id: ObjectId) -> Option<Vec<Match>> {
        self.matches_for(true_id).map(<[Match]>::to_vec)
    }

    fn num_true(&self) -> usize {
        MatchSet::true_ids(self).len()
    }

    fn num_pred(&self) -> usize {
        MatchSet::pred_ids(self).len()
    }
}

fn matched_pred_set<A>(set: &MatchSet<A>) -> BTreeSet<ObjectId> {
    set.iter()
        .flat_map(|(_, matches)| matches.iter().map(|m| m.pred_id))
        .collect()
}
