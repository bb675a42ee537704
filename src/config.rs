//! Ingestion configuration shared by both construction paths.

use serde::{Deserialize, Serialize};

use crate::{Result, ValidationError};

/// How the graph representation treats edges between two nodes of the same group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameGroupEdges {
    /// Keep the edge in the graph but never count it as a match.
    #[default]
    Ignore,
    /// Fail construction with a validation error.
    Reject,
}

/// Configuration applied when a `MatchSet` or `BipartiteGraph` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Weight assigned to every match when no weights are supplied.
    pub default_weight: f64,

    /// Treatment of true-true and pred-pred edges in the graph representation.
    pub same_group_edges: SameGroupEdges,

    /// Allow the same predicted id to appear more than once in a true object's match list.
    pub allow_duplicate_matches: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_weight: 1.0,
            same_group_edges: SameGroupEdges::Ignore,
            allow_duplicate_matches: false,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    pub fn with_same_group_edges(mut self, policy: SameGroupEdges) -> Self {
        self.same_group_edges = policy;
        self
    }

    pub fn with_duplicate_matches(mut self, allow: bool) -> Self {
        self.allow_duplicate_matches = allow;
        self
    }

    /// Check the configuration itself is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(ValidationError::InvalidConfig(format!(
                "default_weight must be finite and >= 0, got {}",
                self.default_weight
            ))
            .into());
        }
        Ok(())
    }
}
