//! # Lost and Found - Detection Match Accounting
//!
//! Scores an object-detection algorithm against ground truth, given the
//! association an upstream matcher produced between true and predicted objects.
//!
//! ## Features
//!
//! - Validated `MatchSet` of true ids, predicted ids and weighted matches
//! - Accounting of lost (missed) true objects and found (spurious) predictions
//! - True/false positive counts, precision, recall, F1 and best-match selection
//! - Labeled bipartite graph representation with k/l-degree queries
//! - Batch accumulation across many frames
//!
//! ## Example
//!
//! ```rust
//! use lost_and_found_rs::{Accounting, MatchSet, Scorer};
//!
//! let set = MatchSet::new(
//!     vec![vec![10], vec![], vec![10, 11]],
//!     vec![0, 1, 2],
//!     vec![10, 11, 12, 13],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(set.lost(), vec![1]);
//! assert_eq!(set.found(), vec![12, 13]);
//!
//! let scorer = Scorer::new(&set);
//! assert_eq!(scorer.true_positive_count(), 2);
//! assert_eq!(scorer.precision().unwrap(), 0.5);
//! ```

// Public modules
pub mod accounting;
pub mod bipartite;
pub mod config;
pub mod match_set;
pub mod metrics;
pub mod objects;
pub mod utils;

// Re-exports for convenience
pub use accounting::Accounting;
pub use bipartite::{BipartiteGraph, GraphBuilder, NodeKey};
pub use config::{IngestConfig, SameGroupEdges};
pub use match_set::{Match, MatchInput, MatchSet};
pub use metrics::{MatchAccumulator, MatchCountSummary, MatchReport, Scorer};
pub use objects::{AttrValue, CatalogObject, Group, ObjectId};

// Error types
pub use crate::error::{Error, Result, ValidationError};

mod error {
    use crate::objects::ObjectId;
    use thiserror::Error;

    /// Errors that can occur while scoring a match set
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Validation error: {0}")]
        Validation(#[from] ValidationError),

        #[error("{metric} is undefined: {reason}")]
        DivisionUndefined {
            metric: &'static str,
            reason: &'static str,
        },

        #[error("Not supported: {0}")]
        NotSupported(String),

        #[error("Unknown true object id: {0}")]
        UnknownObject(ObjectId),
    }

    /// Malformed or inconsistent input, raised at construction time.
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum ValidationError {
        #[error("matches has {matches} entries but there are {true_ids} true ids")]
        LengthMismatch { matches: usize, true_ids: usize },

        #[error("weights shape does not mirror matches: {0}")]
        WeightShape(String),

        #[error("invalid weight {weight} for match ({true_id}, {pred_id}): weights must be finite and >= 0")]
        InvalidWeight {
            true_id: ObjectId,
            pred_id: ObjectId,
            weight: f64,
        },

        #[error("true id {true_id} matches predicted id {pred_id}, which is not a declared predicted id")]
        DanglingReference { true_id: ObjectId, pred_id: ObjectId },

        #[error("duplicate {group} id {id}")]
        DuplicateId { group: &'static str, id: ObjectId },

        #[error("true id {true_id} matches predicted id {pred_id} more than once")]
        DuplicateMatch { true_id: ObjectId, pred_id: ObjectId },

        #[error("node '{node}' is missing required attribute '{attr}'")]
        MissingAttribute { node: String, attr: &'static str },

        #[error("node '{node}' attribute '{attr}' must be {expected}")]
        AttributeType {
            node: String,
            attr: &'static str,
            expected: &'static str,
        },

        #[error("node '{node}' has grp '{value}', expected \"true\" or \"pred\"")]
        InvalidGroup { node: String, value: String },

        #[error("duplicate node key '{0}'")]
        DuplicateNode(String),

        #[error("edge ({a}, {b}) references unknown node '{missing}'")]
        UnknownNode {
            a: String,
            b: String,
            missing: String,
        },

        #[error("edge ({a}, {b}) is declared more than once")]
        DuplicateEdge { a: String, b: String },

        #[error("edge ({a}, {b}) is missing a float 'weight' attribute")]
        MissingEdgeWeight { a: String, b: String },

        #[error("edge ({a}, {b}) has invalid weight {weight}: weights must be finite and >= 0")]
        InvalidEdgeWeight { a: String, b: String, weight: f64 },

        #[error("edge ({a}, {b}) connects two '{group}' nodes")]
        SameGroupEdge {
            a: String,
            b: String,
            group: &'static str,
        },

        #[error("invalid configuration: {0}")]
        InvalidConfig(String),
    }

    /// Result type for lost-and-found operations
    pub type Result<T> = std::result::Result<T, Error>;
}
