//! Labeled bipartite graph view of a true/predicted association.
//!
//! Nodes carry a `grp` label (`"true"` or `"pred"`) plus `id`, `ra` and `dec`
//! attributes; edges carry a non-negative `weight`. The graph is an owned
//! adjacency structure built through [`GraphBuilder`], which validates every
//! attribute before the graph exists.
//!
//! Edges between two nodes of the same group are kept by default but never
//! count as matches (see [`SameGroupEdges`]).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accounting::Accounting;
use crate::config::{IngestConfig, SameGroupEdges};
use crate::match_set::{Match, MatchSet};
use crate::objects::{AttrMap, AttrValue, CatalogObject, Group, ObjectId};
use crate::utils::warn_once;
use crate::{Result, ValidationError};

/// Identifier of a node within one graph.
///
/// Distinct from the object `id` attribute, which is only unique per group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A node as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub key: NodeKey,
    #[serde(flatten)]
    pub attrs: AttrMap,
}

/// An edge as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(flatten)]
    pub attrs: AttrMap,
}

/// Serializable node/edge lists, e.g. exported by a matcher in another process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// Edge attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttrs {
    pub weight: f64,
    /// Any attributes besides `weight`.
    pub extra: AttrMap,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    key: NodeKey,
    object: CatalogObject,
}

/// Collects nodes and edges, then validates them into a [`BipartiteGraph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: IngestConfig,
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start from deserialized node/edge lists.
    pub fn from_data(data: GraphData, config: IngestConfig) -> Self {
        Self {
            config,
            nodes: data.nodes,
            edges: data.edges,
        }
    }

    /// Add a node with a raw attribute map.
    pub fn add_node(&mut self, key: impl Into<NodeKey>, attrs: AttrMap) -> &mut Self {
        self.nodes.push(RawNode {
            key: key.into(),
            attrs,
        });
        self
    }

    /// Add a node for a catalog object.
    pub fn add_object(&mut self, key: impl Into<NodeKey>, object: &CatalogObject) -> &mut Self {
        self.add_node(key, object.to_attrs())
    }

    /// Add an edge with a raw attribute map.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
        attrs: AttrMap,
    ) -> &mut Self {
        self.edges.push(RawEdge {
            source: source.into(),
            target: target.into(),
            attrs,
        });
        self
    }

    /// Add a weighted edge.
    pub fn add_match(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
        weight: f64,
    ) -> &mut Self {
        let mut attrs = AttrMap::new();
        attrs.insert("weight".to_string(), AttrValue::Float(weight));
        self.add_edge(source, target, attrs)
    }

    /// Validate everything collected so far and build the graph.
    pub fn build(self) -> Result<BipartiteGraph> {
        self.config.validate()?;

        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut index = HashMap::with_capacity(self.nodes.len());
        let mut true_slots = HashMap::new();
        let mut pred_slots = HashMap::new();

        for raw in self.nodes {
            let object = parse_node(&raw)?;
            let slot = nodes.len();
            if index.insert(raw.key.clone(), slot).is_some() {
                return Err(ValidationError::DuplicateNode(raw.key.to_string()).into());
            }
            let by_id = match object.group() {
                Group::True => &mut true_slots,
                Group::Pred => &mut pred_slots,
            };
            if by_id.insert(object.id(), slot).is_some() {
                return Err(ValidationError::DuplicateId {
                    group: object.group().as_str(),
                    id: object.id(),
                }
                .into());
            }
            nodes.push(Node {
                key: raw.key,
                object,
            });
        }

        let mut adjacency: Vec<BTreeMap<usize, EdgeAttrs>> = vec![BTreeMap::new(); nodes.len()];
        let mut same_group = 0usize;

        for raw in self.edges {
            let (a, b) = (raw.source.to_string(), raw.target.to_string());
            let endpoint = |key: &NodeKey| {
                index.get(key).copied().ok_or_else(|| ValidationError::UnknownNode {
                    a: a.clone(),
                    b: b.clone(),
                    missing: key.to_string(),
                })
            };
            let u = endpoint(&raw.source)?;
            let v = endpoint(&raw.target)?;
            let attrs = parse_edge(&a, &b, raw.attrs)?;

            let group = nodes[u].object.group();
            if group == nodes[v].object.group() {
                if self.config.same_group_edges == SameGroupEdges::Reject {
                    return Err(ValidationError::SameGroupEdge {
                        a,
                        b,
                        group: group.as_str(),
                    }
                    .into());
                }
                same_group += 1;
            }

            if adjacency[u].contains_key(&v) && !self.config.allow_duplicate_matches {
                return Err(ValidationError::DuplicateEdge { a, b }.into());
            }
            adjacency[u].insert(v, attrs.clone());
            adjacency[v].insert(u, attrs);
        }

        if same_group > 0 {
            warn_once("bipartite graph contains same-group edges; they are not counted as matches");
        }

        let graph = BipartiteGraph {
            config: self.config,
            nodes,
            index,
            true_slots,
            pred_slots,
            adjacency,
        };
        debug!(
            num_nodes = graph.num_nodes(),
            num_edges = graph.num_edges(),
            same_group_edges = same_group,
            "built bipartite graph"
        );
        Ok(graph)
    }
}

fn parse_node(raw: &RawNode) -> std::result::Result<CatalogObject, ValidationError> {
    let node = raw.key.to_string();
    let attr = |name: &'static str| {
        raw.attrs.get(name).ok_or_else(|| ValidationError::MissingAttribute {
            node: node.clone(),
            attr: name,
        })
    };
    let type_error = |name: &'static str, expected: &'static str| ValidationError::AttributeType {
        node: node.clone(),
        attr: name,
        expected,
    };

    let group = match attr("grp")? {
        AttrValue::Str(label) => Group::parse(label).ok_or_else(|| ValidationError::InvalidGroup {
            node: node.clone(),
            value: label.clone(),
        })?,
        _ => return Err(type_error("grp", "a string")),
    };
    let ra = match attr("ra")? {
        AttrValue::Float(v) => *v,
        _ => return Err(type_error("ra", "a float")),
    };
    let dec = match attr("dec")? {
        AttrValue::Float(v) => *v,
        _ => return Err(type_error("dec", "a float")),
    };
    let id = match attr("id")? {
        AttrValue::Int(v) => *v,
        _ => return Err(type_error("id", "an integer")),
    };

    let mut object = CatalogObject::new(id, group, ra, dec);
    for (key, value) in &raw.attrs {
        if !matches!(key.as_str(), "grp" | "ra" | "dec" | "id") {
            object = object.with_metadata(key.clone(), value.clone());
        }
    }
    Ok(object)
}

fn parse_edge(a: &str, b: &str, mut attrs: AttrMap) -> std::result::Result<EdgeAttrs, ValidationError> {
    let weight = match attrs.remove("weight") {
        Some(AttrValue::Float(w)) => w,
        _ => {
            return Err(ValidationError::MissingEdgeWeight {
                a: a.to_string(),
                b: b.to_string(),
            })
        }
    };
    if !weight.is_finite() || weight < 0.0 {
        return Err(ValidationError::InvalidEdgeWeight {
            a: a.to_string(),
            b: b.to_string(),
            weight,
        });
    }
    Ok(EdgeAttrs {
        weight,
        extra: attrs,
    })
}

/// Undirected graph of true and predicted objects joined by weighted match edges.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    config: IngestConfig,
    /// Insertion order.
    nodes: Vec<Node>,
    index: HashMap<NodeKey, usize>,
    true_slots: HashMap<ObjectId, usize>,
    pred_slots: HashMap<ObjectId, usize>,
    /// Neighbor slot -> edge attributes, symmetric.
    adjacency: Vec<BTreeMap<usize, EdgeAttrs>>,
}

impl BipartiteGraph {
    /// Build a graph mirroring a match set.
    ///
    /// `object` supplies the catalog entry for each `(group, id)`; node keys
    /// are `t<id>` for true objects and `p<id>` for predictions.
    pub fn from_match_set<A, F>(set: &MatchSet<A>, mut object: F) -> Result<Self>
    where
        F: FnMut(Group, ObjectId) -> CatalogObject,
    {
        let mut builder = GraphBuilder::new();
        for &id in set.true_ids() {
            builder.add_object(format!("t{id}"), &object(Group::True, id));
        }
        for &id in set.pred_ids() {
            builder.add_object(format!("p{id}"), &object(Group::Pred, id));
        }
        for (true_id, matches) in set.iter() {
            for m in matches {
                builder.add_match(format!("t{true_id}"), format!("p{}", m.pred_id), m.weight);
            }
        }
        builder.build()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges, same-group edges included.
    pub fn num_edges(&self) -> usize {
        let ends: usize = self
            .adjacency
            .iter()
            .enumerate()
            .map(|(u, nbrs)| nbrs.len() + usize::from(nbrs.contains_key(&u)))
            .sum();
        ends / 2
    }

    /// Catalog object stored at a node.
    pub fn node(&self, key: &NodeKey) -> Option<&CatalogObject> {
        self.index.get(key).map(|&slot| &self.nodes[slot].object)
    }

    /// Node keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter().map(|n| &n.key)
    }

    /// Attributes of the edge between two nodes, if any.
    pub fn edge(&self, a: &NodeKey, b: &NodeKey) -> Option<&EdgeAttrs> {
        let u = *self.index.get(a)?;
        let v = *self.index.get(b)?;
        self.adjacency[u].get(&v)
    }

    /// Neighbors of a node with the connecting edge attributes.
    pub fn neighbors(&self, key: &NodeKey) -> Vec<(&NodeKey, &EdgeAttrs)> {
        match self.index.get(key) {
            Some(&slot) => self.adjacency[slot]
                .iter()
                .map(|(&v, attrs)| (&self.nodes[v].key, attrs))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nodes with exactly `k` neighbors in the true group and `l` in the predicted group.
    ///
    /// Every neighbor counts, same-group ones included, so this surfaces
    /// ambiguous many-to-many clusters. Result is in insertion order.
    pub fn k_l_degree_query(&self, k: usize, l: usize) -> Vec<&NodeKey> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(slot, _)| {
                let (trues, preds) = self.adjacency[slot].keys().fold((0, 0), |(t, p), &v| {
                    match self.nodes[v].object.group() {
                        Group::True => (t + 1, p),
                        Group::Pred => (t, p + 1),
                    }
                });
                trues == k && preds == l
            })
            .map(|(_, node)| &node.key)
            .collect()
    }

    /// Convert to the equivalent match set (cross-group edges only).
    pub fn to_match_set(&self) -> Result<MatchSet> {
        let true_ids = self.ids_of(Group::True);
        let mut matches = Vec::with_capacity(true_ids.len());
        let mut weights = Vec::with_capacity(true_ids.len());
        for slot in self.slots_of(Group::True) {
            let (ids, ws): (Vec<ObjectId>, Vec<f64>) = self
                .cross_edges(slot)
                .map(|(v, attrs)| (self.nodes[v].object.id(), attrs.weight))
                .unzip();
            matches.push(ids);
            weights.push(ws);
        }
        MatchSet::with_config(
            matches,
            true_ids,
            self.ids_of(Group::Pred),
            Some(weights),
            &self.config,
        )
    }

    fn slots_of(&self, group: Group) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.object.group() == group)
            .map(|(slot, _)| slot)
    }

    fn ids_of(&self, group: Group) -> Vec<ObjectId> {
        self.slots_of(group)
            .map(|slot| self.nodes[slot].object.id())
            .collect()
    }

    fn cross_edges(&self, slot: usize) -> impl Iterator<Item = (usize, &EdgeAttrs)> + '_ {
        let group = self.nodes[slot].object.group();
        self.adjacency[slot]
            .iter()
            .filter(move |(&v, _)| self.nodes[v].object.group() != group)
            .map(|(&v, attrs)| (v, attrs))
    }

    fn cross_degree(&self, slot: usize) -> usize {
        self.cross_edges(slot).count()
    }

    fn pred_ids_where(&self, matched: bool) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self
            .slots_of(Group::Pred)
            .filter(|&slot| (self.cross_degree(slot) > 0) == matched)
            .map(|slot| self.nodes[slot].object.id())
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Accounting for BipartiteGraph {
    fn true_ids(&self) -> Vec<ObjectId> {
        self.ids_of(Group::True)
    }

    fn pred_ids(&self) -> Vec<ObjectId> {
        self.ids_of(Group::Pred)
    }

    fn lost(&self) -> Vec<ObjectId> {
        self.slots_of(Group::True)
            .filter(|&slot| self.cross_degree(slot) == 0)
            .map(|slot| self.nodes[slot].object.id())
            .collect()
    }

    fn found(&self) -> Vec<ObjectId> {
        self.pred_ids_where(false)
    }

    fn matched_preds(&self) -> Vec<ObjectId> {
        self.pred_ids_where(true)
    }

    fn match_counts(&self) -> Vec<usize> {
        self.slots_of(Group::True)
            .map(|slot| self.cross_degree(slot))
            .collect()
    }

    fn matches_of(&self, true_id: ObjectId) -> Option<Vec<Match>> {
        let &slot = self.true_slots.get(&true_id)?;
        Some(
            self.cross_edges(slot)
                .map(|(v, attrs)| Match {
                    pred_id: self.nodes[v].object.id(),
                    weight: attrs.weight,
                })
                .collect(),
        )
    }

    fn num_true(&self) -> usize {
        self.true_slots.len()
    }

    fn num_pred(&self) -> usize {
        self.pred_slots.len()
    }
}

impl fmt::Display for BipartiteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::metrics::summary_line(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn node(grp: &str, id: i64) -> AttrMap {
        CatalogObject::new(id, Group::parse(grp).unwrap(), 1.0, 2.0).to_attrs()
    }

    fn scenario() -> BipartiteGraph {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("t0", node("true", 0))
            .add_node("t1", node("true", 1))
            .add_node("t2", node("true", 2))
            .add_node("p10", node("pred", 10))
            .add_node("p11", node("pred", 11))
            .add_node("p12", node("pred", 12))
            .add_node("p13", node("pred", 13))
            .add_match("t0", "p10", 1.0)
            .add_match("t2", "p10", 0.5)
            .add_match("t2", "p11", 0.9);
        builder.build().unwrap()
    }

    #[test]
    fn test_accounting() {
        let graph = scenario();
        assert_eq!(graph.lost(), vec![1]);
        assert_eq!(graph.found(), vec![12, 13]);
        assert_eq!(graph.matched_preds(), vec![10, 11]);
        assert_eq!(graph.match_counts(), vec![1, 0, 2]);
        assert_eq!(graph.num_edges(), 3);
    }

    #[test]
    fn test_matches_of() {
        let graph = scenario();
        let matches = graph.matches_of(2).unwrap();
        assert_eq!(
            matches,
            vec![
                Match { pred_id: 10, weight: 0.5 },
                Match { pred_id: 11, weight: 0.9 },
            ]
        );
        assert!(graph.matches_of(10).is_none());
    }

    #[test]
    fn test_missing_attribute() {
        let mut attrs = node("true", 0);
        attrs.remove("ra");
        let mut builder = GraphBuilder::new();
        builder.add_node("t0", attrs);

        assert_eq!(
            builder.build().unwrap_err(),
            Error::Validation(ValidationError::MissingAttribute {
                node: "t0".to_string(),
                attr: "ra"
            })
        );
    }

    #[test]
    fn test_attribute_types() {
        let mut int_ra = node("true", 0);
        int_ra.insert("ra".to_string(), AttrValue::Int(3));
        let mut float_id = node("true", 0);
        float_id.insert("id".to_string(), AttrValue::Float(0.0));

        for attrs in [int_ra, float_id] {
            let mut builder = GraphBuilder::new();
            builder.add_node("t0", attrs);
            assert!(matches!(
                builder.build(),
                Err(Error::Validation(ValidationError::AttributeType { .. }))
            ));
        }
    }

    #[test]
    fn test_invalid_group() {
        let mut attrs = node("true", 0);
        attrs.insert("grp".to_string(), "truth".into());
        let mut builder = GraphBuilder::new();
        builder.add_node("t0", attrs);
        assert!(matches!(
            builder.build(),
            Err(Error::Validation(ValidationError::InvalidGroup { .. }))
        ));
    }

    #[test]
    fn test_edge_weight_validation() {
        let base = || {
            let mut builder = GraphBuilder::new();
            builder.add_node("t0", node("true", 0)).add_node("p0", node("pred", 0));
            builder
        };

        let mut missing = base();
        missing.add_edge("t0", "p0", AttrMap::new());
        assert!(matches!(
            missing.build(),
            Err(Error::Validation(ValidationError::MissingEdgeWeight { .. }))
        ));

        let mut int_weight = base();
        let mut attrs = AttrMap::new();
        attrs.insert("weight".to_string(), AttrValue::Int(1));
        int_weight.add_edge("t0", "p0", attrs);
        assert!(matches!(
            int_weight.build(),
            Err(Error::Validation(ValidationError::MissingEdgeWeight { .. }))
        ));

        let mut negative = base();
        negative.add_match("t0", "p0", -1.0);
        assert!(matches!(
            negative.build(),
            Err(Error::Validation(ValidationError::InvalidEdgeWeight { .. }))
        ));
    }

    #[test]
    fn test_unknown_endpoint() {
        let mut builder = GraphBuilder::new();
        builder.add_node("t0", node("true", 0)).add_match("t0", "p9", 1.0);
        assert!(matches!(
            builder.build(),
            Err(Error::Validation(ValidationError::UnknownNode { .. }))
        ));
    }

    #[test]
    fn test_duplicate_node_and_id() {
        let mut same_key = GraphBuilder::new();
        same_key.add_node("a", node("true", 0)).add_node("a", node("pred", 1));
        assert!(matches!(
            same_key.build(),
            Err(Error::Validation(ValidationError::DuplicateNode(_)))
        ));

        let mut same_id = GraphBuilder::new();
        same_id.add_node("a", node("pred", 1)).add_node("b", node("pred", 1));
        assert!(matches!(
            same_id.build(),
            Err(Error::Validation(ValidationError::DuplicateId { .. }))
        ));

        // Same id in different groups is fine.
        let mut cross = GraphBuilder::new();
        cross.add_node("a", node("true", 1)).add_node("b", node("pred", 1));
        assert!(cross.build().is_ok());
    }

    #[test]
    fn test_duplicate_edge() {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("t0", node("true", 0))
            .add_node("p0", node("pred", 0))
            .add_match("t0", "p0", 1.0)
            .add_match("p0", "t0", 2.0);
        assert!(matches!(
            builder.build(),
            Err(Error::Validation(ValidationError::DuplicateEdge { .. }))
        ));
    }

    #[test]
    fn test_same_group_edges_ignored() {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("t0", node("true", 0))
            .add_node("t1", node("true", 1))
            .add_node("p0", node("pred", 0))
            .add_match("t0", "t1", 1.0);
        let graph = builder.build().unwrap();

        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.lost(), vec![0, 1]);
        assert_eq!(graph.found(), vec![0]);
        assert_eq!(graph.match_counts(), vec![0, 0]);
    }

    #[test]
    fn test_same_group_edges_rejected() {
        let mut builder =
            GraphBuilder::with_config(IngestConfig::new().with_same_group_edges(SameGroupEdges::Reject));
        builder
            .add_node("p0", node("pred", 0))
            .add_node("p1", node("pred", 1))
            .add_match("p0", "p1", 1.0);
        assert!(matches!(
            builder.build(),
            Err(Error::Validation(ValidationError::SameGroupEdge { group: "pred", .. }))
        ));
    }

    #[test]
    fn test_k_l_degree_query() {
        let graph = scenario();
        let keys = |k, l| -> Vec<String> {
            graph
                .k_l_degree_query(k, l)
                .into_iter()
                .map(|key| key.to_string())
                .collect()
        };

        assert_eq!(keys(0, 2), vec!["t2"]);
        assert_eq!(keys(2, 0), vec!["p10"]);
        assert_eq!(keys(0, 1), vec!["t0"]);
        assert_eq!(keys(1, 0), vec!["p11"]);
        assert_eq!(keys(0, 0), vec!["t1", "p12", "p13"]);
    }

    #[test]
    fn test_k_l_counts_same_group_neighbors() {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("t0", node("true", 0))
            .add_node("t1", node("true", 1))
            .add_node("p0", node("pred", 0))
            .add_match("t0", "t1", 1.0)
            .add_match("t0", "p0", 1.0);
        let graph = builder.build().unwrap();

        let hits: Vec<&str> = graph.k_l_degree_query(1, 1).into_iter().map(NodeKey::as_str).collect();
        assert_eq!(hits, vec!["t0"]);
    }

    #[test]
    fn test_neighbors_and_keys() {
        let graph = scenario();
        let keys: Vec<&str> = graph.keys().map(NodeKey::as_str).collect();
        assert_eq!(keys, vec!["t0", "t1", "t2", "p10", "p11", "p12", "p13"]);

        let nbrs: Vec<(&str, f64)> = graph
            .neighbors(&NodeKey::from("p10"))
            .into_iter()
            .map(|(key, attrs)| (key.as_str(), attrs.weight))
            .collect();
        assert_eq!(nbrs, vec![("t0", 1.0), ("t2", 0.5)]);
        assert!(graph.neighbors(&NodeKey::from("nope")).is_empty());
    }

    #[test]
    fn test_from_match_set_node_keys() {
        let set = MatchSet::new(vec![vec![5]], vec![1], vec![5], None).unwrap();
        let graph = BipartiteGraph::from_match_set(&set, |group, id| match group {
            Group::True => CatalogObject::new_true(id, 0.0, 0.0),
            Group::Pred => CatalogObject::new_pred(id, 0.0, 0.0),
        })
        .unwrap();

        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.node(&NodeKey::from("t1")).unwrap().group(), Group::True);
        assert!(graph.edge(&NodeKey::from("t1"), &NodeKey::from("p5")).is_some());
    }

    #[test]
    fn test_to_match_set() {
        let set = scenario().to_match_set().unwrap();
        assert_eq!(set.true_ids().to_vec(), vec![0, 1, 2]);
        assert_eq!(set.pred_ids().to_vec(), vec![10, 11, 12, 13]);
        assert_eq!(set.match_counts(), vec![1, 0, 2]);
        assert_eq!(set.matches_for(2).unwrap()[1].weight, 0.9);
    }

    #[test]
    fn test_metadata_preserved() {
        let mut attrs = node("pred", 4);
        attrs.insert("ellipticity".to_string(), AttrValue::Float(0.2));
        let mut builder = GraphBuilder::new();
        builder.add_node("p4", attrs);
        let graph = builder.build().unwrap();

        let obj = graph.node(&NodeKey::from("p4")).unwrap();
        assert_eq!(obj.metadata()["ellipticity"], AttrValue::Float(0.2));
        assert_eq!(obj.group(), Group::Pred);
    }

    #[test]
    fn test_from_graph_data_json() {
        let data: GraphData = serde_json::from_str(
            r#"{
                "nodes": [
                    {"key": "a", "grp": "true", "id": 1, "ra": 10.0, "dec": -5.0},
                    {"key": "b", "grp": "pred", "id": 1, "ra": 10.001, "dec": -5.0, "hlr": 0.7}
                ],
                "edges": [{"source": "a", "target": "b", "weight": 0.8}]
            }"#,
        )
        .unwrap();
        let graph = GraphBuilder::from_data(data, IngestConfig::default()).build().unwrap();

        assert!(graph.lost().is_empty());
        assert!(graph.found().is_empty());
        assert_eq!(graph.edge(&"a".into(), &"b".into()).unwrap().weight, 0.8);
    }
}
