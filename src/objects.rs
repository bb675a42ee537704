//! True and predicted catalog objects.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer identifier of a true or predicted object, unique within its group.
pub type ObjectId = i64;

/// Which side of the association an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Ground-truth object.
    True,
    /// Candidate detection.
    Pred,
}

impl Group {
    /// The `grp` label used in attribute maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::True => "true",
            Group::Pred => "pred",
        }
    }

    /// Parse a `grp` label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "true" => Some(Group::True),
            "pred" => Some(Group::Pred),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loosely typed attribute value, as found in node and edge attribute maps.
///
/// Deserializes untagged, so JSON `1` is an `Int` and `1.0` is a `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Str(_) => "str",
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// Attribute map keyed by attribute name.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// A true or predicted object on the sky.
///
/// Immutable once constructed; the `group` tag distinguishes true objects
/// from predictions when both live in one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogObject {
    id: ObjectId,
    group: Group,
    ra: f64,
    dec: f64,
    #[serde(default)]
    metadata: AttrMap,
}

impl CatalogObject {
    /// Create a ground-truth object.
    pub fn new_true(id: ObjectId, ra: f64, dec: f64) -> Self {
        Self::new(id, Group::True, ra, dec)
    }

    /// Create a predicted object.
    pub fn new_pred(id: ObjectId, ra: f64, dec: f64) -> Self {
        Self::new(id, Group::Pred, ra, dec)
    }

    /// Create an object in the given group.
    pub fn new(id: ObjectId, group: Group, ra: f64, dec: f64) -> Self {
        Self {
            id,
            group,
            ra,
            dec,
            metadata: AttrMap::new(),
        }
    }

    /// Attach an optional metadata attribute (ellipticity, angle, hlr, ...).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn ra(&self) -> f64 {
        self.ra
    }

    pub fn dec(&self) -> f64 {
        self.dec
    }

    pub fn metadata(&self) -> &AttrMap {
        &self.metadata
    }

    /// Full attribute map (`grp`, `id`, `ra`, `dec` plus metadata).
    pub fn to_attrs(&self) -> AttrMap {
        let mut attrs = self.metadata.clone();
        attrs.insert("grp".to_string(), self.group.as_str().into());
        attrs.insert("id".to_string(), AttrValue::Int(self.id));
        attrs.insert("ra".to_string(), AttrValue::Float(self.ra));
        attrs.insert("dec".to_string(), AttrValue::Float(self.dec));
        attrs
    }
}
