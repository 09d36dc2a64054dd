//! # Property Framework
//!
//! A property is a named, owner-scoped, lazily-evaluated attribute. Reads
//! translate into pattern queries against the relation store; writes stage
//! values or relations in a local cache, where they stay until an explicit
//! persistence step outside this layer.
//!
//! ## The contract
//!
//! - Typed `get` methods (on the concrete types) return lazy, finite,
//!   restartable sequences: each call re-executes its query; nothing is
//!   memoized between calls.
//! - `set` stages a value subject to the property's multiplicity flag and
//!   returns the staged artifact.
//! - `triples()` serializes the staging cache only. It never queries the
//!   store — a property with an empty cache yields no facts even when the
//!   store holds matching persisted ones.
//!
//! A property instance is not safe for simultaneous use by multiple
//! callers; serialize access externally.

pub mod connection;
pub mod datatype;
pub mod neighbor;

pub use connection::{ConnectionProperty, Connections};
pub use datatype::{DatatypeProperty, Values};
pub use neighbor::{NeighborProperty, Neighbors};

use crate::model::{EntityId, Fact, Relation, RelationKind, Value};
use crate::store::RelationPattern;
use crate::Result;

// ============================================================================
// PropertyValue
// ============================================================================

/// A value flowing through the generic property surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Literal(Value),
    Entity(EntityId),
    Relation(Box<Relation>),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Literal(_) => "LITERAL",
            PropertyValue::Entity(_) => "ENTITY",
            PropertyValue::Relation(_) => "RELATION",
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(v: Value) -> Self {
        PropertyValue::Literal(v)
    }
}

impl From<EntityId> for PropertyValue {
    fn from(v: EntityId) -> Self {
        PropertyValue::Entity(v)
    }
}

impl From<Relation> for PropertyValue {
    fn from(v: Relation) -> Self {
        PropertyValue::Relation(Box::new(v))
    }
}

// ============================================================================
// Property Trait
// ============================================================================

/// Staged facts drained from a property cache.
pub type StagedFacts<'a> = Box<dyn Iterator<Item = Fact> + 'a>;

/// The object-safe surface shared by every property, used by the entity
/// registry for generic introspection and serialization. Typed `get`
/// methods live on the concrete types.
pub trait Property: Send + Sync {
    /// Attribute name, unique within the owning entity.
    fn name(&self) -> &str;

    /// Whether more than one value may be associated.
    fn multiple(&self) -> bool;

    /// Stage a value, subject to the multiplicity flag and the property's
    /// value type. Returns the staged artifact.
    ///
    /// Fails with [`crate::Error::TypeMismatch`] when handed a value of the
    /// wrong shape, and with [`crate::Error::Multiplicity`] on a second
    /// `set` of a single-valued property.
    fn set(&self, value: PropertyValue) -> Result<PropertyValue>;

    /// Read-only view of staged values. Relation-backed properties never
    /// keep a standalone value list and return an empty vec — their data
    /// flows through the typed `get` methods.
    fn defined_values(&self) -> Vec<PropertyValue>;

    fn values(&self) -> Vec<PropertyValue> {
        self.defined_values()
    }

    fn has_value(&self) -> bool {
        !self.defined_values().is_empty()
    }

    /// Facts this property currently knows about, from its staging cache
    /// only. Serialization support, not a query.
    fn triples(&self) -> StagedFacts<'_>;
}

// ============================================================================
// RelationFilter
// ============================================================================

/// Caller-supplied constraints on a relation query, composed with the
/// owner endpoint by the property issuing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationFilter {
    pub kind: Option<RelationKind>,
    pub attrs: Vec<(String, Value)>,
}

impl RelationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub(crate) fn pattern_with_pre(&self, owner: &EntityId) -> RelationPattern {
        RelationPattern {
            pre: Some(owner.clone()),
            post: None,
            kind: self.kind,
            attrs: self.attrs.clone(),
        }
    }

    pub(crate) fn pattern_with_post(&self, owner: &EntityId) -> RelationPattern {
        RelationPattern {
            pre: None,
            post: Some(owner.clone()),
            kind: self.kind,
            attrs: self.attrs.clone(),
        }
    }
}
