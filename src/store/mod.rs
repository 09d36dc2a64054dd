//! # Relation Store Contract
//!
//! This is THE contract between the property layer and any fact store.
//! The property framework never touches storage directly — it issues
//! pattern queries and insertions through this trait, always scoped to an
//! explicit [`Context`].
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory reference store for testing/embedding |
//!
//! Every call is synchronous and may block on I/O; no timeout or
//! cancellation is defined at this layer. Callers needing cancellation must
//! wrap calls externally.

pub mod memory;

pub use memory::MemoryStore;

use crate::context::Context;
use crate::model::{EntityId, Fact, RelId, Relation, RelationKind, Term, Value};
use crate::Result;

// ============================================================================
// Streams
// ============================================================================

/// Lazy, finite stream of relations. Each element is pulled on demand; a
/// stream is consumed once — restarting means re-issuing the query.
pub type RelationStream<'a> = Box<dyn Iterator<Item = Result<Relation>> + 'a>;

/// Lazy, finite stream of facts.
pub type FactStream<'a> = Box<dyn Iterator<Item = Result<Fact>> + 'a>;

// ============================================================================
// Patterns
// ============================================================================

/// A relation query pattern. Any subset of the fields may be bound; unbound
/// fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationPattern {
    pub pre: Option<EntityId>,
    pub post: Option<EntityId>,
    pub kind: Option<RelationKind>,
    /// Attribute equality constraints; every listed pair must be present.
    pub attrs: Vec<(String, Value)>,
}

impl RelationPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pre(mut self, pre: impl Into<EntityId>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    pub fn with_post(mut self, post: impl Into<EntityId>) -> Self {
        self.post = Some(post.into());
        self
    }

    pub fn with_kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn matches(&self, relation: &Relation) -> bool {
        if let Some(pre) = &self.pre {
            if relation.pre != *pre {
                return false;
            }
        }
        if let Some(post) = &self.post {
            if relation.post != *post {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if relation.kind != Some(kind) {
                return false;
            }
        }
        self.attrs
            .iter()
            .all(|(key, value)| relation.attrs.get(key) == Some(value))
    }
}

/// A triple query pattern over raw facts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactPattern {
    pub subject: Option<Term>,
    pub predicate: Option<String>,
    pub object: Option<Term>,
}

impl FactPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, fact: &Fact) -> bool {
        if let Some(subject) = &self.subject {
            if fact.subject != *subject {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if fact.predicate != *predicate {
                return false;
            }
        }
        if let Some(object) = &self.object {
            if fact.object != *object {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// RelationStore Trait
// ============================================================================

/// The universal fact-store contract.
///
/// Query results preserve the store's own ordering for a given pattern, and
/// every stream re-reads the store when re-issued — implementations must not
/// memoize across calls. Failures surface as [`crate::Error::StoreQuery`] /
/// [`crate::Error::StoreWrite`] and are never swallowed by the property
/// layer above.
pub trait RelationStore: Send + Sync {
    /// All relations matching `pattern`, visible under `context`.
    fn relations(&self, pattern: &RelationPattern, context: &Context)
        -> Result<RelationStream<'_>>;

    /// All raw facts matching `pattern`, visible under `context`.
    fn facts(&self, pattern: &FactPattern, context: &Context) -> Result<FactStream<'_>>;

    /// Persist a relation under `context`, assigning its id.
    ///
    /// This is the explicit persistence step that turns an ephemeral
    /// relation into a queryable one; the property layer never calls it.
    fn insert_relation(&self, relation: &Relation, context: &Context) -> Result<RelId>;

    /// Append one fact under `context`. Best-effort; failure propagates.
    fn insert_fact(&self, fact: Fact, context: &Context) -> Result<()>;

    /// Total number of persisted relations, across all contexts.
    fn relation_count(&self) -> Result<u64>;

    /// Total number of raw facts, across all contexts.
    fn fact_count(&self) -> Result<u64>;
}
