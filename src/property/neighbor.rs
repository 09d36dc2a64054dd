//! Adjacency property: which entities sit directly downstream of the owner.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Property, PropertyValue, RelationFilter, StagedFacts};
use crate::context::Context;
use crate::model::{EntityId, Relation, RelationKind};
use crate::store::{RelationStore, RelationStream};
use crate::{Error, Result};

/// Answers "which entities are adjacent to the owner", where adjacency is
/// the existence of a relation with the owner as the pre endpoint.
///
/// Reads are cache-first: once any relation has been staged with [`set`],
/// `get` yields only the staged endpoints — not a merge with persisted
/// ones. Staged-but-unpersisted state stays visibly separate from
/// committed state until the external persistence step runs.
///
/// [`set`]: NeighborProperty::set
pub struct NeighborProperty {
    owner: EntityId,
    context: Context,
    store: Arc<dyn RelationStore>,
    staged: RwLock<Vec<Relation>>,
}

impl NeighborProperty {
    pub(crate) fn new(owner: EntityId, context: Context, store: Arc<dyn RelationStore>) -> Self {
        Self {
            owner,
            context,
            store,
            staged: RwLock::new(Vec::new()),
        }
    }

    pub fn owner(&self) -> &EntityId {
        &self.owner
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Adjacent entities. Restartable — each call re-evaluates.
    ///
    /// With a non-empty staging cache this yields the cached relations'
    /// post endpoints and does not consult the store; the filter applies
    /// only to the store-query path.
    pub fn get(&self, filter: &RelationFilter) -> Result<Neighbors<'_>> {
        let staged = self.staged.read();
        if !staged.is_empty() {
            let posts: Vec<EntityId> = staged.iter().map(|rel| rel.post.clone()).collect();
            return Ok(Neighbors(NeighborsInner::Staged(posts.into_iter())));
        }
        drop(staged);

        let pattern = filter.pattern_with_pre(&self.owner);
        let stream = self.store.relations(&pattern, &self.context)?;
        Ok(Neighbors(NeighborsInner::Stored(stream)))
    }

    /// State that `post` is adjacent to the owner: creates an ephemeral
    /// relation, stages it, and returns it. The store is never touched.
    pub fn set(&self, post: impl Into<EntityId>) -> Relation {
        self.stage(Relation::new(self.owner.clone(), post))
    }

    /// Like [`set`], with a kind on the staged relation.
    ///
    /// [`set`]: NeighborProperty::set
    pub fn set_with(&self, post: impl Into<EntityId>, kind: RelationKind) -> Relation {
        self.stage(Relation::new(self.owner.clone(), post).with_kind(kind))
    }

    fn stage(&self, relation: Relation) -> Relation {
        debug!(owner = %self.owner, post = %relation.post, "neighbor relation staged");
        self.staged.write().push(relation.clone());
        relation
    }
}

impl Property for NeighborProperty {
    fn name(&self) -> &str {
        "neighbor"
    }

    fn multiple(&self) -> bool {
        true
    }

    fn set(&self, value: PropertyValue) -> Result<PropertyValue> {
        match value {
            PropertyValue::Entity(post) => {
                let staged = NeighborProperty::set(self, post);
                Ok(PropertyValue::from(staged))
            }
            other => Err(Error::TypeMismatch {
                expected: "ENTITY",
                got: other.type_name(),
            }),
        }
    }

    fn defined_values(&self) -> Vec<PropertyValue> {
        Vec::new()
    }

    fn triples(&self) -> StagedFacts<'_> {
        let facts: Vec<_> = self
            .staged
            .read()
            .iter()
            .flat_map(|rel| rel.triples())
            .collect();
        Box::new(facts.into_iter())
    }
}

// ============================================================================
// Neighbors iterator
// ============================================================================

/// Lazy sequence of adjacent entity ids produced by [`NeighborProperty::get`].
pub struct Neighbors<'a>(NeighborsInner<'a>);

enum NeighborsInner<'a> {
    Staged(std::vec::IntoIter<EntityId>),
    Stored(RelationStream<'a>),
}

impl Iterator for Neighbors<'_> {
    type Item = Result<EntityId>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            NeighborsInner::Staged(posts) => posts.next().map(Ok),
            NeighborsInner::Stored(stream) => {
                Some(stream.next()?.map(|relation| relation.post))
            }
        }
    }
}
