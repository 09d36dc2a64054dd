//! Relation-query property: retrieve or count relations touching the owner.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Property, PropertyValue, RelationFilter, StagedFacts};
use crate::context::Context;
use crate::model::{Direction, EntityId, Relation};
use crate::store::{RelationStore, RelationStream};
use crate::{Error, Result};

/// Retrieves or counts relations between the owner and other entities,
/// filtered by direction.
///
/// `get` always queries the store; the local cache is a registration area
/// for already-constructed relations ([`set`]) and feeds only `triples()`.
///
/// [`set`]: ConnectionProperty::set
pub struct ConnectionProperty {
    owner: EntityId,
    context: Context,
    store: Arc<dyn RelationStore>,
    staged: RwLock<Vec<Relation>>,
}

impl ConnectionProperty {
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

    /// Relations touching the owner in the given direction. Restartable —
    /// each call re-issues its queries.
    ///
    /// `Either` runs the pre-endpoint query to exhaustion, then the
    /// post-endpoint query; results are not deduplicated, so a self-loop
    /// is yielded once per leg. The first failed leg aborts the whole
    /// sequence.
    pub fn get(&self, direction: Direction, filter: &RelationFilter) -> Connections<'_> {
        Connections::new(self, direction, filter.clone())
    }

    /// `get` with the direction given by name. Unrecognized names resolve
    /// to `pre` (see [`Direction::from_name`]).
    pub fn get_named(&self, direction: &str, filter: &RelationFilter) -> Connections<'_> {
        self.get(Direction::from_name(direction), filter)
    }

    /// Number of relations `get` would yield for the same arguments.
    ///
    /// Implemented by exhausting the underlying streams, not by a
    /// store-side count — this pays the full I/O cost of `get`.
    pub fn count(&self, direction: Direction, filter: &RelationFilter) -> Result<usize> {
        let mut total = 0;
        for relation in self.get(direction, filter) {
            relation?;
            total += 1;
        }
        Ok(total)
    }

    /// Register an already-constructed relation in the local cache.
    /// No store write, no query re-execution.
    pub fn set(&self, relation: Relation) -> Relation {
        debug!(owner = %self.owner, pre = %relation.pre, post = %relation.post, "relation registered");
        self.staged.write().push(relation.clone());
        relation
    }
}

impl Property for ConnectionProperty {
    fn name(&self) -> &str {
        "connection"
    }

    fn multiple(&self) -> bool {
        true
    }

    fn set(&self, value: PropertyValue) -> Result<PropertyValue> {
        match value {
            PropertyValue::Relation(relation) => {
                let staged = ConnectionProperty::set(self, *relation);
                Ok(PropertyValue::from(staged))
            }
            other => Err(Error::TypeMismatch {
                expected: "RELATION",
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
// Connections iterator
// ============================================================================

/// One endpoint-bound sub-query of a direction fan-out.
#[derive(Clone, Copy)]
enum Leg {
    Pre,
    Post,
}

/// Lazy sequence of relations produced by [`ConnectionProperty::get`].
///
/// Runs one store query per direction leg; a leg's query is issued only
/// once the previous leg is exhausted. Pre-direction results always precede
/// post-direction results. After the first error the iterator is fused.
pub struct Connections<'a> {
    prop: &'a ConnectionProperty,
    filter: RelationFilter,
    legs: std::vec::IntoIter<Leg>,
    current: Option<RelationStream<'a>>,
    done: bool,
}

impl<'a> Connections<'a> {
    fn new(prop: &'a ConnectionProperty, direction: Direction, filter: RelationFilter) -> Self {
        let legs = match direction {
            Direction::Pre => vec![Leg::Pre],
            Direction::Post => vec![Leg::Post],
            Direction::Either => vec![Leg::Pre, Leg::Post],
        };
        Self {
            prop,
            filter,
            legs: legs.into_iter(),
            current: None,
            done: false,
        }
    }

    fn open_leg(&self, leg: Leg) -> Result<RelationStream<'a>> {
        let pattern = match leg {
            Leg::Pre => self.filter.pattern_with_pre(&self.prop.owner),
            Leg::Post => self.filter.pattern_with_post(&self.prop.owner),
        };
        self.prop.store.relations(&pattern, &self.prop.context)
    }
}

impl Iterator for Connections<'_> {
    type Item = Result<Relation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(stream) = self.current.as_mut() {
                match stream.next() {
                    Some(Ok(relation)) => return Some(Ok(relation)),
                    Some(Err(e)) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }
            match self.legs.next() {
                Some(leg) => match self.open_leg(leg) {
                    Ok(stream) => self.current = Some(stream),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
