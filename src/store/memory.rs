//! In-memory relation store.
//!
//! This is the reference implementation of `RelationStore`.
//! It uses hashbrown maps protected by RwLock, with pre/post adjacency
//! indexes so endpoint-bound queries avoid full scans.
//!
//! ## Limitations
//!
//! - **No persistence**: contents live and die with the process.
//! - **No attribute indexes**: attribute constraints post-filter candidate
//!   relations.
//! - **Coarse locking**: per-table locks; a query snapshots its result set
//!   under the read lock, so streams never observe writes made after the
//!   query was issued.
//!
//! Use this store for:
//! - Testing the property layer without an external fact store
//! - Embedding a connectome model in applications that don't need persistence

use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{FactPattern, FactStream, RelationPattern, RelationStore, RelationStream};
use crate::context::Context;
use crate::model::{EntityId, Fact, RelId, Relation};
use crate::Result;

// ============================================================================
// MemoryStore
// ============================================================================

type RelIdList = SmallVec<[RelId; 4]>;

struct StoredRelation {
    relation: Relation,
    context: Context,
}

struct StoredFact {
    fact: Fact,
    context: Context,
}

/// In-memory fact store.
#[derive(Default)]
pub struct MemoryStore {
    relations: RwLock<HashMap<RelId, StoredRelation>>,
    /// pre entity → relation ids, in insertion order
    pre_index: RwLock<HashMap<EntityId, RelIdList>>,
    /// post entity → relation ids, in insertion order
    post_index: RwLock<HashMap<EntityId, RelIdList>>,
    facts: RwLock<Vec<StoredFact>>,
    next_rel_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate relation ids for a pattern: the narrower adjacency list if
    /// an endpoint is bound, otherwise every id in insertion order.
    fn candidates(&self, pattern: &RelationPattern) -> RelIdList {
        if let Some(pre) = &pattern.pre {
            self.pre_index.read().get(pre).cloned().unwrap_or_default()
        } else if let Some(post) = &pattern.post {
            self.post_index.read().get(post).cloned().unwrap_or_default()
        } else {
            // Ids ascend in insertion order, so sorting restores it.
            let mut ids: RelIdList = self.relations.read().keys().copied().collect();
            ids.sort_unstable_by_key(|id| id.0);
            ids
        }
    }
}

// ============================================================================
// RelationStore impl
// ============================================================================

impl RelationStore for MemoryStore {
    fn relations(
        &self,
        pattern: &RelationPattern,
        context: &Context,
    ) -> Result<RelationStream<'_>> {
        let candidates = self.candidates(pattern);
        let table = self.relations.read();

        let mut matched = Vec::new();
        for id in candidates {
            if let Some(stored) = table.get(&id) {
                if context.admits(&stored.context) && pattern.matches(&stored.relation) {
                    matched.push(stored.relation.clone());
                }
            }
        }
        trace!(context = %context, matched = matched.len(), "relation pattern query");

        Ok(Box::new(matched.into_iter().map(Ok)))
    }

    fn facts(&self, pattern: &FactPattern, context: &Context) -> Result<FactStream<'_>> {
        let table = self.facts.read();
        let matched: Vec<Fact> = table
            .iter()
            .filter(|stored| context.admits(&stored.context) && pattern.matches(&stored.fact))
            .map(|stored| stored.fact.clone())
            .collect();
        trace!(context = %context, matched = matched.len(), "fact pattern query");

        Ok(Box::new(matched.into_iter().map(Ok)))
    }

    fn insert_relation(&self, relation: &Relation, context: &Context) -> Result<RelId> {
        let id = RelId(self.next_rel_id.fetch_add(1, Ordering::Relaxed));
        let mut stored = relation.clone();
        stored.id = Some(id);

        // A self-loop lands in both indexes and is yielded once per
        // direction by an `either` fan-out.
        self.pre_index
            .write()
            .entry(stored.pre.clone())
            .or_default()
            .push(id);
        self.post_index
            .write()
            .entry(stored.post.clone())
            .or_default()
            .push(id);
        self.relations.write().insert(
            id,
            StoredRelation {
                relation: stored,
                context: context.clone(),
            },
        );

        debug!(id = %id, context = %context, "relation persisted");
        Ok(id)
    }

    fn insert_fact(&self, fact: Fact, context: &Context) -> Result<()> {
        debug!(context = %context, "fact recorded");
        self.facts.write().push(StoredFact {
            fact,
            context: context.clone(),
        });
        Ok(())
    }

    fn relation_count(&self) -> Result<u64> {
        Ok(self.relations.read().len() as u64)
    }

    fn fact_count(&self) -> Result<u64> {
        Ok(self.facts.read().len() as u64)
    }
}

// ============================================================================
// Tests
// ============================================================================
