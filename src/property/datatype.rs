//! Scalar datatype attributes (neuron type, receptors, neurotransmitters...).

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Property, PropertyValue, StagedFacts};
use crate::context::Context;
use crate::model::{EntityId, Fact, Term, Value};
use crate::store::{FactPattern, FactStream, RelationStore};
use crate::{Error, Result};

/// An owner-scoped scalar attribute, optionally multi-valued.
///
/// Writes stage literals locally; reads are cache-first and fall back to a
/// `(owner, attribute, ?)` fact query when nothing is staged.
pub struct DatatypeProperty {
    name: String,
    owner: EntityId,
    multiple: bool,
    context: Context,
    store: Arc<dyn RelationStore>,
    staged: RwLock<Vec<Value>>,
}

impl DatatypeProperty {
    pub(crate) fn new(
        name: impl Into<String>,
        owner: EntityId,
        multiple: bool,
        context: Context,
        store: Arc<dyn RelationStore>,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            multiple,
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

    /// Current values: staged literals if any exist, otherwise a fresh fact
    /// query. Restartable — each call re-evaluates.
    pub fn get(&self) -> Result<Values<'_>> {
        let staged = self.staged.read();
        if !staged.is_empty() {
            return Ok(Values(ValuesInner::Staged(staged.to_vec().into_iter())));
        }
        drop(staged);

        let pattern = FactPattern::new()
            .with_subject(Term::Entity(self.owner.clone()))
            .with_predicate(self.name.clone());
        let stream = self.store.facts(&pattern, &self.context)?;
        Ok(Values(ValuesInner::Stored(stream)))
    }

    /// First value, if any. Convenience over `get`.
    pub fn one(&self) -> Result<Option<Value>> {
        self.get()?.next().transpose()
    }

    /// Stage a literal. Rejected with [`Error::Multiplicity`] when the
    /// property is single-valued and already holds a staged value.
    pub fn set(&self, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        let mut staged = self.staged.write();
        if !self.multiple && !staged.is_empty() {
            return Err(Error::Multiplicity {
                property: self.name.clone(),
                owner: self.owner.to_string(),
            });
        }
        debug!(owner = %self.owner, property = %self.name, "literal staged");
        staged.push(value.clone());
        Ok(value)
    }
}

impl Property for DatatypeProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn multiple(&self) -> bool {
        self.multiple
    }

    fn set(&self, value: PropertyValue) -> Result<PropertyValue> {
        match value {
            PropertyValue::Literal(v) => {
                let staged = DatatypeProperty::set(self, v)?;
                Ok(PropertyValue::Literal(staged))
            }
            other => Err(Error::TypeMismatch {
                expected: "LITERAL",
                got: other.type_name(),
            }),
        }
    }

    fn defined_values(&self) -> Vec<PropertyValue> {
        self.staged
            .read()
            .iter()
            .cloned()
            .map(PropertyValue::Literal)
            .collect()
    }

    fn triples(&self) -> StagedFacts<'_> {
        let facts: Vec<Fact> = self
            .staged
            .read()
            .iter()
            .map(|value| {
                Fact::new(
                    Term::Entity(self.owner.clone()),
                    self.name.clone(),
                    Term::Literal(value.clone()),
                )
            })
            .collect();
        Box::new(facts.into_iter())
    }
}

// ============================================================================
// Values iterator
// ============================================================================

/// Lazy sequence of literal values produced by [`DatatypeProperty::get`].
pub struct Values<'a>(ValuesInner<'a>);

enum ValuesInner<'a> {
    Staged(std::vec::IntoIter<Value>),
    Stored(FactStream<'a>),
}

impl Iterator for Values<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            ValuesInner::Staged(values) => values.next().map(Ok),
            ValuesInner::Stored(stream) => loop {
                match stream.next()? {
                    Ok(fact) => {
                        if let Term::Literal(value) = fact.object {
                            return Some(Ok(value));
                        }
                    }
                    Err(e) => return Some(Err(e)),
                }
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
