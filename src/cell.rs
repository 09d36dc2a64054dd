//! Base entity: a named cell with datatype attributes and a property registry.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::context::Context;
use crate::model::{EntityId, Fact};
use crate::property::{DatatypeProperty, Property};
use crate::store::RelationStore;

/// A named biological entity.
///
/// Owns its properties exclusively and holds them in an explicit registry
/// keyed by attribute name; attribute access goes through named accessors
/// dispatched over that registry, never reflection.
pub struct Cell {
    name: EntityId,
    context: Context,
    store: Arc<dyn RelationStore>,
    registry: HashMap<String, Arc<dyn Property>>,
    lineage_name: Arc<DatatypeProperty>,
    description: Arc<DatatypeProperty>,
}

impl Cell {
    pub fn new(name: impl Into<EntityId>, store: Arc<dyn RelationStore>) -> Self {
        Self::with_context(name, store, Context::background())
    }

    pub fn with_context(
        name: impl Into<EntityId>,
        store: Arc<dyn RelationStore>,
        context: Context,
    ) -> Self {
        let name = name.into();
        let lineage_name = Arc::new(DatatypeProperty::new(
            "lineage_name",
            name.clone(),
            false,
            context.clone(),
            store.clone(),
        ));
        let description = Arc::new(DatatypeProperty::new(
            "description",
            name.clone(),
            false,
            context.clone(),
            store.clone(),
        ));

        let mut registry: HashMap<String, Arc<dyn Property>> = HashMap::new();
        registry.insert("lineage_name".to_owned(), lineage_name.clone());
        registry.insert("description".to_owned(), description.clone());

        Self {
            name,
            context,
            store,
            registry,
            lineage_name,
            description,
        }
    }

    /// Create, register, and return a datatype property bound to this
    /// entity's name, context, and store.
    pub fn register_datatype(&mut self, name: &str, multiple: bool) -> Arc<DatatypeProperty> {
        let property = Arc::new(DatatypeProperty::new(
            name,
            self.name.clone(),
            multiple,
            self.context.clone(),
            self.store.clone(),
        ));
        self.registry
            .insert(name.to_owned(), property.clone() as Arc<dyn Property>);
        property
    }

    /// Register an externally constructed property under its own name.
    pub fn register(&mut self, property: Arc<dyn Property>) {
        self.registry.insert(property.name().to_owned(), property);
    }

    pub fn name(&self) -> &EntityId {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn store(&self) -> &Arc<dyn RelationStore> {
        &self.store
    }

    pub fn lineage_name(&self) -> &DatatypeProperty {
        &self.lineage_name
    }

    pub fn description(&self) -> &DatatypeProperty {
        &self.description
    }

    /// Generic registry lookup.
    pub fn property(&self, name: &str) -> Option<&dyn Property> {
        self.registry.get(name).map(|p| p.as_ref())
    }

    pub fn properties(&self) -> impl Iterator<Item = &dyn Property> {
        self.registry.values().map(|p| p.as_ref())
    }

    /// Staged facts across every registered property.
    pub fn triples(&self) -> Vec<Fact> {
        self.registry
            .values()
            .flat_map(|property| property.triples())
            .collect()
    }

    /// Generic re-scoping fallback: a fresh cell bound to `context`, with
    /// empty staging caches. For entities with relation properties, use
    /// their own `contextualize` to obtain a relation-aware proxy instead.
    pub fn contextualize(&self, context: &Context) -> Cell {
        Cell::with_context(self.name.clone(), self.store.clone(), context.clone())
    }
}
