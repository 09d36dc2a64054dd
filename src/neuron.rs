//! Neuron entity, its relation properties, and context-scoped views.

use std::sync::Arc;

use crate::cell::Cell;
use crate::context::Context;
use crate::model::{ChemicalDirection, Direction, EntityId, Fact, RelationKind};
use crate::property::{
    ConnectionProperty, DatatypeProperty, NeighborProperty, Property, RelationFilter,
};
use crate::store::RelationStore;
use crate::Result;

// ============================================================================
// Connected trait
// ============================================================================

/// The relation surface shared by a neuron and its context-scoped proxy.
///
/// Implemented explicitly by both sides; the proxy overrides the two
/// relation properties and delegates everything else verbatim.
pub trait Connected {
    fn neighbor(&self) -> &NeighborProperty;

    fn connection(&self) -> &ConnectionProperty;

    /// Number of gap junctions touching this neuron, at either endpoint.
    fn gap_junction_degree(&self) -> Result<usize> {
        let mut degree = 0;
        for relation in self.connection().get(Direction::Either, &RelationFilter::new()) {
            if relation?.kind == Some(RelationKind::GapJunction) {
                degree += 1;
            }
        }
        Ok(degree)
    }

    /// Number of chemical synapses tagged `send` among relations touching
    /// this neuron.
    ///
    /// Deliberately narrower than [`gap_junction_degree`]: the gap-junction
    /// count takes both endpoints, while this one takes only the `send`
    /// tag. Inherited asymmetry, kept as-is.
    ///
    /// [`gap_junction_degree`]: Connected::gap_junction_degree
    fn chemical_synapse_degree(&self) -> Result<usize> {
        let mut degree = 0;
        for relation in self.connection().get(Direction::Either, &RelationFilter::new()) {
            if relation?.kind == Some(RelationKind::Chemical(ChemicalDirection::Send)) {
                degree += 1;
            }
        }
        Ok(degree)
    }
}

// ============================================================================
// Neuron
// ============================================================================

/// A neuron.
///
/// Owns a [`NeighborProperty`] and a [`ConnectionProperty`] constructed at
/// creation time, plus the datatype attributes carried over from the cell
/// catalog: type, receptors, innexins, neurotransmitters, neuropeptides.
pub struct Neuron {
    cell: Cell,
    neuron_type: Arc<DatatypeProperty>,
    receptor: Arc<DatatypeProperty>,
    innexin: Arc<DatatypeProperty>,
    neurotransmitter: Arc<DatatypeProperty>,
    neuropeptide: Arc<DatatypeProperty>,
    neighbor: Arc<NeighborProperty>,
    connection: Arc<ConnectionProperty>,
}

impl Neuron {
    pub fn new(name: impl Into<EntityId>, store: Arc<dyn RelationStore>) -> Self {
        Self::with_context(name, store, Context::background())
    }

    pub fn with_context(
        name: impl Into<EntityId>,
        store: Arc<dyn RelationStore>,
        context: Context,
    ) -> Self {
        let mut cell = Cell::with_context(name, store.clone(), context.clone());

        let neighbor = Arc::new(NeighborProperty::new(
            cell.name().clone(),
            context.clone(),
            store.clone(),
        ));
        cell.register(neighbor.clone());

        let connection = Arc::new(ConnectionProperty::new(
            cell.name().clone(),
            context.clone(),
            store,
        ));
        cell.register(connection.clone());

        let neuron_type = cell.register_datatype("type", true);
        let receptor = cell.register_datatype("receptor", true);
        let innexin = cell.register_datatype("innexin", true);
        let neurotransmitter = cell.register_datatype("neurotransmitter", true);
        let neuropeptide = cell.register_datatype("neuropeptide", true);

        Self {
            cell,
            neuron_type,
            receptor,
            innexin,
            neurotransmitter,
            neuropeptide,
            neighbor,
            connection,
        }
    }

    pub fn name(&self) -> &EntityId {
        self.cell.name()
    }

    pub fn context(&self) -> &Context {
        self.cell.context()
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn store(&self) -> &Arc<dyn RelationStore> {
        self.cell.store()
    }

    pub fn neuron_type(&self) -> &DatatypeProperty {
        &self.neuron_type
    }

    pub fn receptor(&self) -> &DatatypeProperty {
        &self.receptor
    }

    /// Alias for [`receptor`](Neuron::receptor).
    pub fn receptors(&self) -> &DatatypeProperty {
        &self.receptor
    }

    pub fn innexin(&self) -> &DatatypeProperty {
        &self.innexin
    }

    pub fn neurotransmitter(&self) -> &DatatypeProperty {
        &self.neurotransmitter
    }

    pub fn neuropeptide(&self) -> &DatatypeProperty {
        &self.neuropeptide
    }

    pub fn lineage_name(&self) -> &DatatypeProperty {
        self.cell.lineage_name()
    }

    pub fn description(&self) -> &DatatypeProperty {
        self.cell.description()
    }

    /// Alias for [`neighbor`](Connected::neighbor).
    pub fn neighbors(&self) -> &NeighborProperty {
        &self.neighbor
    }

    /// Generic registry lookup.
    pub fn property(&self, name: &str) -> Option<&dyn Property> {
        self.cell.property(name)
    }

    /// Staged facts across every property.
    pub fn triples(&self) -> Vec<Fact> {
        self.cell.triples()
    }

    /// A relation-aware view of this neuron scoped to `context`.
    ///
    /// The proxy carries fresh neighbor and connection properties bound to
    /// `context` — their staging caches are never shared with this neuron
    /// or with proxies for other contexts — and forwards everything else
    /// here. This neuron is left untouched and keeps its own scope.
    pub fn contextualize<'a>(&'a self, context: &Context) -> NeuronProxy<'a> {
        NeuronProxy {
            neighbor: NeighborProperty::new(
                self.name().clone(),
                context.clone(),
                self.store().clone(),
            ),
            connection: ConnectionProperty::new(
                self.name().clone(),
                context.clone(),
                self.store().clone(),
            ),
            context: context.clone(),
            inner: self,
        }
    }
}

impl Connected for Neuron {
    fn neighbor(&self) -> &NeighborProperty {
        &self.neighbor
    }

    fn connection(&self) -> &ConnectionProperty {
        &self.connection
    }
}

// ============================================================================
// NeuronProxy
// ============================================================================

/// A neuron view scoped to one context.
///
/// Owns its two context-bound relation properties; holds a non-owning
/// reference to the wrapped neuron, whose lifetime is independent.
pub struct NeuronProxy<'a> {
    inner: &'a Neuron,
    context: Context,
    neighbor: NeighborProperty,
    connection: ConnectionProperty,
}

impl NeuronProxy<'_> {
    pub fn inner(&self) -> &Neuron {
        self.inner
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn name(&self) -> &EntityId {
        self.inner.name()
    }

    pub fn neuron_type(&self) -> &DatatypeProperty {
        self.inner.neuron_type()
    }

    pub fn receptor(&self) -> &DatatypeProperty {
        self.inner.receptor()
    }

    pub fn receptors(&self) -> &DatatypeProperty {
        self.inner.receptors()
    }

    pub fn innexin(&self) -> &DatatypeProperty {
        self.inner.innexin()
    }

    pub fn neurotransmitter(&self) -> &DatatypeProperty {
        self.inner.neurotransmitter()
    }

    pub fn neuropeptide(&self) -> &DatatypeProperty {
        self.inner.neuropeptide()
    }

    pub fn lineage_name(&self) -> &DatatypeProperty {
        self.inner.lineage_name()
    }

    pub fn description(&self) -> &DatatypeProperty {
        self.inner.description()
    }

    pub fn property(&self, name: &str) -> Option<&dyn Property> {
        self.inner.property(name)
    }
}

impl Connected for NeuronProxy<'_> {
    fn neighbor(&self) -> &NeighborProperty {
        &self.neighbor
    }

    fn connection(&self) -> &ConnectionProperty {
        &self.connection
    }
}
