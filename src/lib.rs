//! # connectome-rs — Property-Mapped Connectome Model
//!
//! Neurons and their synaptic relations as queryable projections over a
//! backing fact store.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `RelationStore` is the contract between the property
//!    layer and storage
//! 2. **Clean DTOs**: `Relation`, `Fact`, `Value` cross all boundaries
//! 3. **Lazy properties**: reads are streams that re-execute per call;
//!    writes stage locally until an explicit persistence step
//! 4. **Explicit scope**: every query and insert carries a `Context`; the
//!    "no scope" sentinel is a value, not a global
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use connectome_rs::{
//!     Connected, Context, Direction, MemoryStore, Neuron, Relation, RelationFilter,
//!     RelationKind, RelationStore,
//! };
//!
//! # fn main() -> connectome_rs::Result<()> {
//! let store: Arc<dyn RelationStore> = Arc::new(MemoryStore::new());
//!
//! // Persist one gap junction: AVAL -> AVBL.
//! store.insert_relation(
//!     &Relation::new("AVAL", "AVBL").with_kind(RelationKind::GapJunction),
//!     &Context::background(),
//! )?;
//!
//! let aval = Neuron::new("AVAL", store);
//! assert_eq!(aval.connection().count(Direction::Pre, &RelationFilter::new())?, 1);
//! assert_eq!(aval.gap_junction_degree()?, 1);
//!
//! // Stage a neighbor without touching the store.
//! aval.neighbor().set("PVCL");
//! let staged: Vec<_> = aval
//!     .neighbor()
//!     .get(&RelationFilter::new())?
//!     .collect::<connectome_rs::Result<_>>()?;
//! assert_eq!(staged, vec!["PVCL".into()]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | Memory | `store::memory` | In-memory reference store for testing/embedding |

// ============================================================================
// Modules
// ============================================================================

pub mod cell;
pub mod context;
pub mod export;
pub mod model;
pub mod neuron;
pub mod property;
pub mod store;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    AttrMap, ChemicalDirection, Direction, EntityId, Fact, RelId, Relation, RelationKind, Term,
    Value,
};

// ============================================================================
// Re-exports: Context & Store
// ============================================================================

pub use context::Context;
pub use store::{FactPattern, MemoryStore, RelationPattern, RelationStore};

// ============================================================================
// Re-exports: Properties & Entities
// ============================================================================

pub use cell::Cell;
pub use neuron::{Connected, Neuron, NeuronProxy};
pub use property::{
    ConnectionProperty, DatatypeProperty, NeighborProperty, Property, PropertyValue,
    RelationFilter,
};

// ============================================================================
// Re-exports: Export
// ============================================================================

pub use export::{export_staged, export_store};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("multiplicity violation: property '{property}' on '{owner}' is single-valued")]
    Multiplicity { property: String, owner: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("store query failed: {0}")]
    StoreQuery(String),

    #[error("store write failed: {0}")]
    StoreWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
