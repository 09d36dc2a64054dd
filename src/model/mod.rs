//! # Connectome Data Model
//!
//! Clean DTOs shared by every layer: store ↔ properties ↔ entities ↔ user.
//!
//! Design rule: this module is pure data — no I/O, no locks, no store
//! handles. Anything that queries lives in `store` or `property`.

pub mod entity;
pub mod fact;
pub mod relation;
pub mod value;

pub use entity::EntityId;
pub use fact::{vocab, Fact, Term};
pub use relation::{AttrMap, ChemicalDirection, Direction, RelId, Relation, RelationKind};
pub use value::Value;
