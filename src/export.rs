//! Fact-line export — serialize store contents and staged property state.
//!
//! Produces a plain-text dump, one `subject predicate object .` line per
//! fact, suitable for diffing two stores or inspecting what an entity has
//! staged but not yet persisted.
//!
//! ```text
//! connectome model → export_store() → fact lines
//!   → diff against another dump, or eyeball in a pager
//! ```

use std::io::Write;

use crate::context::Context;
use crate::neuron::Neuron;
use crate::store::{FactPattern, RelationPattern, RelationStore};
use crate::Result;

/// Export everything a store holds, across all contexts, as fact lines.
///
/// Relations are reified through their triples; raw facts follow verbatim.
pub fn export_store(store: &dyn RelationStore, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# connectome fact dump")?;
    writeln!(writer, "# relations: {}", store.relation_count()?)?;
    writeln!(writer, "# facts: {}", store.fact_count()?)?;
    writeln!(writer)?;

    let background = Context::background();
    for relation in store.relations(&RelationPattern::new(), &background)? {
        for fact in relation?.triples() {
            writeln!(writer, "{fact}")?;
        }
    }
    for fact in store.facts(&FactPattern::new(), &background)? {
        writeln!(writer, "{}", fact?)?;
    }
    Ok(())
}

/// Export a neuron's staged-but-unpersisted state as fact lines.
///
/// Cache-only by construction: properties serialize their staging caches
/// and never re-query the store.
pub fn export_staged(neuron: &Neuron, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# staged facts for {}", neuron.name())?;
    for fact in neuron.triples() {
        writeln!(writer, "{fact}")?;
    }
    Ok(())
}
