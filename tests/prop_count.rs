//! Property-based invariants over the direction fan-out and staging.

use std::sync::Arc;

use proptest::prelude::*;

use connectome_rs::{
    ChemicalDirection, Connected, Context, Direction, MemoryStore, Neuron, Relation,
    RelationFilter, RelationKind, RelationStore,
};

const NAMES: [&str; 6] = ["AVAL", "AVBL", "PVCL", "DD1", "RIML", "SAB1"];

fn kind_from_index(i: u8) -> Option<RelationKind> {
    match i % 4 {
        0 => None,
        1 => Some(RelationKind::GapJunction),
        2 => Some(RelationKind::Chemical(ChemicalDirection::Send)),
        _ => Some(RelationKind::Chemical(ChemicalDirection::Receive)),
    }
}

fn build_store(edges: &[(u8, u8, u8)]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for (pre, post, kind) in edges {
        let mut relation = Relation::new(
            NAMES[(*pre % 6) as usize],
            NAMES[(*post % 6) as usize],
        );
        if let Some(kind) = kind_from_index(*kind) {
            relation = relation.with_kind(kind);
        }
        store
            .insert_relation(&relation, &Context::background())
            .unwrap();
    }
    store
}

proptest! {
    /// No deduplication anywhere: the either fan-out is exactly the
    /// concatenation of the pre and post legs, self-loops included.
    #[test]
    fn count_either_is_count_pre_plus_count_post(
        edges in proptest::collection::vec((0u8..6, 0u8..6, 0u8..4), 0..40)
    ) {
        let owner = Neuron::new("AVAL", build_store(&edges));
        let filter = RelationFilter::new();

        let pre = owner.connection().count(Direction::Pre, &filter).unwrap();
        let post = owner.connection().count(Direction::Post, &filter).unwrap();
        let either = owner.connection().count(Direction::Either, &filter).unwrap();
        prop_assert_eq!(either, pre + post);
    }

    /// count() is defined by exhausting get()'s streams.
    #[test]
    fn count_matches_get_length_per_direction(
        edges in proptest::collection::vec((0u8..6, 0u8..6, 0u8..4), 0..40)
    ) {
        let owner = Neuron::new("AVAL", build_store(&edges));
        let filter = RelationFilter::new();

        for direction in [Direction::Pre, Direction::Post, Direction::Either] {
            let counted = owner.connection().count(direction, &filter).unwrap();
            let streamed = owner.connection().get(direction, &filter).count();
            prop_assert_eq!(counted, streamed);
        }
    }

    /// Both degree metrics draw from the relations touching the owner.
    #[test]
    fn degrees_never_exceed_the_touching_relation_count(
        edges in proptest::collection::vec((0u8..6, 0u8..6, 0u8..4), 0..40)
    ) {
        let owner = Neuron::new("AVAL", build_store(&edges));
        let either = owner
            .connection()
            .count(Direction::Either, &RelationFilter::new())
            .unwrap();

        prop_assert!(owner.gap_junction_degree().unwrap() <= either);
        prop_assert!(owner.chemical_synapse_degree().unwrap() <= either);
    }

    /// Staged neighbors come back exactly, in staging order, regardless of
    /// what the store holds.
    #[test]
    fn staged_neighbors_are_returned_exactly(
        posts in proptest::collection::vec(0u8..6, 1..12),
        edges in proptest::collection::vec((0u8..6, 0u8..6, 0u8..4), 0..10)
    ) {
        let owner = Neuron::new("AVAL", build_store(&edges));
        for post in &posts {
            owner.neighbor().set(NAMES[(*post % 6) as usize]);
        }

        let got: Vec<String> = owner
            .neighbor()
            .get(&RelationFilter::new())
            .unwrap()
            .map(|n| n.unwrap().to_string())
            .collect();
        let want: Vec<String> = posts
            .iter()
            .map(|post| NAMES[(*post % 6) as usize].to_string())
            .collect();
        prop_assert_eq!(got, want);
    }
}
