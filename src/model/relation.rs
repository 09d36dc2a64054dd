//! Relation (directed synaptic edge) between two entities.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::fact::{vocab, Fact, Term};
use super::{EntityId, Value};

/// Opaque relation identifier, assigned by the store on persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelId(pub u64);

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query direction relative to the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Relations with the owner as the pre endpoint.
    Pre,
    /// Relations with the owner as the post endpoint.
    Post,
    /// Pre results followed by post results, no deduplication.
    Either,
}

impl Direction {
    /// Resolve a direction from its wire/CLI name.
    ///
    /// Unrecognized names resolve to `Pre`. This degrade is inherited
    /// behavior; callers that want strictness should match on the enum.
    pub fn from_name(name: &str) -> Direction {
        match name {
            "post" => Direction::Post,
            "either" => Direction::Either,
            _ => Direction::Pre,
        }
    }
}

/// Flow tag of a chemical synapse, from the owner's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChemicalDirection {
    Send,
    Receive,
}

/// Kind discriminator on a relation: electrical gap junction, or chemical
/// synapse tagged with its flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    GapJunction,
    Chemical(ChemicalDirection),
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::GapJunction => "gapJunction",
            RelationKind::Chemical(ChemicalDirection::Send) => "send",
            RelationKind::Chemical(ChemicalDirection::Receive) => "receive",
        }
    }
}

/// Extra attributes on a relation (synapse count, neurotransmitter class...).
pub type AttrMap = HashMap<String, Value>;

/// A directed edge between two entities.
///
/// `id` is `None` while the relation is *ephemeral* — staged in a property
/// cache and not yet persisted. The store assigns an id on insertion; until
/// then the relation is visible only through the cache that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: Option<RelId>,
    pub pre: EntityId,
    pub post: EntityId,
    pub kind: Option<RelationKind>,
    pub attrs: AttrMap,
}

impl Relation {
    pub fn new(pre: impl Into<EntityId>, post: impl Into<EntityId>) -> Self {
        Self {
            id: None,
            pre: pre.into(),
            post: post.into(),
            kind: None,
            attrs: AttrMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: RelationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn is_ephemeral(&self) -> bool {
        self.id.is_none()
    }

    /// The "other" end of the relation from the given entity.
    pub fn other_end(&self, from: &EntityId) -> Option<&EntityId> {
        if *from == self.pre {
            Some(&self.post)
        } else if *from == self.post {
            Some(&self.pre)
        } else {
            None
        }
    }

    /// Subject term under which this relation reifies to facts.
    ///
    /// Persisted relations use their store id; ephemeral ones a blank label
    /// derived from the endpoints and kind.
    fn subject(&self) -> Term {
        match self.id {
            Some(id) => Term::Relation(id),
            None => Term::Blank(format!(
                "{}--{}--{}",
                self.pre,
                self.post,
                self.kind.map_or("untyped", |k| k.as_str()),
            )),
        }
    }

    /// Reify this relation as (subject, predicate, object) facts.
    pub fn triples(&self) -> Vec<Fact> {
        let subject = self.subject();
        let mut facts = vec![
            Fact::new(subject.clone(), vocab::PRE, Term::Entity(self.pre.clone())),
            Fact::new(subject.clone(), vocab::POST, Term::Entity(self.post.clone())),
        ];
        if let Some(kind) = self.kind {
            facts.push(Fact::new(
                subject.clone(),
                vocab::KIND,
                Term::Literal(Value::from(kind.as_str())),
            ));
        }
        for (key, value) in &self.attrs {
            facts.push(Fact::new(subject.clone(), key.clone(), Term::Literal(value.clone())));
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_name_degrades_to_pre() {
        assert_eq!(Direction::from_name("pre"), Direction::Pre);
        assert_eq!(Direction::from_name("post"), Direction::Post);
        assert_eq!(Direction::from_name("either"), Direction::Either);
        assert_eq!(Direction::from_name("sideways"), Direction::Pre);
    }

    #[test]
    fn test_other_end() {
        let rel = Relation::new("AVAL", "AVBL");
        assert_eq!(rel.other_end(&"AVAL".into()), Some(&"AVBL".into()));
        assert_eq!(rel.other_end(&"AVBL".into()), Some(&"AVAL".into()));
        assert_eq!(rel.other_end(&"PVCL".into()), None);
    }

    #[test]
    fn test_ephemeral_triples_use_blank_subject() {
        let rel = Relation::new("AVAL", "AVBL").with_kind(RelationKind::GapJunction);
        let facts = rel.triples();
        assert_eq!(facts.len(), 3);
        assert!(matches!(facts[0].subject, Term::Blank(_)));
        assert_eq!(facts[0].predicate, vocab::PRE);
    }

    #[test]
    fn test_persisted_triples_use_relation_subject() {
        let mut rel = Relation::new("AVAL", "AVBL");
        rel.id = Some(RelId(7));
        let facts = rel.triples();
        assert!(matches!(facts[0].subject, Term::Relation(RelId(7))));
    }
}
