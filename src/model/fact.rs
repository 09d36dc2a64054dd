//! Facts — (subject, predicate, object) statements.

use serde::{Deserialize, Serialize};

use super::{EntityId, RelId, Value};

/// Predicate names used when relations and attributes reify to facts.
pub mod vocab {
    pub const PRE: &str = "pre";
    pub const POST: &str = "post";
    pub const KIND: &str = "kind";
}

/// A term in subject or object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Entity(EntityId),
    Relation(RelId),
    Blank(String),
    Literal(Value),
}

impl Term {
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Term::Literal(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Entity(id) => write!(f, "<{id}>"),
            Term::Relation(id) => write!(f, "<rel:{id}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal(v) => write!(f, "{v}"),
        }
    }
}

/// One recorded statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Fact {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_display() {
        let fact = Fact::new(
            Term::Entity("AVAL".into()),
            "receptor",
            Term::Literal(Value::from("GLR-1")),
        );
        assert_eq!(fact.to_string(), "<AVAL> receptor \"GLR-1\" .");
    }
}
