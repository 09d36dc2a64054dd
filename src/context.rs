//! Context — the scoping token threaded through every query and insertion.
//!
//! A context narrows store operations to a named subset of facts, typically
//! one dataset or provenance scope. There is no module-wide default: the
//! "no scope" sentinel is an explicit value, `Context::background()`, passed
//! wherever a caller has not chosen a narrower scope.

use serde::{Deserialize, Serialize};

/// Opaque scoping identifier.
///
/// Immutable once attached to an entity or property; re-scoping always
/// produces a fresh view rather than mutating the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context(Option<String>);

impl Context {
    /// The well-known "no scope" sentinel. Queries made under it see every
    /// fact regardless of the context it was recorded under.
    pub fn background() -> Self {
        Self(None)
    }

    /// A named scope. Queries see only facts recorded under the same name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn is_background(&self) -> bool {
        self.0.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether a fact recorded under `recorded` is visible to queries made
    /// under this context.
    pub fn admits(&self, recorded: &Context) -> bool {
        self.is_background() || self == recorded
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "(background)"),
        }
    }
}
