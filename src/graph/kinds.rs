// src/graph/kinds.rs
//! Node kinds, node keys and the relation dispatch table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::RelationKind;

/// The kind of entity a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Package,
    Developer,
    Keyword,
    License,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Package => "package",
            Self::Developer => "developer",
            Self::Keyword => "keyword",
            Self::License => "license",
        };
        f.write_str(name)
    }
}

/// How an edge event touches the edge flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSemantics {
    /// Production dependency: drives the `prod` flag.
    Prod,
    /// Development dependency: drives the `dev` flag.
    Dev,
    /// Any other relation: an unflagged edge.
    Plain,
}

/// Resolves the object node kind and edge semantics of a relation.
#[must_use]
pub fn resolve(relation: RelationKind) -> (NodeKind, EdgeSemantics) {
    match relation {
        RelationKind::Dependency => (NodeKind::Package, EdgeSemantics::Prod),
        RelationKind::DevDependency => (NodeKind::Package, EdgeSemantics::Dev),
        RelationKind::Maintainer => (NodeKind::Developer, EdgeSemantics::Plain),
        RelationKind::Keyword => (NodeKind::Keyword, EdgeSemantics::Plain),
        RelationKind::License => (NodeKind::License, EdgeSemantics::Plain),
    }
}

/// Stable identity of a node: its kind plus its (sanitized) name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn package(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Package, name)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Package => f.write_str(&self.name),
            kind => write!(f, "{kind}:{}", self.name),
        }
    }
}
