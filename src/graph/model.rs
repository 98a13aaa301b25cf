// src/graph/model.rs
//! Owned adjacency structure for the registry graph.
//!
//! Nodes are numbered in first-seen order; that numbering is the stable
//! enumeration every metric and ranking iterates in. Each adjacency entry
//! carries the edge's `prod`/`dev` flags, so a production and a development
//! dependency between the same pair share one edge.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::kinds::NodeKey;

pub type NodeId = usize;

/// Dependency flags of an edge. Both may be set at once; neither set means a
/// plain relation edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeFlags {
    pub prod: bool,
    pub dev: bool,
}

impl EdgeFlags {
    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.prod && !self.dev
    }
}

/// In-memory graph of registry entities.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    directed: bool,
    keys: Vec<NodeKey>,
    index: HashMap<NodeKey, NodeId>,
    successors: Vec<BTreeMap<NodeId, EdgeFlags>>,
    predecessors: Vec<BTreeSet<NodeId>>,
    edge_count: usize,
}

impl PackageGraph {
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            keys: Vec::new(),
            index: HashMap::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            edge_count: 0,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the id of `key`, creating the node if needed.
    pub fn ensure_node(&mut self, key: NodeKey) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.keys.len();
        self.index.insert(key.clone(), id);
        self.keys.push(key);
        self.successors.push(BTreeMap::new());
        self.predecessors.push(BTreeSet::new());
        id
    }

    #[must_use]
    pub fn node_id(&self, key: &NodeKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Key of a node. Panics on ids not issued by this graph.
    #[must_use]
    pub fn key(&self, id: NodeId) -> &NodeKey {
        &self.keys[id]
    }

    /// Node keys in stable enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.keys.iter()
    }

    #[must_use]
    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<EdgeFlags> {
        self.successors.get(u)?.get(&v).copied()
    }

    /// Flags of the edge between two keys, if both nodes and the edge exist.
    #[must_use]
    pub fn edge_between(&self, u: &NodeKey, v: &NodeKey) -> Option<EdgeFlags> {
        self.edge(self.node_id(u)?, self.node_id(v)?)
    }

    /// Inserts or overwrites the edge `(u, v)`.
    pub fn set_edge(&mut self, u: NodeId, v: NodeId, flags: EdgeFlags) {
        if self.successors[u].insert(v, flags).is_none() {
            self.edge_count += 1;
        }
        if self.directed {
            self.predecessors[v].insert(u);
        } else if u != v {
            self.successors[v].insert(u, flags);
        }
    }

    /// Removes the edge `(u, v)`. Returns false if it did not exist.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        if self.successors[u].remove(&v).is_none() {
            return false;
        }
        self.edge_count -= 1;
        if self.directed {
            self.predecessors[v].remove(&u);
        } else {
            self.successors[v].remove(&u);
        }
        true
    }

    /// Outgoing neighbours (all neighbours when undirected) with edge flags.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, EdgeFlags)> + '_ {
        self.successors[id].iter().map(|(&v, &flags)| (v, flags))
    }

    /// Incoming neighbours (all neighbours when undirected).
    pub fn predecessors(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        if self.directed {
            Box::new(self.predecessors[id].iter().copied())
        } else {
            Box::new(self.successors[id].keys().copied())
        }
    }

    #[must_use]
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.successors[id].len()
    }

    #[must_use]
    pub fn in_degree(&self, id: NodeId) -> usize {
        if self.directed {
            self.predecessors[id].len()
        } else {
            self.successors[id].len()
        }
    }

    /// All edges keyed by node keys, each undirected edge listed once.
    #[must_use]
    pub fn edge_list(&self) -> BTreeMap<(NodeKey, NodeKey), EdgeFlags> {
        let mut edges = BTreeMap::new();
        for (u, targets) in self.successors.iter().enumerate() {
            for (&v, &flags) in targets {
                if !self.directed && v < u {
                    continue;
                }
                edges.insert((self.keys[u].clone(), self.keys[v].clone()), flags);
            }
        }
        edges
    }

    /// Copy of the graph restricted to `nodes`, keeping their relative order.
    #[must_use]
    pub fn subgraph(&self, nodes: &[NodeId]) -> Self {
        let mut sorted = nodes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut sub = Self::new(self.directed);
        for &id in &sorted {
            sub.ensure_node(self.keys[id].clone());
        }
        for &u in &sorted {
            let su = sub.index[&self.keys[u]];
            for (&v, &flags) in &self.successors[u] {
                if let Some(&sv) = sub.index.get(&self.keys[v]) {
                    sub.set_edge(su, sv, flags);
                }
            }
        }
        sub
    }
}
