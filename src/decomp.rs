//! Decomposition trees and their validity checks.
//!
//! A decomposition is a tree of nodes, each labeled with a *bag* of
//! vertices and a *cover* of edges whose vertex union contains the bag.
//! The checks here are the defining GHD conditions; the engine's tests
//! assert them instead of tree shapes, because the racing search makes
//! shapes non-deterministic.
//!
//! # Invariants
//! - `bag` is sorted and a subset of the cover's vertex union.
//! - Nodes are immutable once their frame returns; children are appended
//!   during post-processing only.
//!
//! # Citations
//! - Gottlob, Leone & Scarcello, "Hypertree decompositions and tractable
//!   queries" (2002)

use crate::hypergraph::{is_subset, Edges, Hypergraph, Vertex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of a decomposition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Sorted bag of vertices this node is responsible for.
    pub bag: Vec<Vertex>,
    /// Edges whose vertex union contains the bag.
    pub cover: Edges,
    /// Sub-decompositions.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a node with children.
    #[inline]
    pub fn new(bag: Vec<Vertex>, cover: Edges, children: Vec<Node>) -> Self {
        Self {
            bag,
            cover,
            children,
        }
    }

    /// Creates a childless node.
    #[inline]
    pub fn leaf(bag: Vec<Vertex>, cover: Edges) -> Self {
        Self::new(bag, cover, Vec::new())
    }

    /// Returns every node of this subtree in depth-first order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter());
        }
        out
    }

    /// Largest cover size in this subtree.
    pub fn width(&self) -> usize {
        self.nodes().iter().map(|n| n.cover.len()).max().unwrap_or(0)
    }

    /// Replaces the unique leaf whose cover spans exactly `connecting`
    /// with `replacement`.
    ///
    /// Returns the replacement back to the caller if no such leaf exists
    /// in this subtree.
    pub(crate) fn replace_leaf(
        &mut self,
        connecting: &[Vertex],
        replacement: Node,
    ) -> Option<Node> {
        if self.children.is_empty() && self.cover.vertices() == connecting {
            *self = replacement;
            return None;
        }
        let mut pending = replacement;
        for child in &mut self.children {
            match child.replace_leaf(connecting, pending) {
                None => return None,
                Some(back) => pending = back,
            }
        }
        Some(pending)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[bag:")?;
        for (i, v) in self.bag.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v.as_u32())?;
        }
        write!(f, " cover:{}", self.cover)?;
        if !self.children.is_empty() {
            write!(f, " children:")?;
            for child in &self.children {
                write!(f, "{}", child)?;
            }
        }
        write!(f, "]")
    }
}

/// A complete decomposition: the graph it was computed for plus the root
/// of the tree. Search failure is represented as `None` at the API
/// boundary, not as a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomp {
    /// The decomposed hypergraph.
    pub graph: Hypergraph,
    /// Root of the decomposition tree.
    pub root: Node,
}

impl Decomp {
    /// Creates a decomposition.
    #[inline]
    pub fn new(graph: Hypergraph, root: Node) -> Self {
        Self { graph, root }
    }

    /// Largest cover size of any node.
    #[inline]
    pub fn width(&self) -> usize {
        self.root.width()
    }

    /// Checks that every bag is contained in its cover's vertex union.
    pub fn bags_covered(&self) -> bool {
        self.root
            .nodes()
            .iter()
            .all(|n| is_subset(&n.bag, n.cover.vertices()))
    }

    /// Checks that every edge of `graph` fits inside some bag.
    pub fn covers_graph(&self, graph: &Hypergraph) -> bool {
        let nodes = self.root.nodes();
        graph
            .edges()
            .iter()
            .all(|e| nodes.iter().any(|n| is_subset(e.vertices(), &n.bag)))
    }

    /// Checks the connectedness condition: for every vertex, the nodes
    /// whose bags contain it form one connected subtree.
    pub fn connected(&self, graph: &Hypergraph) -> bool {
        graph
            .vertices()
            .iter()
            .all(|&v| subtree_count(&self.root, v, false) <= 1)
    }

    /// Full validity check against `graph` at target width `k`.
    pub fn verify(&self, graph: &Hypergraph, k: usize) -> bool {
        self.width() <= k
            && self.bags_covered()
            && self.covers_graph(graph)
            && self.connected(graph)
    }
}

/// Number of maximal connected node groups containing `v` below (and
/// including) `node`.
fn subtree_count(node: &Node, v: Vertex, parent_has: bool) -> usize {
    let has = node.bag.binary_search(&v).is_ok();
    let mut count = usize::from(has && !parent_has);
    for child in &node.children {
        count += subtree_count(child, v, has);
    }
    count
}
