//! Core data structures for vertex-labeled hypergraphs.
//!
//! Implements the hypergraph model used by the decomposition engine: edges
//! are ordered vertex sets with stable identities, and a hypergraph is a
//! pair of an edge sequence and a list of *special* (virtual) edge sets
//! injected during recursion to force coverage of interface vertices.
//!
//! # Invariants
//! - `Edge` vertex lists are sorted and deduplicated on construction.
//! - All vertex-set algebra (`inter`, `is_subset`, …) assumes sorted input
//!   and produces sorted output.
//! - Hypergraphs are immutable once constructed; derived vertex unions are
//!   cached lazily.
//!
//! # Citations
//! - Hypergraph theory: Berge, "Graphs and Hypergraphs" (1973)
//! - Decomposition-oriented components: Gottlob, Leone & Scarcello,
//!   "Hypertree decompositions and tractable queries" (2002)
//! - Union-find: Tarjan, "Efficiency of a good but not linear set union
//!   algorithm" (1975)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Unique identifier for a vertex.
///
/// Uses a transparent `u32` wrapper for efficient comparison and hashing.
/// Vertex names (as read from HyperBench or PACE inputs) are resolved to
/// identities by the parsing layer, which is external to this crate.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vertex(u32);

impl Vertex {
    /// Creates a new `Vertex` from a raw `u32`.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` representation.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Edge identity reserved for virtual edges synthesized during recursion.
///
/// Virtual edges contribute vertices but never belong to the cover pool,
/// so they do not need a pool identity.
pub const VIRTUAL_EDGE_ID: u32 = 0;

/// A hyperedge: an ordered set of vertices with a stable identity.
///
/// # Invariants
/// - `vertices` is sorted and free of duplicates.
/// - Identities of non-virtual edges are unique within one input graph;
///   the uniqueness invariant is maintained by the graph builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    id: u32,
    vertices: Vec<Vertex>,
}

impl Edge {
    /// Creates a new edge with the given identity and vertices.
    ///
    /// The vertex list is sorted and deduplicated.
    pub fn new(id: u32, vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut vertices: Vec<Vertex> = vertices.into_iter().collect();
        vertices.sort();
        vertices.dedup();
        Self { id, vertices }
    }

    /// Creates a virtual edge over the given vertices.
    ///
    /// Virtual edges carry [`VIRTUAL_EDGE_ID`] and exist only to force
    /// coverage of an interface vertex set inside a recursive call.
    pub fn virtual_edge(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        Self::new(VIRTUAL_EDGE_ID, vertices)
    }

    /// Returns the stable identity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Returns `true` if this edge was synthesized during recursion.
    #[inline]
    pub const fn is_virtual(&self) -> bool {
        self.id == VIRTUAL_EDGE_ID
    }

    /// Returns the sorted vertex list.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the edge has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Checks vertex membership by binary search.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}(", self.id)?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v.as_u32())?;
        }
        write!(f, ")")
    }
}

/// Intersection of two sorted vertex slices.
pub fn inter(a: &[Vertex], b: &[Vertex]) -> Vec<Vertex> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Union of two sorted vertex slices.
pub fn union_vertices(a: &[Vertex], b: &[Vertex]) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Difference `a ∖ b` of two sorted vertex slices.
pub fn diff_vertices(a: &[Vertex], b: &[Vertex]) -> Vec<Vertex> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() {
        if j >= b.len() || a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else if a[i] == b[j] {
            i += 1;
            j += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Subset test over sorted vertex slices.
pub fn is_subset(sub: &[Vertex], sup: &[Vertex]) -> bool {
    let mut j = 0;
    for &v in sub {
        while j < sup.len() && sup[j] < v {
            j += 1;
        }
        if j >= sup.len() || sup[j] != v {
            return false;
        }
        j += 1;
    }
    true
}

/// An ordered sequence of edges.
///
/// Supports the set operations the decomposition search needs: slicing,
/// index-vector resolution, set difference, and a lazily cached union of
/// all member vertices.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Edges {
    items: Vec<Edge>,
    #[serde(skip)]
    vertex_union: OnceLock<Vec<Vertex>>,
}

impl PartialEq for Edges {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Edges {}

impl Edges {
    /// Creates an edge sequence from a vector of edges.
    #[inline]
    pub fn new(items: Vec<Edge>) -> Self {
        Self {
            items,
            vertex_union: OnceLock::new(),
        }
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the edge at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.items.get(index)
    }

    /// Returns an iterator over the edges.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.items.iter()
    }

    /// Returns the underlying slice.
    #[inline]
    pub fn slice(&self) -> &[Edge] {
        &self.items
    }

    /// Resolves an index vector to a concrete edge sequence.
    ///
    /// # Panics
    /// Panics if any index is out of bounds; index vectors are produced by
    /// the cover enumerator against this same sequence.
    pub fn subset(&self, indices: &[usize]) -> Edges {
        Edges::new(indices.iter().map(|&i| self.items[i].clone()).collect())
    }

    /// Set difference by full edge equality.
    pub fn diff(&self, other: &Edges) -> Edges {
        Edges::new(
            self.items
                .iter()
                .filter(|e| !other.items.contains(e))
                .cloned()
                .collect(),
        )
    }

    /// Membership test by full edge equality.
    #[inline]
    pub fn contains(&self, edge: &Edge) -> bool {
        self.items.contains(edge)
    }

    /// Returns the sorted union of all member vertices.
    ///
    /// The union is computed on first use and cached; the sequence is
    /// immutable so the cache never goes stale.
    pub fn vertices(&self) -> &[Vertex] {
        self.vertex_union.get_or_init(|| {
            let mut out: Vec<Vertex> = self
                .items
                .iter()
                .flat_map(|e| e.vertices().iter().copied())
                .collect();
            out.sort();
            out.dedup();
            out
        })
    }

    /// Checks whether any member edge contains `v`.
    #[inline]
    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.vertices().binary_search(&v).is_ok()
    }
}

impl From<Vec<Edge>> for Edges {
    fn from(items: Vec<Edge>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Edge> for Edges {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, e) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "}}")
    }
}

/// Returns the edges whose vertex set intersects `allowed`.
///
/// `allowed` must be sorted. Used to restrict a cover pool to the part
/// relevant for a subgraph or for a connector set.
pub fn filter_vertices(edges: &Edges, allowed: &[Vertex]) -> Edges {
    Edges::new(
        edges
            .iter()
            .filter(|e| e.vertices().iter().any(|v| allowed.binary_search(v).is_ok()))
            .cloned()
            .collect(),
    )
}

/// A hypergraph: an edge sequence plus special (virtual) edge sets.
///
/// Special edge sets contribute vertices to the graph but are not part of
/// the cover pool; the decomposition recursion injects them to force a
/// node to cover the interface to an already-allocated subtree.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Hypergraph {
    edges: Edges,
    special: Vec<Edges>,
    #[serde(skip)]
    vertex_union: OnceLock<Vec<Vertex>>,
}

impl PartialEq for Hypergraph {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges && self.special == other.special
    }
}

impl Eq for Hypergraph {}

impl Hypergraph {
    /// Creates a hypergraph over the given edges, with no specials.
    #[inline]
    pub fn new(edges: Edges) -> Self {
        Self::with_special(edges, Vec::new())
    }

    /// Creates a hypergraph over the given edges and special edge sets.
    #[inline]
    pub fn with_special(edges: Edges, special: Vec<Edges>) -> Self {
        Self {
            edges,
            special,
            vertex_union: OnceLock::new(),
        }
    }

    /// Returns the edge sequence.
    #[inline]
    pub fn edges(&self) -> &Edges {
        &self.edges
    }

    /// Returns the special edge sets.
    #[inline]
    pub fn special(&self) -> &[Edges] {
        &self.special
    }

    /// Returns the number of edges (specials excluded).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the sorted union of all vertices of edges and specials.
    pub fn vertices(&self) -> &[Vertex] {
        self.vertex_union.get_or_init(|| {
            let mut out: Vec<Vertex> = self.edges.vertices().to_vec();
            for sp in &self.special {
                out = union_vertices(&out, sp.vertices());
            }
            out
        })
    }

    /// Returns the number of distinct vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Returns the subproblem size: edges plus special edge sets.
    ///
    /// This is the measure balancing is judged by; a balanced separator
    /// must leave no component holding more than `⌊size·(β−1)/β⌋` of it.
    #[inline]
    pub fn size(&self) -> usize {
        self.edges.len() + self.special.len()
    }

    /// Splits the graph into connected components with respect to a
    /// separator.
    ///
    /// Connectivity is computed over the vertices *not* covered by `sep`:
    /// two edges belong to the same component iff they are linked by a
    /// chain of shared uncovered vertices. Each component keeps its whole
    /// edges (covered vertices included) and the special edge sets whose
    /// uncovered vertices fall into it.
    ///
    /// Returns `(components, assignment, isolated)` where `assignment`
    /// maps every uncovered vertex to its component index and `isolated`
    /// collects the edges wholly contained in the separator's vertices.
    /// A special edge set wholly contained in the separator becomes a
    /// component of its own (no edges, one special), so that the subtree
    /// it stands for still receives a leaf downstream.
    ///
    /// Output order is deterministic given the input order.
    pub fn components(&self, sep: &Edges) -> (Vec<Hypergraph>, HashMap<Vertex, usize>, Edges) {
        let sep_vertices = sep.vertices();

        // Index the uncovered vertices.
        let mut index: HashMap<Vertex, usize> = HashMap::new();
        let mut indexed: Vec<Vertex> = Vec::new();
        let mut vertex_id = |v: Vertex, indexed: &mut Vec<Vertex>| -> usize {
            *index.entry(v).or_insert_with(|| {
                indexed.push(v);
                indexed.len() - 1
            })
        };

        let uncovered =
            |e: &Edge| -> Vec<Vertex> { diff_vertices(e.vertices(), sep_vertices) };

        // First pass: union the uncovered vertices of every edge and
        // special; collect covered-only members.
        let mut dsu = DisjointSet::default();
        let mut isolated: Vec<Edge> = Vec::new();
        let mut edge_anchor: Vec<Option<usize>> = Vec::with_capacity(self.edges.len());
        for edge in self.edges.iter() {
            let outside = uncovered(edge);
            if outside.is_empty() {
                isolated.push(edge.clone());
                edge_anchor.push(None);
                continue;
            }
            let first = vertex_id(outside[0], &mut indexed);
            dsu.ensure(indexed.len());
            for &v in &outside[1..] {
                let id = vertex_id(v, &mut indexed);
                dsu.ensure(indexed.len());
                dsu.union(first, id);
            }
            edge_anchor.push(Some(first));
        }
        let mut special_anchor: Vec<Option<usize>> = Vec::with_capacity(self.special.len());
        for sp in &self.special {
            let outside = diff_vertices(sp.vertices(), sep_vertices);
            if outside.is_empty() {
                special_anchor.push(None);
                continue;
            }
            let first = vertex_id(outside[0], &mut indexed);
            dsu.ensure(indexed.len());
            for &v in &outside[1..] {
                let id = vertex_id(v, &mut indexed);
                dsu.ensure(indexed.len());
                dsu.union(first, id);
            }
            special_anchor.push(Some(first));
        }

        // Second pass: group by representative, components numbered in
        // first-encounter order.
        let mut comp_of_root: HashMap<usize, usize> = HashMap::new();
        let mut comp_edges: Vec<Vec<Edge>> = Vec::new();
        let mut comp_special: Vec<Vec<Edges>> = Vec::new();
        let mut comp_index = |root: usize,
                              comp_edges: &mut Vec<Vec<Edge>>,
                              comp_special: &mut Vec<Vec<Edges>>|
         -> usize {
            *comp_of_root.entry(root).or_insert_with(|| {
                comp_edges.push(Vec::new());
                comp_special.push(Vec::new());
                comp_edges.len() - 1
            })
        };
        for (edge, anchor) in self.edges.iter().zip(&edge_anchor) {
            if let Some(a) = anchor {
                let idx = comp_index(dsu.find(*a), &mut comp_edges, &mut comp_special);
                comp_edges[idx].push(edge.clone());
            }
        }
        for (sp, anchor) in self.special.iter().zip(&special_anchor) {
            match anchor {
                Some(a) => {
                    let idx = comp_index(dsu.find(*a), &mut comp_edges, &mut comp_special);
                    comp_special[idx].push(sp.clone());
                }
                // Fully covered specials become their own components.
                None => {
                    comp_edges.push(Vec::new());
                    comp_special.push(vec![sp.clone()]);
                }
            }
        }

        let mut assignment: HashMap<Vertex, usize> = HashMap::with_capacity(indexed.len());
        for (id, &v) in indexed.iter().enumerate() {
            if let Some(&idx) = comp_of_root.get(&dsu.find(id)) {
                assignment.insert(v, idx);
            }
        }

        let components = comp_edges
            .into_iter()
            .zip(comp_special)
            .map(|(edges, special)| Hypergraph::with_special(Edges::new(edges), special))
            .collect();

        (components, assignment, Edges::new(isolated))
    }
}

/// Union-find over a growing universe of vertex indices.
#[derive(Debug, Default)]
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Grows the universe to at least `n` singleton sets.
    fn ensure(&mut self, n: usize) {
        while self.parent.len() < n {
            self.parent.push(self.parent.len());
        }
    }

    fn find(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}
