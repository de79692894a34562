//! Acceptance predicates for candidate covers.
//!
//! The parallel search is generic over a [`CoverPredicate`]; the two
//! predicates here drive the two nested searches of the decomposer: the
//! balance test for child covers and the connection test for parent
//! covers. Both are pure functions of the subgraph, the candidate and
//! their parameters.
//!
//! Balance is judged by subproblem *size* (edges plus special edge
//! sets), the measure under which every decomposable subgraph is
//! guaranteed a balanced separator of cover width.
//!
//! # Citations
//! - Balanced separators for decompositions: Akatov & Gottlob, "Balanced
//!   queries: divide and conquer" (2010)
//! - Gottlob, Okulmus & Pichler, "Fast and parallel decomposition of
//!   constraint satisfaction problems" (2020)

use crate::hypergraph::{diff_vertices, inter, is_subset, Edges, Hypergraph, Vertex};

/// The balance threshold `⌊size·(β−1)/β⌋` for a subproblem of the given
/// size.
///
/// A component larger than this is *oversized*; a separator leaving no
/// oversized component is *balanced*.
#[inline]
pub fn balance_threshold(size: usize, balance_factor: usize) -> usize {
    (size * (balance_factor - 1)) / balance_factor
}

/// A pure acceptance test evaluated against candidate covers.
pub trait CoverPredicate: Sync {
    /// Returns `true` if `cover` is acceptable for `h`.
    fn accepts(&self, h: &Hypergraph, cover: &Edges) -> bool;
}

/// Accepts covers whose removal leaves no oversized component.
#[derive(Debug, Clone, Copy)]
pub struct BalancedCheck {
    balance_factor: usize,
}

impl BalancedCheck {
    /// Creates the check for a balance factor `β ≥ 2`.
    #[inline]
    pub fn new(balance_factor: usize) -> Self {
        debug_assert!(balance_factor >= 2);
        Self { balance_factor }
    }
}

impl CoverPredicate for BalancedCheck {
    fn accepts(&self, h: &Hypergraph, cover: &Edges) -> bool {
        let limit = balance_threshold(h.size(), self.balance_factor);
        let (components, _, _) = h.components(cover);
        components.iter().all(|c| c.size() <= limit)
    }
}

/// Accepts covers that can serve as the parent of a fixed child cover.
///
/// A parent must cover the connector, leave exactly one oversized ("low")
/// component, confine every child vertex it does not cover to that
/// component, and hand every connector vertex inside the low component
/// over to the child's interface: the subtree below the child is only
/// reachable through that interface, so a connector vertex bypassing it
/// would break connectedness. Under this reading the decomposer's later
/// low-component lookup cannot fail.
#[derive(Debug, Clone)]
pub struct ParentCheck {
    conn: Vec<Vertex>,
    child_vertices: Vec<Vertex>,
    balance_factor: usize,
}

impl ParentCheck {
    /// Creates the check for a connector, the child cover's vertices and
    /// a balance factor `β ≥ 2`. Both vertex lists must be sorted.
    #[inline]
    pub fn new(conn: Vec<Vertex>, child_vertices: Vec<Vertex>, balance_factor: usize) -> Self {
        debug_assert!(balance_factor >= 2);
        Self {
            conn,
            child_vertices,
            balance_factor,
        }
    }
}

impl CoverPredicate for ParentCheck {
    fn accepts(&self, h: &Hypergraph, cover: &Edges) -> bool {
        let cover_vertices = cover.vertices();
        if !is_subset(&self.conn, cover_vertices) {
            return false;
        }

        let limit = balance_threshold(h.size(), self.balance_factor);
        let (components, _, _) = h.components(cover);
        let mut low = None;
        for component in &components {
            if component.size() > limit {
                if low.is_some() {
                    return false;
                }
                low = Some(component);
            }
        }
        let Some(low) = low else {
            return false;
        };

        let uncovered_child = diff_vertices(&self.child_vertices, cover_vertices);
        if !is_subset(&uncovered_child, low.vertices()) {
            return false;
        }

        let conn_in_low = inter(&self.conn, low.vertices());
        let child_interface = inter(&self.child_vertices, low.vertices());
        is_subset(&conn_in_low, &child_interface)
    }
}
