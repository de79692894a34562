//! Canonical fingerprinting for covers and components.
//!
//! The negative cache keys on `(cover, component)` pairs; both sides are
//! reduced to deterministic canonical bytes and hashed with domain
//! separation and length prefixing, so a key never depends on the order
//! in which the enumerator happened to produce the edges.
//!
//! # Citations
//! - SHA-256: NIST FIPS 180-4 (2015)
//! - Domain separation & length prefixing: Bernstein et al., "How to hash
//!   into elliptic curves" (2009)
//! - Canonical labeling: McKay & Piperno, "Practical graph isomorphism" (2014)

use crate::hypergraph::{Edges, Hypergraph};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain for cover fingerprints (v1).
const DOMAIN_COVER: &[u8] = b"COVER";

/// Domain for component fingerprints (v1).
const DOMAIN_COMPONENT: &[u8] = b"COMPONENT";

/// A 256-bit hash value.
///
/// Wraps a byte array for type safety; equality and ordering are
/// byte-wise.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    /// Creates a zero hash (all zeros).
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns the raw byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of the given data with domain separation.
    ///
    /// The digest input is `b"HSP:<domain>:v1" || len(data) as u64 LE || data`.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"HSP:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Types with a deterministic canonical byte encoding.
///
/// Implementations must be independent of construction and enumeration
/// order: equal values (up to reordering of unordered parts) produce
/// identical bytes.
pub trait Canonical {
    /// Returns deterministic canonical bytes for this value.
    fn to_canonical_bytes(&self) -> Vec<u8>;
}

impl Canonical for Edges {
    /// Sorted `(id, vertices)` records, length-prefixed.
    ///
    /// Non-virtual edges have unique identities, so sorting by identity
    /// first gives a stable order; virtual edges (identity 0) fall back
    /// to their vertex lists.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut records: Vec<(u32, &[crate::hypergraph::Vertex])> = self
            .iter()
            .map(|e| (e.id(), e.vertices()))
            .collect();
        records.sort();

        let mut out = Vec::with_capacity(records.len() * 16 + 8);
        out.extend_from_slice(&(records.len() as u64).to_le_bytes());
        for (id, vertices) in records {
            out.extend_from_slice(&id.to_le_bytes());
            out.extend_from_slice(&(vertices.len() as u64).to_le_bytes());
            for v in vertices {
                out.extend_from_slice(&v.as_u32().to_le_bytes());
            }
        }
        out
    }
}

impl Canonical for Hypergraph {
    /// Canonical edges followed by the sorted canonical specials.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = self.edges().to_canonical_bytes();
        let mut specials: Vec<Vec<u8>> = self
            .special()
            .iter()
            .map(Canonical::to_canonical_bytes)
            .collect();
        specials.sort();
        out.extend_from_slice(&(specials.len() as u64).to_le_bytes());
        for sp in specials {
            out.extend_from_slice(&sp);
        }
        out
    }
}

/// Fingerprint of a cover, for use as a cache-key half.
pub fn cover_fingerprint(cover: &Edges) -> HashValue {
    HashValue::hash_with_domain(DOMAIN_COVER, &cover.to_canonical_bytes())
}

/// Fingerprint of a component, for use as a cache-key half.
pub fn component_fingerprint(component: &Hypergraph) -> HashValue {
    HashValue::hash_with_domain(DOMAIN_COMPONENT, &component.to_canonical_bytes())
}
