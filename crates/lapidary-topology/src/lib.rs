//! Facet Ring Topology
//!
//! The interactive facets of the gem are arranged in a single closed ring:
//! facet `i` touches exactly two others, `(i - 1 + n) % n` and `(i + 1) % n`.
//! This is the only topology the highlight logic ever consults; the rest of
//! the mesh (table, pavilion, culet) is decorative and carries no adjacency.
//!
//! # Invariants
//!
//! - Total: `prev` and `next` are defined for every `i in [0, n)`, any `n >= 3`.
//! - Symmetric: `i` is a neighbor of both of its neighbors.
//! - Cyclic: following `next` visits every facet exactly once before
//!   returning to the start.

mod ring;

pub use ring::{count_active_neighbors, FacetRing, TopologyError};

/// Facet count of the canonical hexagonal gem.
pub const RING_FACETS: usize = 6;

/// Smallest ring that still closes.
pub const MIN_FACETS: usize = 3;

// Compile-time assertion: the canonical ring is a valid ring
const _: () = assert!(RING_FACETS >= MIN_FACETS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ring_is_valid() {
        let ring = FacetRing::new(RING_FACETS).unwrap();
        assert_eq!(ring.facet_count(), 6);
    }
}
