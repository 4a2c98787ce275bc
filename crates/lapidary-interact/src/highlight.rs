//! Highlight propagation across the facet ring.
//!
//! Hovering a facet lights it and both ring neighbors. Leaving removes the
//! facet, but a neighbor stays lit while it still has an active neighbor
//! other than the one just vacated, so sweeping the pointer across
//! adjacent facets produces a continuous trail instead of a flickering
//! single-facet toggle.

use std::collections::HashSet;

use lapidary_topology::{count_active_neighbors, FacetRing};

/// Owner of the active (lit) facet set.
///
/// All mutation goes through [`Highlight::hover`]; re-entering an active
/// facet and leaving an inactive one are both no-ops.
#[derive(Debug, Clone)]
pub struct Highlight {
    ring: FacetRing,
    active: HashSet<usize>,
}

impl Highlight {
    /// Create with an empty active set.
    pub fn new(ring: FacetRing) -> Self {
        Self {
            ring,
            active: HashSet::new(),
        }
    }

    /// The ring this highlighter propagates across.
    pub fn ring(&self) -> FacetRing {
        self.ring
    }

    /// Apply a hover transition for `facet`.
    pub fn hover(&mut self, facet: usize, entering: bool) {
        if entering {
            self.active.insert(facet);
            for j in self.ring.neighbors(facet) {
                self.active.insert(j);
            }
        } else {
            self.active.remove(&facet);
            for j in self.ring.neighbors(facet) {
                let retained =
                    count_active_neighbors(self.ring, j, |k| k != facet && self.active.contains(&k))
                        > 0;
                if !retained {
                    self.active.remove(&j);
                }
            }
        }
    }

    /// Whether `facet` is currently lit.
    pub fn is_active(&self, facet: usize) -> bool {
        self.active.contains(&facet)
    }

    /// Number of lit facets.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Lit facets in ascending index order.
    pub fn active_facets(&self) -> Vec<usize> {
        let mut facets: Vec<usize> = self.active.iter().copied().collect();
        facets.sort_unstable();
        facets
    }

    /// Drop every lit facet (widget unmount / hard reset).
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagonal() -> Highlight {
        Highlight::new(FacetRing::hexagonal())
    }

    #[test]
    fn enter_spreads_to_neighbors() {
        let mut h = hexagonal();
        h.hover(2, true);
        assert_eq!(h.active_facets(), vec![1, 2, 3]);
    }

    #[test]
    fn enter_is_idempotent() {
        let mut h = hexagonal();
        h.hover(2, true);
        let once = h.active_facets();
        h.hover(2, true);
        assert_eq!(h.active_facets(), once);
    }

    #[test]
    fn leaving_unentered_facet_is_noop() {
        let mut h = hexagonal();
        h.hover(5, false);
        assert_eq!(h.active_count(), 0);
    }

    #[test]
    fn lone_visit_clears_completely() {
        let mut h = hexagonal();
        h.hover(2, true);
        h.hover(2, false);
        // Neighbors 1 and 3 had no other active neighbor left
        assert_eq!(h.active_count(), 0);
    }

    #[test]
    fn trail_survives_handoff() {
        // Sweep 0 -> 1: entering 1 before leaving 0 must never drop the
        // trail to empty, and 0 stays lit as 1's neighbor.
        let mut h = hexagonal();
        h.hover(0, true);
        assert_eq!(h.active_facets(), vec![0, 1, 5]);

        h.hover(1, true);
        assert_eq!(h.active_facets(), vec![0, 1, 2, 5]);

        h.hover(0, false);
        assert_eq!(h.active_facets(), vec![1, 2]);
        assert!(h.active_count() > 0, "trail dropped mid-sweep");

        h.hover(1, false);
        assert_eq!(h.active_count(), 0);
    }

    #[test]
    fn long_sweep_never_empties() {
        let mut h = hexagonal();
        h.hover(0, true);
        for i in 1..6 {
            h.hover(i, true);
            assert!(h.active_count() > 0);
            h.hover(i - 1, false);
            assert!(h.active_count() > 0, "sweep emptied at facet {}", i);
        }
        h.hover(5, false);
        assert_eq!(h.active_count(), 0);
    }

    #[test]
    fn retention_rule_n3() {
        // On a triangle every facet neighbors every other, so after a lone
        // enter/leave the two spread facets retain each other. This pins the
        // rule's small-ring asymmetry; clear() is the escape hatch.
        let mut h = Highlight::new(FacetRing::new(3).unwrap());
        h.hover(0, true);
        assert_eq!(h.active_facets(), vec![0, 1, 2]);

        h.hover(0, false);
        assert_eq!(h.active_facets(), vec![1, 2]);

        h.clear();
        assert_eq!(h.active_count(), 0);
    }
}
