//! Facet Interaction
//!
//! The state layer between raw pointer input and anything that draws:
//!
//! - **Events**: the serializable vocabulary renderers translate raw input
//!   into ([`WidgetEvent`]).
//! - **Highlight**: the set of lit facets, spread across ring neighbors on
//!   hover-enter and retained along pointer trails on hover-leave
//!   ([`Highlight`]).
//! - **Glow**: a pure per-frame derivation from active count and wall-clock
//!   time to a style record; the renderer applies it, nothing here mutates
//!   a view ([`GlowAnimator`]).
//! - **Selection**: which facet's detail overlay is open ([`Selection`]).
//!
//! Everything is synchronous and UI-framework-free, so the whole contract
//! is unit-testable without a rendering environment.

mod events;
mod glow;
mod highlight;
mod selection;

pub use events::{ArrowDirection, WidgetEvent};
pub use glow::{GlowAnimator, GlowStyle};
pub use highlight::Highlight;
pub use selection::{facet_emphasis, marker_scale, Selection, FOCUS_EMPHASIS, REST_EMPHASIS};

#[cfg(test)]
mod tests {
    use super::*;
    use lapidary_topology::FacetRing;

    #[test]
    fn hover_and_selection_compose() {
        // Hover emphasis and click selection are independent axes
        let mut highlight = Highlight::new(FacetRing::hexagonal());
        let mut selection = Selection::default();

        highlight.hover(2, true);
        selection.select(4);

        assert!(highlight.is_active(2));
        assert!(!highlight.is_active(4));
        assert_eq!(selection.selected(), Some(4));

        // Facet 4: selected but not hovered still gets full emphasis
        assert_eq!(
            facet_emphasis(highlight.is_active(4), selection.selected() == Some(4)),
            FOCUS_EMPHASIS
        );
    }

    #[test]
    fn glow_follows_highlight() {
        let mut highlight = Highlight::new(FacetRing::hexagonal());
        let animator = GlowAnimator::default();

        let resting = animator.style(highlight.active_count(), 0.0);
        assert_eq!(resting, GlowStyle::RESTING);

        highlight.hover(0, true);
        let lit = animator.style(highlight.active_count(), 0.0);
        assert!(lit.intensity > resting.intensity);
        assert!(lit.glow_radius > 0.0);
    }
}
