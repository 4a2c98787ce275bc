//! Click selection and detail-overlay state.

use serde::{Deserialize, Serialize};

/// Emissive emphasis at rest.
pub const REST_EMPHASIS: f32 = 0.2;

/// Emissive emphasis while hovered or selected.
pub const FOCUS_EMPHASIS: f32 = 0.5;

/// Marker scale at rest.
pub const REST_SCALE: f32 = 1.2;

/// Marker scale while hovered or selected.
pub const FOCUS_SCALE: f32 = 1.8;

/// Which facet's detail overlay is open.
///
/// The overlay is open exactly when a facet is selected; there is no
/// open-without-selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    /// Select `facet` and open its overlay. Re-selecting is a no-op.
    pub fn select(&mut self, facet: usize) {
        self.selected = Some(facet);
    }

    /// Close the overlay and clear the selection.
    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    /// The selected facet, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the detail overlay is open.
    pub fn overlay_open(&self) -> bool {
        self.selected.is_some()
    }
}

/// Emissive emphasis for a facet.
///
/// Hover and selection are independent sources; they compose by maximum so
/// both being active never exceeds (or fights) a single one.
pub fn facet_emphasis(hovered: bool, selected: bool) -> f32 {
    let hover = if hovered { FOCUS_EMPHASIS } else { REST_EMPHASIS };
    let select = if selected { FOCUS_EMPHASIS } else { REST_EMPHASIS };
    hover.max(select)
}

/// Marker scale for a facet, composed the same way as emphasis.
pub fn marker_scale(hovered: bool, selected: bool) -> f32 {
    let hover = if hovered { FOCUS_SCALE } else { REST_SCALE };
    let select = if selected { FOCUS_SCALE } else { REST_SCALE };
    hover.max(select)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_tracks_selection() {
        let mut sel = Selection::default();
        assert!(!sel.overlay_open());

        sel.select(4);
        assert_eq!(sel.selected(), Some(4));
        assert!(sel.overlay_open());

        sel.dismiss();
        assert_eq!(sel.selected(), None);
        assert!(!sel.overlay_open());
    }

    #[test]
    fn reselect_is_idempotent() {
        let mut sel = Selection::default();
        sel.select(2);
        let before = sel;
        sel.select(2);
        assert_eq!(sel, before);
    }

    #[test]
    fn emphasis_composes_by_max() {
        assert_eq!(facet_emphasis(false, false), REST_EMPHASIS);
        assert_eq!(facet_emphasis(true, false), FOCUS_EMPHASIS);
        assert_eq!(facet_emphasis(false, true), FOCUS_EMPHASIS);
        // Both active: max, not sum
        assert_eq!(facet_emphasis(true, true), FOCUS_EMPHASIS);
    }

    #[test]
    fn scale_composes_by_max() {
        assert_eq!(marker_scale(false, false), REST_SCALE);
        assert_eq!(marker_scale(true, true), FOCUS_SCALE);
    }
}
