//! Widget event vocabulary.
//!
//! Renderers translate raw input (DOM events, winit window events, test
//! scripts) into these and feed them to the widget. The enum is the entire
//! interaction surface: hover, click, drag, scroll, arrows, overlay close.

use serde::{Deserialize, Serialize};

/// Discrete rotation directions from the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// An interaction delivered to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WidgetEvent {
    /// Pointer entered a facet or its label
    FacetEntered { facet: usize },

    /// Pointer left a facet or its label
    FacetLeft { facet: usize },

    /// Facet, vertex marker or label was clicked
    FacetClicked { facet: usize },

    /// The detail overlay was closed (close control or outside click)
    OverlayDismissed,

    /// Pointer pressed anywhere over the viewport
    DragStarted { x: f32, y: f32 },

    /// Pointer moved while pressed
    DragMoved { x: f32, y: f32 },

    /// Pointer released
    DragEnded,

    /// Wheel scroll, positive away from the user
    Scrolled { delta: f32 },

    /// Arrow key pressed
    ArrowPressed { direction: ArrowDirection },
}

impl WidgetEvent {
    /// The facet this event targets, if it targets one.
    pub fn facet(&self) -> Option<usize> {
        match self {
            WidgetEvent::FacetEntered { facet }
            | WidgetEvent::FacetLeft { facet }
            | WidgetEvent::FacetClicked { facet } => Some(*facet),
            _ => None,
        }
    }
}
