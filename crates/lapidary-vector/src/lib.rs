//! Flat Vector Fallback
//!
//! Renders the gem as flat 2D shapes (a top-down projection of the crown)
//! for hosts without 3D capability. The same adjacency, highlight and glow
//! contracts drive it; only the output medium changes: glow becomes a
//! drop-shadow blur instead of material brightness, and there is no
//! rotation controller at all.
//!
//! Output is a standalone SVG document, rebuilt from scratch every frame:
//! a pure function of widget state, never a mutation of a live view.

mod layout;
mod svg;

pub use layout::FlatGem;
pub use svg::{render_svg, render_widget};
