//! Lapidary Gem Widget
//!
//! The runtime behind the interactive faceted-gem visual: six content
//! pathways bound to six crown facets, hover-driven highlight trails, a
//! frame-clocked glow, unbounded quaternion orbit rotation and a detail
//! overlay, composed behind a `handle(event)` / `frame(t)` API with no
//! rendering dependency.
//!
//! # Architecture
//!
//! - **Pathways**: immutable content records, one per facet
//! - **Widget**: owns highlight, selection, glow and orbit state; routes
//!   [`WidgetEvent`]s and derives a [`FrameStyle`] per frame
//! - **FrameLoop**: cancellable handle driving `frame()` once per refresh
//! - Renderers (`lapidary-wgpu`, `lapidary-vector`) sit on top and stay
//!   stateless
//!
//! # Usage
//!
//! ```
//! use lapidary_geometry::GemParams;
//! use lapidary_interact::WidgetEvent;
//! use lapidary_widget::{demo_pathways, Widget};
//!
//! let mut widget = Widget::new(demo_pathways(), GemParams::default()).unwrap();
//! widget.handle(&WidgetEvent::FacetEntered { facet: 2 });
//! let style = widget.frame(0.016);
//! assert!(style.glow.intensity > 0.0);
//! ```

mod frame_loop;
mod orbit;
mod pathway;
mod widget;

pub use frame_loop::FrameLoop;
pub use orbit::{OrbitController, DRAG_SENSITIVITY, KEY_STEP, MAX_DISTANCE, MIN_DISTANCE};
pub use pathway::{demo_pathways, ColorKey, Pathway};
pub use widget::{Capabilities, FacetStyle, FrameStyle, RendererKind, Widget, WidgetError};
