//! The widget runtime: one owner for all interaction state.
//!
//! Renderers feed [`WidgetEvent`]s in and read a [`FrameStyle`] out once
//! per frame; the widget never reaches back into a view. All mutation
//! happens on the host's event thread, so no locking and no sharing.

use glam::Vec3;
use thiserror::Error;

use lapidary_geometry::{GemMesh, GemParams, GeometryError};
use lapidary_interact::{
    facet_emphasis, marker_scale, GlowAnimator, GlowStyle, Highlight, Selection, WidgetEvent,
};
use lapidary_topology::{FacetRing, TopologyError};

use crate::orbit::OrbitController;
use crate::pathway::Pathway;

/// Idle turn rate of the gem body, rad/s.
const IDLE_YAW_RATE: f32 = 0.15;

/// Idle tilt: slow sine sway of the gem body.
const IDLE_TILT_FREQUENCY: f32 = 0.1;
const IDLE_TILT_AMPLITUDE: f32 = 0.1;

/// Marker float: small vertical bob, phase-shifted per facet.
const FLOAT_FREQUENCY: f32 = 0.8;
const FLOAT_AMPLITUDE: f32 = 0.05;

/// Sparkle spin rate of the markers, rad/s.
const SPIN_RATE: f32 = 2.0;

/// Errors from assembling a widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Gem parameters failed the geometry contract.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Segment count cannot form a facet ring.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// One pathway per facet, exactly.
    #[error("expected {expected} pathways for {expected} facets, got {got}")]
    PathwayCountMismatch { expected: usize, got: usize },
}

/// What the host environment can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A GPU surface can be created.
    pub gpu: bool,
    /// Pointer (hover + drag) input exists.
    pub pointer: bool,
}

/// Which renderer the widget should run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Full 3D mesh rendering with the orbit camera.
    ThreeD,
    /// Flat vector shapes; same highlight and glow contract, no rotation.
    Flat,
}

impl RendererKind {
    /// Degrade to the flat renderer when 3D or pointer capability is
    /// missing, never fail outright.
    pub fn pick(capabilities: Capabilities) -> Self {
        if capabilities.gpu && capabilities.pointer {
            RendererKind::ThreeD
        } else {
            RendererKind::Flat
        }
    }
}

/// Per-facet style for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetStyle {
    /// Emissive emphasis, hover and selection composed by max.
    pub emphasis: f32,
    /// Marker scale, same composition.
    pub scale: f32,
    /// Vertical bob offset of the marker.
    pub lift: f32,
    /// Sparkle rotation of the marker, radians.
    pub spin: f32,
    /// Render color of the facet's pathway.
    pub color: [f32; 3],
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    /// Derived glow parameters.
    pub glow: GlowStyle,
    /// Camera position from the orbit controller.
    pub eye: Vec3,
    /// Camera up vector, rolled with the same rotation as the eye.
    pub up: Vec3,
    /// Idle rotation of the gem body itself (independent of the camera,
    /// so drags never fight it).
    pub idle_yaw: f32,
    pub idle_tilt: f32,
    /// One entry per facet, ring order.
    pub facets: Vec<FacetStyle>,
}

/// The interactive gem widget.
#[derive(Debug)]
pub struct Widget {
    pathways: Vec<Pathway>,
    params: GemParams,
    mesh: GemMesh,
    highlight: Highlight,
    selection: Selection,
    glow: GlowAnimator,
    orbit: OrbitController,
}

impl Widget {
    /// Assemble a widget: build the mesh, wire the ring, bind pathways.
    pub fn new(pathways: Vec<Pathway>, params: GemParams) -> Result<Self, WidgetError> {
        let mesh = GemMesh::build(params)?;
        let ring = FacetRing::new(params.segments)?;
        if pathways.len() != params.segments {
            return Err(WidgetError::PathwayCountMismatch {
                expected: params.segments,
                got: pathways.len(),
            });
        }

        tracing::debug!(
            segments = params.segments,
            triangles = mesh.triangle_count(),
            "widget assembled"
        );

        Ok(Self {
            pathways,
            params,
            mesh,
            highlight: Highlight::new(ring),
            selection: Selection::default(),
            glow: GlowAnimator::default(),
            orbit: OrbitController::new(),
        })
    }

    /// Route one interaction event to the owning state machine.
    pub fn handle(&mut self, event: &WidgetEvent) {
        if let Some(facet) = event.facet() {
            if facet >= self.params.segments {
                tracing::warn!(facet, "event for nonexistent facet dropped");
                return;
            }
        }

        match *event {
            WidgetEvent::FacetEntered { facet } => self.highlight.hover(facet, true),
            WidgetEvent::FacetLeft { facet } => self.highlight.hover(facet, false),
            WidgetEvent::FacetClicked { facet } => {
                tracing::debug!(facet, "facet selected");
                self.selection.select(facet);
            }
            WidgetEvent::OverlayDismissed => self.selection.dismiss(),
            WidgetEvent::DragStarted { x, y } => self.orbit.begin_drag(x, y),
            WidgetEvent::DragMoved { x, y } => self.orbit.drag_to(x, y),
            WidgetEvent::DragEnded => self.orbit.end_drag(),
            WidgetEvent::Scrolled { delta } => self.orbit.zoom(delta),
            WidgetEvent::ArrowPressed { direction } => self.orbit.arrow(direction),
        }
    }

    /// Derive the full style record for one frame at `t_secs` since mount.
    pub fn frame(&self, t_secs: f32) -> FrameStyle {
        let facets = (0..self.params.segments)
            .map(|i| {
                let hovered = self.highlight.is_active(i);
                let selected = self.selection.selected() == Some(i);
                FacetStyle {
                    emphasis: facet_emphasis(hovered, selected),
                    scale: marker_scale(hovered, selected),
                    lift: (t_secs * FLOAT_FREQUENCY + i as f32).sin() * FLOAT_AMPLITUDE,
                    spin: t_secs * SPIN_RATE + i as f32,
                    color: self.pathways[i].color.rgb(),
                }
            })
            .collect();

        FrameStyle {
            glow: self.glow.style(self.highlight.active_count(), t_secs),
            eye: self.orbit.eye(),
            up: self.orbit.up(),
            idle_yaw: t_secs * IDLE_YAW_RATE,
            idle_tilt: (t_secs * IDLE_TILT_FREQUENCY).sin() * IDLE_TILT_AMPLITUDE,
            facets,
        }
    }

    /// The pathway behind the open overlay, if any.
    pub fn selected_pathway(&self) -> Option<&Pathway> {
        self.selection
            .selected()
            .and_then(|i| self.pathways.get(i))
    }

    /// Reset interaction state to the mount pose (highlight, selection,
    /// camera); the mesh and pathways are immutable and stay.
    pub fn reset(&mut self) {
        self.highlight.clear();
        self.selection.dismiss();
        self.orbit.reset();
    }

    pub fn pathways(&self) -> &[Pathway] {
        &self.pathways
    }

    pub fn params(&self) -> GemParams {
        self.params
    }

    pub fn mesh(&self) -> &GemMesh {
        &self.mesh
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }
}
