//! 3D gem rendering on wgpu.
//!
//! Flat-shaded faceted look: vertices are duplicated per triangle with the
//! face normal (derived from winding, never stored in the mesh), and each
//! vertex carries the facet slot it belongs to so the shader can apply
//! per-facet color and emphasis from a small uniform table.
//!
//! # Modules
//! - `camera`: translates winit input into widget events, holds projection
//! - `mesh_data`: GPU buffer upload
//! - `picking`: cursor-ray facet picking
//! - `renderer`: surface, pipeline and per-frame draw

pub mod camera;
pub mod mesh_data;
pub mod picking;
pub mod renderer;

pub use camera::OrbitCamera;
pub use mesh_data::MeshData;
pub use renderer::{RenderError, Renderer};

use lapidary_geometry::GemMesh;

/// Upper bound on facet slots in the uniform table. The last used slot
/// (`segments`) is the neutral body slot for non-interactive faces.
pub const MAX_FACET_SLOTS: usize = 16;

/// GPU vertex: position, flat face normal, facet slot.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GemVertex {
    /// Model-space position
    pub position: [f32; 3],
    /// Face normal (flat shading)
    pub normal: [f32; 3],
    /// Facet slot: `0..segments` for interactive facets, `segments` for
    /// the neutral body
    pub facet: u32,
}

impl GemVertex {
    /// Expand a gem mesh into flat-shaded triangle vertices.
    ///
    /// The mesh must have fewer than [`MAX_FACET_SLOTS`] segments so every
    /// facet (plus the body slot) fits the uniform table.
    pub fn from_mesh(mesh: &GemMesh) -> Vec<GemVertex> {
        let body_slot = mesh.segments() as u32;
        debug_assert!(
            mesh.segments() < MAX_FACET_SLOTS,
            "{} segments exceed the {} facet slots",
            mesh.segments(),
            MAX_FACET_SLOTS
        );

        let mut out = Vec::with_capacity(mesh.triangle_count() * 3);
        for face in 0..mesh.triangle_count() {
            let normal = mesh.face_normal(face).to_array();
            let facet = mesh
                .facet_of_face(face)
                .map(|i| i as u32)
                .unwrap_or(body_slot);
            for &index in &mesh.faces()[face] {
                out.push(GemVertex {
                    position: mesh.vertices()[index as usize].to_array(),
                    normal,
                    facet,
                });
            }
        }
        out
    }
}
