//! GPU buffer management for the gem mesh.

use crate::GemVertex;
use lapidary_geometry::GemMesh;
use wgpu::util::DeviceExt;

/// Uploaded mesh data for rendering.
pub struct MeshData {
    /// Vertex buffer with flat-shaded, facet-tagged vertices
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices in the buffer
    pub vertex_count: u32,
}

impl MeshData {
    /// Expand the mesh and create its GPU buffer.
    pub fn upload(device: &wgpu::Device, mesh: &GemMesh) -> Self {
        let vertices = GemVertex::from_mesh(mesh);
        tracing::info!(
            triangles = mesh.triangle_count(),
            vertices = vertices.len(),
            "uploading gem mesh"
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gem Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Vertex buffer layout matching [`GemVertex`].
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GemVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Facet slot
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let layout = MeshData::vertex_buffer_layout();
        assert_eq!(
            layout.array_stride,
            std::mem::size_of::<GemVertex>() as u64
        );
        let last = layout.attributes.last().unwrap();
        assert_eq!(last.offset, 24);
    }
}
