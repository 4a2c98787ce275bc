//! Mesh construction and queries.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;
use thiserror::Error;

/// Crown ring sits at 0.7x the girdle radius.
const CROWN_SCALE: f32 = 0.7;

/// Pavilion ring sits at 0.5x the girdle radius.
const PAVILION_SCALE: f32 = 0.5;

/// Pavilion ring height as a fraction of the full pavilion depth.
const PAVILION_RING_DROP: f32 = 0.6;

/// Label anchors sit just inside the girdle.
const ANCHOR_SCALE: f32 = 0.9;

/// Errors from invalid gem proportions.
///
/// These are programming-time contract violations, not runtime conditions:
/// parameters are fixed constants in every real embedding.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A gem outline needs at least three segments to close.
    #[error("gem needs at least 3 segments, got {0}")]
    TooFewSegments(usize),

    /// All dimensions must be strictly positive.
    #[error("gem {name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
}

/// Proportions of the gem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GemParams {
    /// Number of ring segments (and interactive facets).
    pub segments: usize,
    /// Girdle radius.
    pub radius: f32,
    /// Height of the table above the girdle.
    pub crown_height: f32,
    /// Depth of the culet below the girdle.
    pub pavilion_depth: f32,
}

impl Default for GemParams {
    /// Classic hexagonal proportions: a wide shallow crown over a deep pavilion.
    fn default() -> Self {
        Self {
            segments: 6,
            radius: 2.0,
            crown_height: 1.3,
            pavilion_depth: 2.6,
        }
    }
}

impl GemParams {
    /// Check the construction contract.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.segments < 3 {
            return Err(GeometryError::TooFewSegments(self.segments));
        }
        for (name, value) in [
            ("radius", self.radius),
            ("crown_height", self.crown_height),
            ("pavilion_depth", self.pavilion_depth),
        ] {
            if !(value > 0.0) {
                return Err(GeometryError::NonPositiveDimension { name, value });
            }
        }
        Ok(())
    }
}

/// A closed triangle mesh of the gem.
///
/// Face order is fixed: `n` table fans, `2n` crown quads, `2n` pavilion
/// quads, `n` culet fans. Immutable once built.
#[derive(Debug, Clone)]
pub struct GemMesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    segments: usize,
}

impl GemMesh {
    /// Build the gem mesh. Pure and deterministic; fails only on invalid
    /// parameters.
    pub fn build(params: GemParams) -> Result<Self, GeometryError> {
        params.validate()?;

        let n = params.segments;
        let step = TAU / n as f32;
        let ring = |scale: f32, height: f32, i: usize| {
            let angle = i as f32 * step;
            Vec3::new(
                angle.cos() * params.radius * scale,
                height,
                angle.sin() * params.radius * scale,
            )
        };

        let mut vertices = Vec::with_capacity(3 * n + 2);

        // Apexes first, then the three rings top to bottom
        let top = 0u32;
        vertices.push(Vec3::new(0.0, params.crown_height, 0.0));

        let crown = 1u32;
        vertices.extend((0..n).map(|i| ring(CROWN_SCALE, params.crown_height, i)));

        let girdle = crown + n as u32;
        vertices.extend((0..n).map(|i| ring(1.0, 0.0, i)));

        let pavilion = girdle + n as u32;
        vertices.extend(
            (0..n).map(|i| ring(PAVILION_SCALE, -params.pavilion_depth * PAVILION_RING_DROP, i)),
        );

        let culet = pavilion + n as u32;
        vertices.push(Vec3::new(0.0, -params.pavilion_depth, 0.0));

        let mut faces = Vec::with_capacity(6 * n);
        let at = |base: u32, i: usize| base + (i % n) as u32;

        // Table fan
        for i in 0..n {
            faces.push([top, at(crown, i + 1), at(crown, i)]);
        }

        // Crown quads: the interactive facets
        for i in 0..n {
            faces.push([at(crown, i), at(crown, i + 1), at(girdle, i)]);
            faces.push([at(crown, i + 1), at(girdle, i + 1), at(girdle, i)]);
        }

        // Pavilion quads
        for i in 0..n {
            faces.push([at(girdle, i), at(girdle, i + 1), at(pavilion, i)]);
            faces.push([at(girdle, i + 1), at(pavilion, i + 1), at(pavilion, i)]);
        }

        // Culet fan
        for i in 0..n {
            faces.push([culet, at(pavilion, i), at(pavilion, i + 1)]);
        }

        Ok(Self {
            vertices,
            faces,
            segments: n,
        })
    }

    /// Vertex positions, apexes first then crown/girdle/pavilion rings.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle index triples, consistently wound outward.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Segment (and interactive facet) count.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Total number of triangles (`6n`).
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// The interactive facet a face belongs to, if any.
    ///
    /// Only the crown-side quad pairs carry a facet identity; table,
    /// pavilion and culet faces return `None`.
    pub fn facet_of_face(&self, face: usize) -> Option<usize> {
        let n = self.segments;
        let crown = n..3 * n;
        if crown.contains(&face) {
            Some((face - n) / 2)
        } else {
            None
        }
    }

    /// Unit normal of a face, derived from winding.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.faces[face];
        let (a, b, c) = (
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        );
        (b - a).cross(c - a).normalize()
    }

    /// Centroid of a face.
    pub fn face_centroid(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.faces[face];
        (self.vertices[a as usize] + self.vertices[b as usize] + self.vertices[c as usize]) / 3.0
    }

    /// Whether the surface is closed: every undirected edge shared by
    /// exactly two triangles, and the two windings traverse it in opposite
    /// directions (consistent orientation).
    pub fn is_watertight(&self) -> bool {
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for [a, b, c] in &self.faces {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *directed.entry((*u, *v)).or_insert(0) += 1;
            }
        }
        directed.iter().all(|(&(u, v), &count)| {
            count == 1 && directed.get(&(v, u)) == Some(&1)
        })
    }
}

/// Anchor position for facet `i`'s label and marker: the crown-facet
/// midline, just inside the girdle.
pub fn facet_anchor(params: &GemParams, i: usize) -> Vec3 {
    let angle = i as f32 * TAU / params.segments as f32;
    let r = params.radius * ANCHOR_SCALE;
    Vec3::new(
        angle.cos() * r,
        params.crown_height * 0.5,
        angle.sin() * r,
    )
}
