//! Top-down projection of the gem into a 2D viewbox.
//!
//! Seen from straight above, the crown ring becomes the inner table polygon
//! and the girdle the outer outline; each interactive facet is the
//! trapezoid between them at its ring position. Projecting the real mesh
//! (rather than hand-placing shapes) keeps the flat facets in exact ring
//! correspondence with their 3D counterparts.

use glam::Vec2;
use lapidary_geometry::GemMesh;

/// Fraction of the half-viewbox the girdle outline occupies.
const OUTLINE_FILL: f32 = 0.72;

/// Label distance as a multiple of the girdle radius.
const LABEL_REACH: f32 = 1.3;

/// The projected gem: facet trapezoids, table polygon, label anchors.
#[derive(Debug, Clone)]
pub struct FlatGem {
    width: f32,
    height: f32,
    center: Vec2,
    facets: Vec<[Vec2; 4]>,
    table: Vec<Vec2>,
    labels: Vec<Vec2>,
}

impl FlatGem {
    /// Project `mesh` into a `width` x `height` viewbox.
    pub fn project(mesh: &GemMesh, width: f32, height: f32) -> Self {
        let n = mesh.segments();
        let vertices = mesh.vertices();

        // Vertex layout: apex, crown ring, girdle ring, ...
        let flat = |v: glam::Vec3| Vec2::new(v.x, v.z);
        let crown: Vec<Vec2> = vertices[1..1 + n].iter().copied().map(flat).collect();
        let girdle: Vec<Vec2> = vertices[1 + n..1 + 2 * n].iter().copied().map(flat).collect();

        let radius = girdle
            .iter()
            .map(|p| p.length())
            .fold(0.0_f32, f32::max);
        let center = Vec2::new(width, height) * 0.5;
        let scale = width.min(height) * 0.5 * OUTLINE_FILL / radius;
        let place = |p: Vec2| center + p * scale;

        let facets = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                [
                    place(crown[i]),
                    place(crown[j]),
                    place(girdle[j]),
                    place(girdle[i]),
                ]
            })
            .collect();

        let table = crown.iter().copied().map(place).collect();

        let labels = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let mid = (crown[i] + crown[j] + girdle[i] + girdle[j]) / 4.0;
                place(mid.normalize_or_zero() * radius * LABEL_REACH)
            })
            .collect();

        Self {
            width,
            height,
            center,
            facets,
            table,
            labels,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Number of interactive facets.
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Corner points of facet `i`, crown edge first.
    pub fn facet(&self, i: usize) -> &[Vec2; 4] {
        &self.facets[i]
    }

    /// The central table polygon (projected crown ring).
    pub fn table(&self) -> &[Vec2] {
        &self.table
    }

    /// Anchor point for facet `i`'s label, outside the outline.
    pub fn label(&self, i: usize) -> Vec2 {
        self.labels[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapidary_geometry::GemParams;

    fn flat() -> FlatGem {
        let mesh = GemMesh::build(GemParams::default()).unwrap();
        FlatGem::project(&mesh, 500.0, 480.0)
    }

    #[test]
    fn one_trapezoid_per_facet() {
        let flat = flat();
        assert_eq!(flat.facet_count(), 6);
        assert_eq!(flat.table().len(), 6);
    }

    #[test]
    fn facets_stay_inside_viewbox() {
        let flat = flat();
        for i in 0..flat.facet_count() {
            for p in flat.facet(i) {
                assert!(p.x >= 0.0 && p.x <= flat.width());
                assert!(p.y >= 0.0 && p.y <= flat.height());
            }
        }
    }

    #[test]
    fn labels_sit_outside_the_outline() {
        let flat = flat();
        let center = flat.center();
        let outline: f32 = (0..flat.facet_count())
            .flat_map(|i| flat.facet(i).iter())
            .map(|p| (*p - center).length())
            .fold(0.0, f32::max);
        for i in 0..flat.facet_count() {
            assert!((flat.label(i) - center).length() > outline * 0.99);
        }
    }

    #[test]
    fn adjacent_facets_share_an_edge() {
        // Facet i's crown-next corner is facet i+1's crown-first corner
        let flat = flat();
        for i in 0..flat.facet_count() {
            let j = (i + 1) % flat.facet_count();
            assert!((flat.facet(i)[1] - flat.facet(j)[0]).length() < 1e-4);
            assert!((flat.facet(i)[2] - flat.facet(j)[3]).length() < 1e-4);
        }
    }
}
