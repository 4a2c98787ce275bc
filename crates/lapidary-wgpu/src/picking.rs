//! Cursor-ray facet picking.
//!
//! Hover and click need to know which facet sits under the cursor. The
//! cursor is unprojected through the inverse view-projection into a model
//! space ray, intersected against every triangle (36 for the hexagonal gem,
//! so brute force is the right tool), and the nearest hit is mapped through
//! the mesh's facet table. Hits on the table, pavilion or culet return
//! `None`: only crown facets are interactive.

use glam::{Mat4, Vec2, Vec3};
use lapidary_geometry::GemMesh;

const RAY_EPSILON: f32 = 1e-7;

/// Unproject the cursor into an origin + direction ray.
///
/// `inv_view_proj` inverts the full clip transform (projection x view x
/// model), so the returned ray lives in model space. Depth range is wgpu's
/// `[0, 1]`.
pub fn cursor_ray(cursor: Vec2, viewport: Vec2, inv_view_proj: &Mat4) -> (Vec3, Vec3) {
    let ndc = Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        1.0 - cursor.y / viewport.y * 2.0,
    );
    let near = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    (near, (far - near).normalize())
}

/// Moller-Trumbore ray/triangle intersection, returning the hit distance.
///
/// Both winding directions hit; front/back resolution happens by nearest
/// distance in the caller.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let ab = b - a;
    let ac = c - a;
    let p = dir.cross(ac);
    let det = ab.dot(p);
    if det.abs() < RAY_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(ab);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ac.dot(q) * inv_det;
    (t > RAY_EPSILON).then_some(t)
}

/// The interactive facet under the cursor, if any.
pub fn pick_facet(
    cursor: Vec2,
    viewport: Vec2,
    view_proj: Mat4,
    model: Mat4,
    mesh: &GemMesh,
) -> Option<usize> {
    let inverse = (view_proj * model).inverse();
    let (origin, dir) = cursor_ray(cursor, viewport, &inverse);

    let mut nearest: Option<(f32, usize)> = None;
    for face in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.faces()[face];
        let hit = ray_triangle(
            origin,
            dir,
            mesh.vertices()[a as usize],
            mesh.vertices()[b as usize],
            mesh.vertices()[c as usize],
        );
        if let Some(t) = hit {
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, face));
            }
        }
    }

    nearest.and_then(|(_, face)| mesh.facet_of_face(face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use lapidary_geometry::GemParams;

    const VIEWPORT: Vec2 = Vec2::new(500.0, 480.0);

    fn view_proj() -> Mat4 {
        let cam = OrbitCamera::new();
        cam.view_projection_matrix(Vec3::new(0.0, 0.0, 8.0), Vec3::Y, VIEWPORT.x / VIEWPORT.y)
    }

    fn mesh() -> GemMesh {
        GemMesh::build(GemParams::default()).unwrap()
    }

    #[test]
    fn ray_hits_unit_triangle() {
        let t = ray_triangle(
            Vec3::new(0.2, 0.2, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_outside_triangle() {
        let t = ray_triangle(
            Vec3::new(0.9, 0.9, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!(t.is_none());
    }

    #[test]
    fn ray_behind_origin_misses() {
        let t = ray_triangle(
            Vec3::new(0.2, 0.2, -5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!(t.is_none());
    }

    #[test]
    fn cursor_center_ray_points_at_target() {
        let vp = view_proj();
        let (origin, dir) = cursor_ray(VIEWPORT * 0.5, VIEWPORT, &vp.inverse());
        // Ray starts near the camera and heads toward the origin
        assert!((origin - Vec3::new(0.0, 0.0, 8.0)).length() < 0.5);
        assert!((dir - Vec3::NEG_Z).length() < 1e-3);
    }

    #[test]
    fn picks_the_facing_crown_facet() {
        // Camera looks down -Z; the crown quad facing it spans ring angles
        // 60..120 degrees, which is facet 1
        let cursor = Vec2::new(VIEWPORT.x * 0.5, VIEWPORT.y * 0.45);
        let picked = pick_facet(cursor, VIEWPORT, view_proj(), Mat4::IDENTITY, &mesh());
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn pavilion_is_not_interactive() {
        // Below center the nearest hit is a pavilion face
        let cursor = Vec2::new(VIEWPORT.x * 0.5, VIEWPORT.y * 0.72);
        let picked = pick_facet(cursor, VIEWPORT, view_proj(), Mat4::IDENTITY, &mesh());
        assert_eq!(picked, None);
    }

    #[test]
    fn empty_space_misses() {
        let picked = pick_facet(Vec2::ZERO, VIEWPORT, view_proj(), Mat4::IDENTITY, &mesh());
        assert_eq!(picked, None);
    }

    #[test]
    fn model_rotation_moves_the_pick() {
        // Turning the gem one segment backward brings facet 0 around to
        // face the camera where facet 1 was
        let cursor = Vec2::new(VIEWPORT.x * 0.5, VIEWPORT.y * 0.45);
        let turned = Mat4::from_rotation_y(-std::f32::consts::TAU / 6.0);
        let picked = pick_facet(cursor, VIEWPORT, view_proj(), turned, &mesh());
        assert_eq!(picked, Some(0));
    }
}
