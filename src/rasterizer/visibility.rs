//! Back-face test and painter's-algorithm ordering

use std::cmp::Ordering;

use super::math::Vec3;
use super::types::{Triangle, Vertex};

/// Unit normal of the triangle (p1, p2, p3) by the right-hand rule
pub fn face_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    (p2 - p1).cross(p3 - p1).normalize()
}

/// A face is front-facing when its normal does not point along the view
/// direction. Uses the camera's global view direction, not the per-face
/// vector to the eye.
pub fn is_front_facing(normal: Vec3, camera_pos: Vec3, look_at: Vec3) -> bool {
    let view_dir = (look_at - camera_pos).normalize();
    normal.dot(view_dir) <= 0.0
}

/// World-space corner positions of a triangle
pub fn triangle_positions(tri: &Triangle, vertices: &[Vertex]) -> [Vec3; 3] {
    tri.indices.map(|i| vertices[i].position.xyz())
}

/// Recompute every triangle's mean vertex distance to the camera
pub fn update_depths(triangles: &mut [Triangle], vertices: &[Vertex], camera_pos: Vec3) {
    for tri in triangles.iter_mut() {
        let [p1, p2, p3] = triangle_positions(tri, vertices);
        let d1 = p1.distance(camera_pos);
        let d2 = p2.distance(camera_pos);
        let d3 = p3.distance(camera_pos);
        tri.avg_distance = (d1 + d2 + d3) / 3.0;
    }
}

/// Sort farthest first so nearer triangles overwrite farther ones
pub fn sort_back_to_front(triangles: &mut [Triangle]) {
    triangles.sort_by(|a, b| {
        b.avg_distance
            .partial_cmp(&a.avg_distance)
            .unwrap_or(Ordering::Equal)
    });
}
