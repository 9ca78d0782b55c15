//! View, projection and rotation matrix builders

use super::math::{mat4_from_rows, mat4_identity, Mat4, Vec3, Vec4};

/// Right-handed look-at matrix.
///
/// Rows are the camera basis (right, up, forward) with the translation
/// `-dot(axis, camera_pos)` in the last column. Undefined when `up` is
/// parallel to the view direction.
pub fn view_matrix(camera_pos: Vec3, look_at: Vec3, up: Vec3) -> Mat4 {
    let forward = (camera_pos - look_at).normalize();
    let right = up.cross(forward).normalize();
    let true_up = forward.cross(right).normalize();

    mat4_from_rows(
        Vec4::new(right.x, right.y, right.z, -right.dot(camera_pos)),
        Vec4::new(true_up.x, true_up.y, true_up.z, -true_up.dot(camera_pos)),
        Vec4::new(forward.x, forward.y, forward.z, -forward.dot(camera_pos)),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Perspective projection fused with the viewport mapping.
///
/// After the homogeneous divide x and y are pixel coordinates directly:
/// w carries the view-space depth (row 3 = (0, 0, 1, 0)) and the half
/// viewport size is folded into rows 0 and 1.
pub fn projection_matrix(viewport_width: f32, viewport_height: f32, fov_degrees: f32) -> Mat4 {
    let cot = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
    let half_w = viewport_width / 2.0;
    let half_h = viewport_height / 2.0;

    mat4_from_rows(
        Vec4::new(-half_w * cot, 0.0, half_w, 0.0),
        Vec4::new(0.0, half_h * cot, half_h, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
    )
}

/// Axis-angle rotation (Rodrigues). The axis is normalized here; a
/// zero-length axis yields the identity.
pub fn rotation_matrix(axis: Vec3, angle_degrees: f32) -> Mat4 {
    let a = axis.normalize();
    if a == Vec3::ZERO {
        return mat4_identity();
    }

    let (s, c) = angle_degrees.to_radians().sin_cos();
    let one_c = 1.0 - c;
    let (x, y, z) = (a.x, a.y, a.z);

    [
        [c + x * x * one_c, x * y * one_c - z * s, x * z * one_c + y * s, 0.0],
        [y * x * one_c + z * s, c + y * y * one_c, y * z * one_c - x * s, 0.0],
        [z * x * one_c - y * s, z * y * one_c + x * s, c + z * z * one_c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{mat4_mul, mat4_transform, mat4_transform_point};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).len() < 1e-3
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let cam = Vec3::new(300.0, 200.0, 50.0);
        let view = view_matrix(cam, Vec3::new(0.0, 50.0, 0.0), Vec3::UP);
        assert!(approx(mat4_transform_point(&view, cam), Vec3::ZERO));
    }

    #[test]
    fn test_view_matrix_target_on_negative_z() {
        let cam = Vec3::new(0.0, 0.0, 100.0);
        let target = Vec3::ZERO;
        let view = view_matrix(cam, target, Vec3::UP);
        let p = mat4_transform_point(&view, target);
        assert!(approx(p, Vec3::new(0.0, 0.0, -100.0)));
    }

    #[test]
    fn test_projection_centers_look_direction() {
        let proj = projection_matrix(640.0, 480.0, 45.0);
        // A point straight ahead in view space lands on the viewport center
        let p = mat4_transform(&proj, Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert!((p.w + 100.0).abs() < 1e-4);
        assert!((p.x / p.w - 320.0).abs() < 1e-3);
        assert!((p.y / p.w - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_projection_axes_orientation() {
        let proj = projection_matrix(640.0, 480.0, 45.0);
        // View-space right maps to screen right, view-space up to screen top
        let right = mat4_transform(&proj, Vec4::new(10.0, 0.0, -100.0, 1.0));
        let up = mat4_transform(&proj, Vec4::new(0.0, 10.0, -100.0, 1.0));
        assert!(right.x / right.w > 320.0);
        assert!(up.y / up.w < 240.0);
    }

    #[test]
    fn test_rotation_about_y() {
        let rot = rotation_matrix(Vec3::UP, 90.0);
        let p = mat4_transform_point(&rot, Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let a = rotation_matrix(Vec3::new(0.0, 5.0, 0.0), 30.0);
        let b = rotation_matrix(Vec3::UP, 30.0);
        for i in 0..4 {
            for j in 0..4 {
                assert!((a[i][j] - b[i][j]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_rotation_zero_axis_is_identity() {
        assert_eq!(rotation_matrix(Vec3::ZERO, 45.0), mat4_identity());
    }

    #[test]
    fn test_rotation_inverse() {
        let axis = Vec3::new(1.0, 2.0, -0.5);
        let m = mat4_mul(&rotation_matrix(axis, 37.0), &rotation_matrix(axis, -37.0));
        let id = mat4_identity();
        for i in 0..4 {
            for j in 0..4 {
                assert!((m[i][j] - id[i][j]).abs() < 1e-5);
            }
        }
    }
}
