//! Procedural capped cylinder
//!
//! Vertex layout for `n` subdivisions (4n + 2 vertices):
//! - `0`: top apex
//! - `1..=n`: top rim (cap normals, disk UVs around (0.25, 0.25))
//! - `n+1..=2n`: top rim again for the side band (radial normals, V = 1.0)
//! - `2n+1..=3n`: bottom rim for the side band (radial normals, V = 0.5)
//! - `3n+1..=4n`: bottom rim (cap normals, disk UVs around (0.75, 0.25))
//! - `4n+1`: bottom apex
//!
//! Triangle layout (4n triangles): top fan `0..n`, side band `n..3n`,
//! bottom fan `3n..4n`.

use std::f32::consts::PI;

use rand::Rng;

use crate::rasterizer::{Color, Triangle, Vec2, Vec4, Vertex};

/// Saturation and value of the random per-triangle colors
pub const FACE_SATURATION: u8 = 200;
pub const FACE_VALUE: u8 = 200;

/// Cylinder shape. `subdivisions` must be at least 3; the parameter
/// controls enforce this before a build is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius: f32,
    pub height: f32,
    pub subdivisions: usize,
}

/// Vertex and triangle buffers, always rebuilt as a pair
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl CylinderParams {
    /// Generate the mesh, drawing one random hue per triangle from `rng`
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Mesh {
        let n = self.subdivisions;
        let r = self.radius;
        let h = self.height;

        let mut vertices = vec![Vertex::default(); 4 * n + 2];
        let mut triangles = Vec::with_capacity(4 * n);

        let up = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let down = Vec4::new(0.0, -1.0, 0.0, 0.0);

        // Top cap
        vertices[0] = Vertex::new(Vec4::new(0.0, h, 0.0, 1.0), up, Vec2::new(0.25, 0.25));
        for i in 0..n {
            let angle = 2.0 * PI * i as f32 / n as f32;
            let (sin, cos) = angle.sin_cos();
            let uv = Vec2::new(0.25 * (1.0 + cos), 0.25 * (1.0 + sin));
            vertices[i + 1] = Vertex::new(Vec4::new(r * cos, h, r * sin, 1.0), up, uv);
        }

        // Bottom cap
        vertices[4 * n + 1] = Vertex::new(Vec4::new(0.0, 0.0, 0.0, 1.0), down, Vec2::new(0.75, 0.25));
        for i in 0..n {
            let angle = 2.0 * PI * i as f32 / n as f32;
            let (sin, cos) = angle.sin_cos();
            let uv = Vec2::new(0.25 * (3.0 + cos), 0.25 * (1.0 + sin));
            vertices[3 * n + 1 + i] = Vertex::new(Vec4::new(r * cos, 0.0, r * sin, 1.0), down, uv);
        }

        // Side band: copies of both rims with radial normals taken from the
        // generating position
        let side_u = |i: usize| i as f32 / (n - 1) as f32;
        for i in 0..n {
            let p = vertices[i + 1].position;
            let normal = Vec4::new(p.x / r, 0.0, p.z / r, 0.0);
            vertices[n + 1 + i] = Vertex::new(p, normal, Vec2::new(side_u(i), 1.0));
        }
        for i in 0..n {
            let p = vertices[3 * n + 1 + i].position;
            let normal = Vec4::new(p.x / r, 0.0, p.z / r, 0.0);
            vertices[2 * n + 1 + i] = Vertex::new(p, normal, Vec2::new(side_u(i), 0.5));
        }

        // Top fan
        for i in 0..n - 1 {
            triangles.push(Triangle::new(0, i + 2, i + 1));
        }
        triangles.push(Triangle::new(0, 1, n));

        // Side band, upper triangles
        for i in n..2 * n - 1 {
            triangles.push(Triangle::new(i + 1, i + 2, i + 1 + n));
        }
        triangles.push(Triangle::new(2 * n, n + 1, 3 * n));

        // Side band, lower triangles
        for i in 2 * n..3 * n - 1 {
            triangles.push(Triangle::new(i + 1, i + 2 - n, i + 2));
        }
        triangles.push(Triangle::new(3 * n, n + 1, 2 * n + 1));

        // Bottom fan
        for i in 3 * n..4 * n - 1 {
            triangles.push(Triangle::new(4 * n + 1, i + 1, i + 2));
        }
        triangles.push(Triangle::new(4 * n + 1, 4 * n, 3 * n + 1));

        for tri in &mut triangles {
            let hue: u16 = rng.gen_range(0..360);
            tri.color = Color::from_hsv(hue, FACE_SATURATION, FACE_VALUE);
        }

        Mesh { vertices, triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(radius: f32, height: f32, subdivisions: usize, seed: u64) -> Mesh {
        CylinderParams { radius, height, subdivisions }.build(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_buffer_sizes() {
        for n in [3, 4, 7, 20, 100] {
            let mesh = build(50.0, 100.0, n, 0);
            assert_eq!(mesh.vertex_count(), 4 * n + 2);
            assert_eq!(mesh.triangle_count(), 4 * n);
        }
    }

    #[test]
    fn test_indices_in_range() {
        for n in [3, 5, 32] {
            let mesh = build(10.0, 20.0, n, 0);
            for tri in &mesh.triangles {
                for &i in &tri.indices {
                    assert!(i < mesh.vertex_count(), "index {} out of range for n={}", i, n);
                }
            }
        }
    }

    #[test]
    fn test_every_vertex_referenced() {
        let mesh = build(10.0, 20.0, 9, 0);
        let mut used = vec![false; mesh.vertex_count()];
        for tri in &mesh.triangles {
            for &i in &tri.indices {
                used[i] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn test_texture_coordinates() {
        let n = 12;
        let mesh = build(30.0, 60.0, n, 0);
        let caps = (0..=n).chain(3 * n + 1..=4 * n + 1);
        for i in caps {
            let uv = mesh.vertices[i].tex_coord;
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y), "cap uv {:?}", uv);
        }
        for i in n + 1..=3 * n {
            let uv = mesh.vertices[i].tex_coord;
            assert!((0.0..=1.0).contains(&uv.x), "side u {:?}", uv);
            assert!(uv.y == 1.0 || uv.y == 0.5);
        }
        // Side band spans the full U range
        assert_eq!(mesh.vertices[n + 1].tex_coord.x, 0.0);
        assert_eq!(mesh.vertices[2 * n].tex_coord.x, 1.0);
        assert_eq!(mesh.vertices[2 * n + 1].tex_coord.y, 0.5);
    }

    #[test]
    fn test_cap_uv_disks() {
        let n = 8;
        let mesh = build(30.0, 60.0, n, 0);
        for i in 1..=n {
            let uv = mesh.vertices[i].tex_coord;
            let d = ((uv.x - 0.25).powi(2) + (uv.y - 0.25).powi(2)).sqrt();
            assert!((d - 0.25).abs() < 1e-5);
        }
        for i in 3 * n + 1..=4 * n {
            let uv = mesh.vertices[i].tex_coord;
            let d = ((uv.x - 0.75).powi(2) + (uv.y - 0.25).powi(2)).sqrt();
            assert!((d - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_positions_and_normals() {
        let n = 6;
        let (r, h) = (40.0, 90.0);
        let mesh = build(r, h, n, 0);

        assert_eq!(mesh.vertices[0].position, Vec4::new(0.0, h, 0.0, 1.0));
        assert_eq!(mesh.vertices[4 * n + 1].position, Vec4::new(0.0, 0.0, 0.0, 1.0));

        for v in &mesh.vertices {
            assert_eq!(v.position.w, 1.0);
            assert_eq!(v.normal.w, 0.0);
        }
        for i in 1..=n {
            let p = mesh.vertices[i].position;
            assert!(((p.x * p.x + p.z * p.z).sqrt() - r).abs() < 1e-3);
            assert_eq!(p.y, h);
            assert_eq!(mesh.vertices[i].normal, Vec4::new(0.0, 1.0, 0.0, 0.0));
            // Side copies share the rim position
            assert_eq!(mesh.vertices[n + i].position, p);
        }
        for i in 0..n {
            let p = mesh.vertices[2 * n + 1 + i].position;
            let normal = mesh.vertices[2 * n + 1 + i].normal;
            assert_eq!(p.y, 0.0);
            assert!((normal.x - p.x / r).abs() < 1e-6 && (normal.z - p.z / r).abs() < 1e-6);
            assert_eq!(normal.y, 0.0);
        }
    }

    #[test]
    fn test_fan_winding() {
        let n = 5;
        let mesh = build(10.0, 10.0, n, 0);
        assert_eq!(mesh.triangles[0].indices, [0, 2, 1]);
        assert_eq!(mesh.triangles[n - 1].indices, [0, 1, n]);
        assert_eq!(mesh.triangles[3 * n].indices, [4 * n + 1, 3 * n + 1, 3 * n + 2]);
        assert_eq!(mesh.triangles[4 * n - 1].indices, [4 * n + 1, 4 * n, 3 * n + 1]);
    }

    #[test]
    fn test_colors_deterministic_per_seed() {
        let a = build(10.0, 10.0, 10, 42);
        let b = build(10.0, 10.0, 10, 42);
        let c = build(10.0, 10.0, 10, 43);
        let colors = |m: &Mesh| m.triangles.iter().map(|t| t.color).collect::<Vec<_>>();
        assert_eq!(colors(&a), colors(&b));
        assert_ne!(colors(&a), colors(&c));
    }

    #[test]
    fn test_colors_fixed_saturation_value() {
        let mesh = build(10.0, 10.0, 25, 7);
        for tri in &mesh.triangles {
            let c = tri.color;
            assert_eq!(c.r.max(c.g).max(c.b), FACE_VALUE);
        }
    }
}
