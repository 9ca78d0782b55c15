//! Viewer state and per-frame pipeline
//!
//! `Viewer` owns everything a frame reads: shape parameters, the mesh built
//! from them, the orbit camera, the optional texture and the display mode.
//! All mutation happens between frames on the same thread.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use macroquad::logging::{info, warn};
use rand::rngs::StdRng;

use crate::config::ViewerConfig;
use crate::mesh::{CylinderParams, Mesh};
use crate::rasterizer::{
    face_normal, is_front_facing, mat4_mul, mat4_transform, projection_matrix, rasterize_triangle,
    sort_back_to_front, update_depths, view_matrix, wire_color, Camera, Color, DisplayMode,
    Framebuffer, Shade, Texture, Vec2, Vec3,
};

/// Render context for a single viewport
pub struct Viewer {
    radius: i32,
    height: i32,
    subdivisions: i32,
    mesh: Mesh,
    camera: Camera,
    texture: Option<Texture>,
    display_mode: DisplayMode,
    fov_degrees: f32,
    background: Color,
    texture_border: Color,
    rng: StdRng,
    /// Projected screen points, one per vertex, reused across frames
    projected: Vec<Vec2>,
}

impl Viewer {
    pub fn new(config: &ViewerConfig, rng: StdRng) -> Self {
        let height = config.height;
        let camera = Camera::new(config.camera_position, Self::target_for(height), Vec3::UP);

        let mut viewer = Self {
            radius: config.radius,
            height,
            subdivisions: config.subdivisions,
            mesh: Mesh::default(),
            camera,
            texture: None,
            display_mode: config.display_mode,
            fov_degrees: config.fov_degrees,
            background: config.background,
            texture_border: config.texture_border,
            rng,
            projected: Vec::new(),
        };
        viewer.rebuild();
        viewer
    }

    /// Camera target for a cylinder of the given height
    fn target_for(height: i32) -> Vec3 {
        Vec3::new(0.0, height as f32 / 2.0, 0.0)
    }

    pub fn params(&self) -> CylinderParams {
        CylinderParams {
            radius: self.radius as f32,
            height: self.height as f32,
            subdivisions: self.subdivisions as usize,
        }
    }

    /// Discard and regenerate the mesh from the current parameters
    fn rebuild(&mut self) {
        self.mesh = self.params().build(&mut self.rng);
        info!(
            "Rebuilt cylinder r={} h={} n={}: {} vertices, {} triangles",
            self.radius,
            self.height,
            self.subdivisions,
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn subdivisions(&self) -> i32 {
        self.subdivisions
    }

    #[allow(dead_code)]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[allow(dead_code)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_radius(&mut self, radius: i32) {
        if radius != self.radius {
            self.radius = radius;
            self.rebuild();
        }
    }

    /// Changing the height also re-centers the camera target
    pub fn set_height(&mut self, height: i32) {
        if height != self.height {
            self.height = height;
            self.rebuild();
            self.camera.set_look_at(Self::target_for(height));
        }
    }

    pub fn set_subdivisions(&mut self, subdivisions: i32) {
        if subdivisions != self.subdivisions {
            self.subdivisions = subdivisions;
            self.rebuild();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Replace the texture; the previous one is dropped
    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.texture = texture;
    }

    /// Load a texture from disk. On success the texture is stored and the
    /// mode switches to Textured; on failure the texture becomes absent and
    /// the mode is left alone.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_texture(&mut self, path: &Path) -> bool {
        match Texture::from_file(path) {
            Ok(texture) => {
                info!(
                    "Loaded texture '{}' from {} ({}x{})",
                    texture.name,
                    path.display(),
                    texture.width,
                    texture.height
                );
                self.set_texture(Some(texture));
                self.display_mode = DisplayMode::Textured;
                true
            }
            Err(e) => {
                warn!("Failed to load texture {}: {}", path.display(), e);
                self.set_texture(None);
                false
            }
        }
    }

    /// Pointer drag in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.camera.orbit(dx, dy);
    }

    /// Wheel step (+1 per notch toward the target)
    pub fn zoom(&mut self, step: f32) {
        self.camera.zoom(step);
    }

    /// Draw one complete frame into `fb`
    pub fn render(&mut self, fb: &mut Framebuffer) {
        fb.clear(self.background);

        let view = view_matrix(self.camera.position, self.camera.look_at, self.camera.up);
        let proj = projection_matrix(fb.width as f32, fb.height as f32, self.fov_degrees);
        let vp = mat4_mul(&proj, &view);

        self.projected.clear();
        self.projected.extend(self.mesh.vertices.iter().map(|v| {
            let mut p = mat4_transform(&vp, v.position);
            if p.w != 0.0 {
                p = p / p.w;
            }
            Vec2::new(p.x, p.y)
        }));

        let cam = self.camera.position;
        let look_at = self.camera.look_at;
        update_depths(&mut self.mesh.triangles, &self.mesh.vertices, cam);
        sort_back_to_front(&mut self.mesh.triangles);

        let vertices = &self.mesh.vertices;
        let projected = &self.projected;

        for tri in &self.mesh.triangles {
            let [i1, i2, i3] = tri.indices;
            let points = [projected[i1], projected[i2], projected[i3]];

            if self.display_mode == DisplayMode::Wireframe {
                let color = wire_color(tri.avg_distance);
                fb.draw_segment(points[0], points[1], color);
                fb.draw_segment(points[1], points[2], color);
                fb.draw_segment(points[2], points[0], color);
                continue;
            }

            let normal = face_normal(
                vertices[i1].position.xyz(),
                vertices[i2].position.xyz(),
                vertices[i3].position.xyz(),
            );
            if !is_front_facing(normal, cam, look_at) {
                continue;
            }

            let uvs = [vertices[i1].tex_coord, vertices[i2].tex_coord, vertices[i3].tex_coord];
            let shade = match self.display_mode {
                DisplayMode::Textured => Shade::Textured {
                    texture: self.texture.as_ref(),
                    border: self.texture_border,
                },
                _ => Shade::Flat(tri.color),
            };
            rasterize_triangle(fb, points, uvs, shade);
        }
    }
}
