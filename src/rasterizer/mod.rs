//! Software rasterizer
//!
//! Features:
//! - Row-major 4x4 transforms with a fused projection/viewport matrix
//! - Orbit camera with drag rotation and wheel zoom
//! - Back-face culling against the global view direction
//! - Painter's algorithm (no z-buffer)
//! - Barycentric triangle fill with flat color or affine texture lookup
//!
//! # Module Organization
//!
//! - `math` - Vec2, Vec3, Vec4, Mat4 and barycentric weights
//! - `transform` - view, projection and rotation matrices
//! - `types` - Color, Texture, Vertex, Triangle, DisplayMode
//! - `camera` - Orbit camera
//! - `visibility` - Face normals, back-face test, depth sort
//! - `render` - Framebuffer, clipped lines, triangle fill

pub mod camera;
pub mod math;
pub mod render;
pub mod transform;
pub mod types;
pub mod visibility;

// =============================================================================
// Convenience re-exports for commonly used items
// =============================================================================

pub use types::{Color, DisplayMode, Texture, Triangle, Vertex};

pub use math::{Vec2, Vec3, Vec4, mat4_mul, mat4_transform};

pub use transform::{projection_matrix, view_matrix};

pub use camera::Camera;

pub use visibility::{face_normal, is_front_facing, sort_back_to_front, update_depths};

pub use render::{Framebuffer, Shade, rasterize_triangle, wire_color};
