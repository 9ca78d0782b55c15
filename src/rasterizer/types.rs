//! Core types for the rasterizer

use super::math::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grayscale color with all channels set to `v`
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Build from HSV: hue in degrees (wrapped into [0, 360)), saturation
    /// and value in 0-255.
    pub fn from_hsv(hue: u16, saturation: u8, value: u8) -> Self {
        let h = (hue % 360) as f32 / 60.0;
        let s = saturation as f32 / 255.0;
        let v = value as f32 / 255.0;

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to [u8; 4] RGBA for the framebuffer (always opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

// =============================================================================
// Texture
// =============================================================================

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    /// File could not be read
    Io(String),
    /// Bytes could not be decoded as an image
    Decode(String),
    /// Image decoded to zero pixels
    Empty,
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Io(msg) => write!(f, "I/O error: {}", msg),
            TextureError::Decode(msg) => write!(f, "Decode error: {}", msg),
            TextureError::Empty => write!(f, "Image has no pixels"),
        }
    }
}

impl std::error::Error for TextureError {}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e.to_string())
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => TextureError::Io(io.to_string()),
            other => TextureError::Decode(other.to_string()),
        }
    }
}

/// Decoded RGB texture (row-major pixels)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Wrap an existing pixel grid. Returns `Empty` when the grid has no
    /// pixels or its length does not match the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(TextureError::Empty);
        }
        Ok(Self { width, height, pixels, name: String::new() })
    }

    /// Load texture from an image file (png, jpeg or bmp)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_bytes(&bytes, name)
    }

    /// Decode texture from in-memory image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels: Vec<Color> = rgb.pixels().map(|p| Color::new(p[0], p[1], p[2])).collect();

        let mut tex = Self::from_pixels(width as usize, height as usize, pixels)?;
        tex.name = name;
        Ok(tex)
    }

    /// Pixel at integer coordinates, `None` when out of bounds
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.pixels.get(y as usize * self.width + x as usize).copied()
    }

    /// Nearest-texel lookup at `(floor(u * width), floor(v * height))`.
    /// Coordinates that land outside the image return `border`.
    pub fn sample(&self, uv: Vec2, border: Color) -> Color {
        let tx = (uv.x * self.width as f32).floor();
        let ty = (uv.y * self.height as f32).floor();
        if !tx.is_finite() || !ty.is_finite() {
            return border;
        }
        self.get_pixel(tx as i64, ty as i64).unwrap_or(border)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A mesh vertex: homogeneous position (w = 1), normal (w = 0) and UV
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec4,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec4, normal: Vec4, tex_coord: Vec2) -> Self {
        Self { position, normal, tex_coord }
    }
}

/// A triangle (indices into the vertex buffer) with its flat color and the
/// per-frame average distance to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub avg_distance: f32,
    pub color: Color,
}

impl Triangle {
    pub fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
            avg_distance: 0.0,
            color: Color::WHITE,
        }
    }
}

/// How triangles are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Depth-shaded edges of every triangle, no culling
    Wireframe,
    /// Front faces filled with their flat color
    #[default]
    Colored,
    /// Front faces filled with the loaded texture
    Textured,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Wireframe, DisplayMode::Colored, DisplayMode::Textured];

    /// Label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Wireframe => "Wireframe",
            DisplayMode::Colored => "Colored",
            DisplayMode::Textured => "Textured",
        }
    }
}
