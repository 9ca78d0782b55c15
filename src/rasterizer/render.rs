//! Framebuffer, line drawing and triangle fill

use super::math::{barycentric, Vec2};
use super::types::{Color, Texture};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    #[allow(dead_code)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Some(Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a segment between two projected points, clipped to the buffer.
    /// Segments with non-finite endpoints are skipped.
    pub fn draw_segment(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        if !p0.is_finite() || !p1.is_finite() || self.width == 0 || self.height == 0 {
            return;
        }
        let bounds = ClipRect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: (self.width - 1) as f32,
            y_max: (self.height - 1) as f32,
        };
        if let Some((a, b)) = clip_line(p0, p1, &bounds) {
            self.draw_line(
                a.x.round() as i32,
                a.y.round() as i32,
                b.x.round() as i32,
                b.y.round() as i32,
                color,
            );
        }
    }
}

// =============================================================================
// Line clipping
// =============================================================================

const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

/// Inclusive clip window
#[derive(Debug, Clone, Copy)]
pub struct ClipRect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

fn region_code(p: Vec2, r: &ClipRect) -> u8 {
    let mut code = INSIDE;
    if p.x < r.x_min {
        code |= LEFT;
    } else if p.x > r.x_max {
        code |= RIGHT;
    }
    if p.y < r.y_min {
        code |= BOTTOM;
    } else if p.y > r.y_max {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clipping. Returns the visible part of the segment, or
/// `None` if it lies entirely outside.
pub fn clip_line(mut p0: Vec2, mut p1: Vec2, r: &ClipRect) -> Option<(Vec2, Vec2)> {
    let mut code0 = region_code(p0, r);
    let mut code1 = region_code(p1, r);

    loop {
        if code0 | code1 == INSIDE {
            return Some((p0, p1));
        }
        if code0 & code1 != INSIDE {
            return None;
        }

        let code_out = if code0 != INSIDE { code0 } else { code1 };
        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);

        let clipped = if code_out & TOP != 0 {
            Vec2::new(p0.x + dx * (r.y_max - p0.y) / dy, r.y_max)
        } else if code_out & BOTTOM != 0 {
            Vec2::new(p0.x + dx * (r.y_min - p0.y) / dy, r.y_min)
        } else if code_out & RIGHT != 0 {
            Vec2::new(r.x_max, p0.y + dy * (r.x_max - p0.x) / dx)
        } else {
            Vec2::new(r.x_min, p0.y + dy * (r.x_min - p0.x) / dx)
        };

        if code_out == code0 {
            p0 = clipped;
            code0 = region_code(p0, r);
        } else {
            p1 = clipped;
            code1 = region_code(p1, r);
        }
    }
}

// =============================================================================
// Triangle fill
// =============================================================================

/// Per-pixel color source for a filled triangle
#[derive(Clone, Copy)]
pub enum Shade<'a> {
    /// Single flat color
    Flat(Color),
    /// Texture lookup with barycentric UVs; `border` covers samples outside
    /// the image and a missing texture
    Textured { texture: Option<&'a Texture>, border: Color },
}

/// Grayscale line color for a wireframe triangle at `avg_distance`
/// (closer is brighter)
pub fn wire_color(avg_distance: f32) -> Color {
    let d = (avg_distance / 1000.0).clamp(0.0, 1.0);
    let intensity = ((1.0 - d).powf(0.6) * 255.0) as u8;
    Color::gray(intensity)
}

/// Fill a screen-space triangle.
///
/// Every pixel center in the clamped bounding box is tested with
/// barycentric weights; pixels with any negative weight are skipped and a
/// zero-area triangle draws nothing. `uvs` are only read for textured fills.
pub fn rasterize_triangle(fb: &mut Framebuffer, points: [Vec2; 3], uvs: [Vec2; 3], shade: Shade) {
    if fb.width == 0 || fb.height == 0 || points.iter().any(|p| !p.is_finite()) {
        return;
    }
    let [p1, p2, p3] = points;

    let min_x = (p1.x.min(p2.x).min(p3.x).floor() as i64).max(0);
    let max_x = (p1.x.max(p2.x).max(p3.x).ceil() as i64).min(fb.width as i64 - 1);
    let min_y = (p1.y.min(p2.y).min(p3.y).floor() as i64).max(0);
    let max_y = (p1.y.max(p2.y).max(p3.y).ceil() as i64).min(fb.height as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

            let Some((w1, w2, w3)) = barycentric(center, p1, p2, p3) else {
                // Degenerate: the same for every pixel
                return;
            };
            if w1 < 0.0 || w2 < 0.0 || w3 < 0.0 {
                continue;
            }

            let color = match shade {
                Shade::Flat(color) => color,
                Shade::Textured { texture: Some(tex), border } => {
                    let uv = uvs[0] * w1 + uvs[1] * w2 + uvs[2] * w3;
                    tex.sample(uv, border)
                }
                Shade::Textured { texture: None, border } => border,
            };

            fb.set_pixel(x as usize, y as usize, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);

    fn filled(fb: &Framebuffer, x: usize, y: usize) -> bool {
        fb.get_pixel(x, y) == Some(RED)
    }

    #[test]
    fn test_clear_and_set() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Color::new(9, 8, 7));
        assert_eq!(fb.get_pixel(3, 2), Some(Color::new(9, 8, 7)));
        fb.set_pixel(1, 1, RED);
        assert_eq!(fb.get_pixel(1, 1), Some(RED));
        assert_eq!(&fb.pixels[(1 * 4 + 1) * 4..(1 * 4 + 1) * 4 + 4], &[255, 0, 0, 255]);
        // Out of bounds writes are ignored
        fb.set_pixel(4, 0, RED);
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = Framebuffer::new(2, 2);
        fb.resize(5, 7);
        assert_eq!(fb.pixels.len(), 5 * 7 * 4);
    }

    #[test]
    fn test_right_triangle_coverage() {
        let mut fb = Framebuffer::new(16, 16);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        rasterize_triangle(&mut fb, pts, [Vec2::default(); 3], Shade::Flat(RED));

        for y in 0..16 {
            for x in 0..16 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let inside = barycentric(center, pts[0], pts[1], pts[2])
                    .map(|(a, b, c)| a >= 0.0 && b >= 0.0 && c >= 0.0)
                    .unwrap_or(false);
                assert_eq!(filled(&fb, x, y), inside, "pixel ({}, {})", x, y);
                // Centers on or under the hypotenuse x + y = 10
                assert_eq!(inside, x + y <= 9, "pixel ({}, {})", x, y);
            }
        }
        assert!(filled(&fb, 0, 0));
        assert!(filled(&fb, 9, 0));
        assert!(filled(&fb, 0, 9));
        assert!(!filled(&fb, 9, 1));
        assert!(!filled(&fb, 5, 5));
    }

    #[test]
    fn test_winding_independent() {
        let mut a = Framebuffer::new(16, 16);
        let mut b = Framebuffer::new(16, 16);
        let p = [Vec2::new(1.0, 2.0), Vec2::new(13.0, 4.0), Vec2::new(6.0, 14.0)];
        rasterize_triangle(&mut a, p, [Vec2::default(); 3], Shade::Flat(RED));
        rasterize_triangle(&mut b, [p[0], p[2], p[1]], [Vec2::default(); 3], Shade::Flat(RED));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_degenerate_draws_nothing() {
        let mut fb = Framebuffer::new(8, 8);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), Vec2::new(8.0, 8.0)];
        rasterize_triangle(&mut fb, pts, [Vec2::default(); 3], Shade::Flat(RED));
        assert!(fb.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_non_finite_points_skipped() {
        let mut fb = Framebuffer::new(8, 8);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(f32::NAN, 4.0), Vec2::new(0.0, 8.0)];
        rasterize_triangle(&mut fb, pts, [Vec2::default(); 3], Shade::Flat(RED));
        assert!(fb.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_offscreen_clamped() {
        let mut fb = Framebuffer::new(8, 8);
        let pts = [Vec2::new(-100.0, -100.0), Vec2::new(100.0, -100.0), Vec2::new(0.0, 100.0)];
        rasterize_triangle(&mut fb, pts, [Vec2::default(); 3], Shade::Flat(RED));
        assert!(filled(&fb, 4, 4));
    }

    #[test]
    fn test_textured_fill_samples() {
        let tex = Texture::from_pixels(
            2,
            1,
            vec![Color::new(0, 0, 255), Color::new(0, 255, 0)],
        )
        .unwrap();
        let mut fb = Framebuffer::new(10, 10);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        // U follows screen x across the triangle
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)];
        rasterize_triangle(&mut fb, pts, uvs, Shade::Textured { texture: Some(&tex), border: RED });
        assert_eq!(fb.get_pixel(1, 1), Some(Color::new(0, 0, 255)));
        assert_eq!(fb.get_pixel(7, 1), Some(Color::new(0, 255, 0)));
    }

    #[test]
    fn test_textured_out_of_range_uses_border() {
        let tex = Texture::from_pixels(1, 1, vec![Color::WHITE]).unwrap();
        let mut fb = Framebuffer::new(10, 10);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let uvs = [Vec2::new(1.5, 1.5); 3];
        rasterize_triangle(&mut fb, pts, uvs, Shade::Textured { texture: Some(&tex), border: RED });
        assert!(filled(&fb, 2, 2));
    }

    #[test]
    fn test_missing_texture_uses_border() {
        let mut fb = Framebuffer::new(10, 10);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        rasterize_triangle(&mut fb, pts, [Vec2::default(); 3], Shade::Textured { texture: None, border: RED });
        assert!(filled(&fb, 0, 0));
        assert!(filled(&fb, 3, 3));
    }

    #[test]
    fn test_wire_color_depth() {
        assert_eq!(wire_color(0.0), Color::gray(255));
        assert_eq!(wire_color(1000.0), Color::gray(0));
        assert_eq!(wire_color(5000.0), Color::gray(0));
        assert_eq!(wire_color(-5.0), Color::gray(255));
        assert!(wire_color(200.0).r > wire_color(600.0).r);
    }

    #[test]
    fn test_clip_line_inside_untouched() {
        let r = ClipRect { x_min: 0.0, y_min: 0.0, x_max: 9.0, y_max: 9.0 };
        let (a, b) = clip_line(Vec2::new(1.0, 1.0), Vec2::new(8.0, 3.0), &r).unwrap();
        assert_eq!((a, b), (Vec2::new(1.0, 1.0), Vec2::new(8.0, 3.0)));
    }

    #[test]
    fn test_clip_line_crossing() {
        let r = ClipRect { x_min: 0.0, y_min: 0.0, x_max: 9.0, y_max: 9.0 };
        let (a, b) = clip_line(Vec2::new(-10.0, 5.0), Vec2::new(1e7, 5.0), &r).unwrap();
        assert_eq!(a, Vec2::new(0.0, 5.0));
        assert_eq!(b, Vec2::new(9.0, 5.0));
    }

    #[test]
    fn test_clip_line_outside() {
        let r = ClipRect { x_min: 0.0, y_min: 0.0, x_max: 9.0, y_max: 9.0 };
        assert!(clip_line(Vec2::new(-5.0, -5.0), Vec2::new(-1.0, 20.0), &r).is_none());
    }

    #[test]
    fn test_draw_segment_endpoints() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_segment(Vec2::new(1.0, 1.0), Vec2::new(6.0, 4.0), RED);
        assert!(filled(&fb, 1, 1));
        assert!(filled(&fb, 6, 4));
        fb.draw_segment(Vec2::new(f32::INFINITY, 0.0), Vec2::new(3.0, 3.0), Color::WHITE);
        assert_eq!(fb.get_pixel(3, 3), Some(Color::BLACK));
    }
}
