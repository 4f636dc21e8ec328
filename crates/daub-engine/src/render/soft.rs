use crate::coords::{Vec2, Viewport};
use crate::paint::Rgba;

use super::{RasterState, Rasterizer};

/// CPU reference rasterizer writing into an RGBA8 pixel buffer.
///
/// Follows the same rules as the GPU binding: points cover a `size`-pixel
/// square centred on the vertex, triangles fill every pixel whose centre lies
/// inside (edges inclusive), later draws overwrite earlier ones.
/// Useful for headless rendering and pixel-level checks.
pub struct SoftRasterizer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: RasterState,
}

impl SoftRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            state: RasterState::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, top row first.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)` (origin top-left), or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Counts pixels equal to `color` (after 8-bit quantisation).
    pub fn count_pixels(&self, color: Rgba) -> usize {
        let want = color.to_u8();
        self.pixels.chunks_exact(4).filter(|p| *p == want).count()
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    /// NDC → continuous pixel coordinates (origin top-left, +Y down).
    fn to_pixel(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - p.y) * 0.5 * self.height as f32,
        )
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Pixel index range whose centres fall in `[lo, hi)` along one axis.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().max(0.0);
        let start = (start as u32).min(limit);
        let end = (end as u32).min(limit);
        start..end.max(start)
    }

    fn fill_square(&mut self, center: Vec2, size: f32, rgba: [u8; 4]) {
        if !(size.is_finite() && size > 0.0) || !center.is_finite() {
            return;
        }
        let c = self.to_pixel(center);
        let half = size / 2.0;
        for y in Self::span(c.y - half, c.y + half, self.height) {
            for x in Self::span(c.x - half, c.x + half, self.width) {
                self.put(x, y, rgba);
            }
        }
    }

    fn fill_triangle(&mut self, tri: [Vec2; 3], rgba: [u8; 4]) {
        if !tri.iter().all(|v| v.is_finite()) {
            return;
        }
        let [a, b, c] = tri.map(|v| self.to_pixel(v));

        let edge = |p: Vec2, q: Vec2, r: Vec2| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);

        // Inclusive on the max side: centres on the far edge still count.
        for y in Self::span(min_y, max_y + 1e-4, self.height) {
            for x in Self::span(min_x, max_x + 1e-4, self.width) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.put(x, y, rgba);
                }
            }
        }
    }
}

impl Rasterizer for SoftRasterizer {
    fn clear(&mut self, color: Rgba) {
        let rgba = color.to_u8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn set_point_attribute(&mut self, x: f32, y: f32, z: f32) {
        self.state.set_point_attribute(x, y, z);
    }

    fn upload_vertex_buffer(&mut self, floats: &[f32]) {
        self.state.upload(floats);
    }

    fn bind_vertex_attribute(&mut self, components: u32) {
        self.state.bind(components);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_point_size(&mut self, size: f32) {
        self.state.point_size = size;
    }

    fn draw_points(&mut self, count: u32) {
        let rgba = self.state.fill.to_u8();
        let size = self.state.point_size;
        for p in self.state.vertices(count) {
            self.fill_square(p, size, rgba);
        }
    }

    fn draw_triangles(&mut self, count: u32) {
        let rgba = self.state.fill.to_u8();
        let vertices = self.state.vertices(count);
        for tri in vertices.chunks_exact(3) {
            self.fill_triangle([tri[0], tri[1], tri[2]], rgba);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut r = SoftRasterizer::new(4, 3);
        r.clear(Rgba::BLUE);
        assert_eq!(r.count_pixels(Rgba::BLUE), 12);
    }

    #[test]
    fn point_covers_size_square() {
        let mut r = SoftRasterizer::new(20, 20);
        r.clear(Rgba::BLACK);
        r.set_point_attribute(0.0, 0.0, 0.0);
        r.set_fill_color(Rgba::RED);
        r.set_point_size(4.0);
        r.draw_points(1);
        assert_eq!(r.count_pixels(Rgba::RED), 16);
        assert_eq!(r.pixel(9, 9), Some(Rgba::RED.to_u8()));
        assert_eq!(r.pixel(0, 0), Some(Rgba::BLACK.to_u8()));
    }

    #[test]
    fn point_off_canvas_is_clipped() {
        let mut r = SoftRasterizer::new(10, 10);
        r.clear(Rgba::BLACK);
        r.set_point_attribute(5.0, 5.0, 0.0);
        r.set_fill_color(Rgba::RED);
        r.set_point_size(4.0);
        r.draw_points(1);
        assert_eq!(r.count_pixels(Rgba::RED), 0);
    }

    #[test]
    fn triangle_fills_interior_only() {
        let mut r = SoftRasterizer::new(10, 10);
        r.clear(Rgba::BLACK);
        // Lower-left half of the canvas.
        r.upload_vertex_buffer(&[-1.0, -1.0, 1.0, -1.0, -1.0, 1.0]);
        r.bind_vertex_attribute(2);
        r.set_fill_color(Rgba::GREEN);
        r.draw_triangles(3);
        assert_eq!(r.pixel(0, 9), Some(Rgba::GREEN.to_u8()));
        assert_eq!(r.pixel(9, 0), Some(Rgba::BLACK.to_u8()));
        let green = r.count_pixels(Rgba::GREEN);
        assert!(green > 40 && green < 60, "green = {green}");
    }

    #[test]
    fn winding_does_not_matter() {
        let mut cw = SoftRasterizer::new(10, 10);
        let mut ccw = SoftRasterizer::new(10, 10);
        for (r, verts) in [
            (&mut cw, [-1.0, -1.0, -1.0, 1.0, 1.0, -1.0]),
            (&mut ccw, [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0]),
        ] {
            r.clear(Rgba::BLACK);
            r.upload_vertex_buffer(&verts);
            r.bind_vertex_attribute(2);
            r.set_fill_color(Rgba::WHITE);
            r.draw_triangles(3);
        }
        assert_eq!(cw.pixels(), ccw.pixels());
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut r = SoftRasterizer::new(10, 10);
        r.clear(Rgba::BLACK);
        r.upload_vertex_buffer(&[0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
        r.bind_vertex_attribute(2);
        r.set_fill_color(Rgba::WHITE);
        r.draw_triangles(3);
        assert_eq!(r.count_pixels(Rgba::WHITE), 0);
    }
}
