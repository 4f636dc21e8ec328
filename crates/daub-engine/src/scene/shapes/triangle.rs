use crate::coords::Vec2;
use crate::paint::Rgba;
use crate::render::Rasterizer;
use crate::scene::{DisplayList, Shape};

/// Filled triangle.
///
/// `size` is kept for uniformity with the other shapes; it is passed to the
/// rasterizer as the point size but has no visible effect on a fill.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleShape {
    pub vertices: [Vec2; 3],
    pub size: f32,
    pub color: Rgba,
}

impl TriangleShape {
    #[inline]
    pub fn new(vertices: [Vec2; 3], size: f32, color: Rgba) -> Self {
        Self { vertices, size, color }
    }

    /// Upward-pointing brush triangle centred on `at`, half-extent `size / 200`.
    pub fn stamp(at: Vec2, size: f32, color: Rgba) -> Self {
        let s = size / 200.0;
        Self::new(
            [
                Vec2::new(at.x, at.y + s),
                Vec2::new(at.x - s, at.y - s),
                Vec2::new(at.x + s, at.y - s),
            ],
            size,
            color,
        )
    }

    /// Interleaved xy floats (6).
    pub fn floats(&self) -> [f32; 6] {
        let [a, b, c] = self.vertices;
        [a.x, a.y, b.x, b.y, c.x, c.y]
    }

    pub fn render(&self, raster: &mut dyn Rasterizer) {
        raster.upload_vertex_buffer(&self.floats());
        raster.bind_vertex_attribute(2);
        raster.set_fill_color(self.color);
        raster.set_point_size(self.size);
        raster.draw_triangles(3);
    }
}

impl DisplayList {
    /// Records a triangle.
    #[inline]
    pub fn push_triangle(&mut self, vertices: [Vec2; 3], size: f32, color: Rgba) {
        self.push(Shape::Triangle(TriangleShape::new(vertices, size, color)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingRasterizer};

    #[test]
    fn stamp_geometry_is_exact() {
        let (x, y, s) = (0.25_f32, -0.5_f32, 30.0_f32);
        let t = TriangleShape::stamp(Vec2::new(x, y), s, Rgba::WHITE);
        let h = s / 200.0;
        assert_eq!(t.vertices[0], Vec2::new(x, y + h));
        assert_eq!(t.vertices[1], Vec2::new(x - h, y - h));
        assert_eq!(t.vertices[2], Vec2::new(x + h, y - h));
    }

    #[test]
    fn renders_one_three_vertex_draw() {
        let t = TriangleShape::stamp(Vec2::zero(), 20.0, Rgba::BLUE);
        let mut rec = RecordingRasterizer::new();
        t.render(&mut rec);

        assert_eq!(rec.uploads(), 1);
        assert_eq!(
            rec.ops(),
            &[DrawOp::Triangles { vertices: t.vertices.to_vec(), size: 20.0, color: Rgba::BLUE }]
        );
    }
}
