use crate::coords::Vec2;
use crate::paint::Rgba;
use crate::render::Rasterizer;
use crate::scene::{DisplayList, Shape};

/// A single square point, `size` pixels across.
#[derive(Debug, Clone, PartialEq)]
pub struct PointShape {
    pub position: Vec2,
    pub size: f32,
    pub color: Rgba,
}

impl PointShape {
    #[inline]
    pub fn new(position: Vec2, size: f32, color: Rgba) -> Self {
        Self { position, size, color }
    }

    /// Feeds the position as a constant attribute; no vertex buffer.
    pub fn render(&self, raster: &mut dyn Rasterizer) {
        raster.set_point_attribute(self.position.x, self.position.y, 0.0);
        raster.set_fill_color(self.color);
        raster.set_point_size(self.size);
        raster.draw_points(1);
    }
}

impl DisplayList {
    /// Records a point.
    #[inline]
    pub fn push_point(&mut self, position: Vec2, size: f32, color: Rgba) {
        self.push(Shape::Point(PointShape::new(position, size, color)));
    }
}
