use std::f32::consts::TAU;

use crate::coords::Vec2;
use crate::paint::Rgba;
use crate::render::Rasterizer;
use crate::scene::{DisplayList, Shape};

/// Filled circle tessellated into `segments` wedges.
///
/// Fewer than 3 segments gives a malformed but harmless shape; 0 draws
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
    pub segments: u32,
    pub size: f32,
    pub color: Rgba,
}

impl CircleShape {
    #[inline]
    pub fn new(center: Vec2, radius: f32, segments: u32, size: f32, color: Rgba) -> Self {
        Self { center, radius, segments, size, color }
    }

    /// Wedge `i` spans the centre and the rim points at `TAU * i / n` and
    /// `TAU * (i + 1) / n`.
    pub fn wedges(&self) -> Vec<[Vec2; 3]> {
        let n = self.segments;
        (0..n)
            .map(|i| {
                let theta1 = i as f32 / n as f32 * TAU;
                let theta2 = (i + 1) as f32 / n as f32 * TAU;
                [
                    self.center,
                    self.center.polar_offset(self.radius, theta1),
                    self.center.polar_offset(self.radius, theta2),
                ]
            })
            .collect()
    }

    /// Interleaved xy floats for all wedges (`segments * 6`).
    pub fn floats(&self) -> Vec<f32> {
        self.wedges()
            .iter()
            .flat_map(|w| w.iter().flat_map(|v| [v.x, v.y]))
            .collect()
    }

    /// Uploads every wedge in one buffer and issues a single draw.
    pub fn render(&self, raster: &mut dyn Rasterizer) {
        let floats = self.floats();
        raster.upload_vertex_buffer(&floats);
        raster.bind_vertex_attribute(2);
        raster.set_fill_color(self.color);
        raster.set_point_size(self.size);
        raster.draw_triangles(self.segments.saturating_mul(3));
    }
}

impl DisplayList {
    /// Records a circle.
    #[inline]
    pub fn push_circle(&mut self, center: Vec2, radius: f32, segments: u32, size: f32, color: Rgba) {
        self.push(Shape::Circle(CircleShape::new(center, radius, segments, size, color)));
    }
}
