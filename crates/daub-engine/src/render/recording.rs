use crate::coords::Vec2;
use crate::paint::Rgba;

use super::{RasterState, Rasterizer};

/// A resolved draw call, as seen by a [`RecordingRasterizer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Points { vertices: Vec<Vec2>, size: f32, color: Rgba },
    Triangles { vertices: Vec<Vec2>, size: f32, color: Rgba },
}

impl DrawOp {
    pub fn color(&self) -> Rgba {
        match self {
            DrawOp::Clear(c) => *c,
            DrawOp::Points { color, .. } | DrawOp::Triangles { color, .. } => *color,
        }
    }
}

/// Rasterizer that records draw calls instead of producing pixels.
///
/// Lets callers inspect draw ordering and emitted geometry without a GPU.
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    state: RasterState,
    ops: Vec<DrawOp>,
    uploads: usize,
}

impl RecordingRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the recorded ops and starts a fresh log. Attribute/uniform
    /// state is kept, like a real context between frames.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of vertex buffers uploaded so far.
    #[inline]
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl Rasterizer for RecordingRasterizer {
    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn set_point_attribute(&mut self, x: f32, y: f32, z: f32) {
        self.state.set_point_attribute(x, y, z);
    }

    fn upload_vertex_buffer(&mut self, floats: &[f32]) {
        self.uploads += 1;
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
        self.ops.push(DrawOp::Points {
            vertices: self.state.vertices(count),
            size: self.state.point_size,
            color: self.state.fill,
        });
    }

    fn draw_triangles(&mut self, count: u32) {
        self.ops.push(DrawOp::Triangles {
            vertices: self.state.vertices(count),
            size: self.state.point_size,
            color: self.state.fill,
        });
    }
}
