use crate::coords::Vec2;
use crate::paint::Rgba;

/// Draw-call surface that shapes emit themselves into.
///
/// The operations mirror a retained GL-style context with one position
/// attribute and two uniforms (fill colour, point size):
/// - [`set_point_attribute`](Rasterizer::set_point_attribute) feeds every
///   vertex from a constant value and disables the vertex array
/// - [`upload_vertex_buffer`](Rasterizer::upload_vertex_buffer) +
///   [`bind_vertex_attribute`](Rasterizer::bind_vertex_attribute) feed
///   vertices from the most recently uploaded buffer
///
/// Implementations must tolerate degenerate input (zero counts, counts
/// larger than the bound data, non-finite sizes) without panicking.
pub trait Rasterizer {
    /// Fills the whole target with `color`.
    fn clear(&mut self, color: Rgba);

    /// Sets the constant vertex position and disables the vertex array.
    fn set_point_attribute(&mut self, x: f32, y: f32, z: f32);

    /// Uploads `floats` as a fresh vertex buffer.
    fn upload_vertex_buffer(&mut self, floats: &[f32]);

    /// Sources positions from the uploaded buffer, `components` floats per
    /// vertex (the first two are x and y).
    fn bind_vertex_attribute(&mut self, components: u32);

    fn set_fill_color(&mut self, color: Rgba);

    /// Point diameter in pixels. Only affects [`draw_points`](Rasterizer::draw_points).
    fn set_point_size(&mut self, size: f32);

    fn draw_points(&mut self, count: u32);

    fn draw_triangles(&mut self, count: u32);
}

/// Where the position attribute currently comes from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VertexSource {
    /// Constant attribute (array disabled).
    Constant([f32; 3]),
    /// Uploaded buffer with the given components per vertex.
    Array { components: u32 },
}

/// GL-style attribute/uniform state shared by the CPU-side rasterizers.
///
/// Tracks the active vertex source, the uploaded floats and the two uniforms,
/// and resolves a draw's vertex count into concrete positions.
#[derive(Debug, Clone)]
pub struct RasterState {
    source: VertexSource,
    buffer: Vec<f32>,
    pub fill: Rgba,
    pub point_size: f32,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            source: VertexSource::Constant([0.0, 0.0, 0.0]),
            buffer: Vec::new(),
            fill: Rgba::default(),
            point_size: 1.0,
        }
    }
}

impl RasterState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn source(&self) -> VertexSource {
        self.source
    }

    pub fn set_point_attribute(&mut self, x: f32, y: f32, z: f32) {
        self.source = VertexSource::Constant([x, y, z]);
    }

    pub fn upload(&mut self, floats: &[f32]) {
        self.buffer.clear();
        self.buffer.extend_from_slice(floats);
    }

    pub fn bind(&mut self, components: u32) {
        self.source = VertexSource::Array { components };
    }

    /// Number of whole vertices available from the current source, or `None`
    /// for a constant attribute (unbounded).
    pub fn available_vertices(&self) -> Option<u32> {
        match self.source {
            VertexSource::Constant(_) => None,
            VertexSource::Array { components: 0 } => Some(0),
            VertexSource::Array { components } => {
                Some((self.buffer.len() / components as usize) as u32)
            }
        }
    }

    /// Resolves the first `count` vertex positions of a draw.
    ///
    /// Array draws are truncated to the whole vertices actually uploaded.
    pub fn vertices(&self, count: u32) -> Vec<Vec2> {
        match self.source {
            VertexSource::Constant([x, y, _]) => vec![Vec2::new(x, y); count as usize],
            VertexSource::Array { components } => {
                let n = self.available_vertices().unwrap_or(0).min(count) as usize;
                let stride = components as usize;
                (0..n)
                    .map(|i| {
                        let v = &self.buffer[i * stride..(i + 1) * stride];
                        Vec2::new(v[0], v.get(1).copied().unwrap_or(0.0))
                    })
                    .collect()
            }
        }
    }
}
