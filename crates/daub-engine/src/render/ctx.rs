use crate::coords::Viewport;

/// Device handles for one frame of rasterizing.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Format pipelines must target.
    pub surface_format: wgpu::TextureFormat,
    /// Drawable size in physical pixels; point sizes are measured against it.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self { device, queue, surface_format, viewport }
    }
}

/// Where a finished frame is encoded: the frame encoder and the surface
/// texture view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
