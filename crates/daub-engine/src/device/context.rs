use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::RasterError;

use super::surface;
use super::surface::SurfaceErrorAction;
use super::{GpuFrame, GpuInit};

/// The drawing context of the canvas window.
///
/// Holds the device the rasterizer records into and the surface its frames
/// are presented on. Borrows the window for `'w`.
pub struct Gpu<'w> {
    /// Surface bound to the window; the window must outlive `Gpu`.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

fn unavailable(what: &str, err: impl std::fmt::Display) -> RasterError {
    RasterError::ContextUnavailable(format!("{what}: {err}"))
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Every failure here means there is no context to draw with and is
    /// reported as [`RasterError::ContextUnavailable`].
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, RasterError> {
        let size = window.inner_size();

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| unavailable("failed to create wgpu surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| unavailable("no suitable GPU adapter", e))?;

        let info = adapter.get_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("daub device"),
                required_features,
                // Keep the portable minimums but allow surfaces as large as the adapter can.
                required_limits: required_limits.using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| unavailable("failed to create wgpu device/queue", e))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb).ok_or_else(|| {
            RasterError::ContextUnavailable("surface reports no supported formats".to_string())
        })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&surface_caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("daub frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        log::debug!("surface error: {err:?}");
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
