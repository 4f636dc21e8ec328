use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::coords::{Vec2, Viewport};
use crate::paint::Rgba;
use crate::render::{RasterError, RasterState, Rasterizer, RenderCtx, RenderTarget, VertexSource};

use super::common::{
    align_to, bindable_stride, draw_uniform_binding_size, point_quad, position_layout,
    shader_scope_result, DrawUniform,
};

/// wgpu implementation of the rasterizer binding.
///
/// Owns the compiled shader, the uniform bind-group layout and a pipeline per
/// vertex stride. Draw calls for one frame are recorded into a [`RasterFrame`]
/// and encoded as a single render pass by [`RasterFrame::finish`].
pub struct GpuRasterizer {
    format: wgpu::TextureFormat,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    /// Keyed by floats-per-vertex.
    pipelines: HashMap<u32, wgpu::RenderPipeline>,
    uniform_align: u64,
    /// Bytes per vertex the device accepts in a vertex buffer layout.
    max_stride: u32,
}

impl GpuRasterizer {
    /// Compiles the stamp shader and builds the default (2-component) pipeline.
    ///
    /// Shader and pipeline creation run inside a validation error scope, so
    /// a broken program comes back as [`RasterError::ShaderCompileError`]
    /// instead of reaching the device's uncaptured-error handler.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, RasterError> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("daub stamp shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stamp.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("daub draw uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(draw_uniform_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("daub stamp pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let limits = device.limits();
        let uniform_align = u64::from(limits.min_uniform_buffer_offset_alignment);

        let mut this = Self {
            format,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            uniform_align,
            max_stride: limits.max_vertex_buffer_array_stride,
        };
        this.ensure_pipeline(device, 2);

        shader_scope_result(pollster::block_on(scope.pop()))?;

        log::debug!("stamp rasterizer ready (format {format:?})");
        Ok(this)
    }

    /// Starts recording a frame.
    pub fn begin_frame<'a>(&'a mut self, ctx: &RenderCtx<'a>) -> RasterFrame<'a> {
        if ctx.surface_format != self.format {
            // Surface was reconfigured with a new format; pipelines are stale.
            log::debug!("surface format changed to {:?}; rebuilding pipelines", ctx.surface_format);
            self.format = ctx.surface_format;
            self.pipelines.clear();
        }

        RasterFrame {
            device: ctx.device,
            queue: ctx.queue,
            viewport: ctx.viewport,
            binding: self,
            state: RasterState::new(),
            buffers: Vec::new(),
            current_buffer: None,
            uniforms: Vec::new(),
            draws: Vec::new(),
            clear: None,
        }
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, components: u32) {
        if self.pipelines.contains_key(&components) {
            return;
        }

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("daub stamp pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[position_layout(components)],
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipelines.insert(components, pipeline);
    }
}

struct PendingDraw {
    components: u32,
    buffer: usize,
    vertex_count: u32,
    uniform_offset: u32,
}

/// One frame's worth of recorded draw calls.
pub struct RasterFrame<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    viewport: Viewport,
    binding: &'a mut GpuRasterizer,

    state: RasterState,
    /// Every buffer created this frame; dropped after submission.
    buffers: Vec<wgpu::Buffer>,
    current_buffer: Option<usize>,

    uniforms: Vec<u8>,
    draws: Vec<PendingDraw>,
    clear: Option<Rgba>,
}

impl RasterFrame<'_> {
    /// Number of draw calls recorded so far.
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    fn create_vertex_buffer(&mut self, floats: &[f32]) -> Option<usize> {
        if floats.is_empty() {
            return None;
        }
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("daub stamp vbo"),
            contents: bytemuck::cast_slice(floats),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.buffers.push(buffer);
        Some(self.buffers.len() - 1)
    }

    fn push_uniform(&mut self) -> u32 {
        let stride = align_to(std::mem::size_of::<DrawUniform>() as u64, self.binding.uniform_align);
        let offset = self.uniforms.len();
        self.uniforms.resize(offset + stride as usize, 0);
        let uniform = DrawUniform { color: self.state.fill.to_array() };
        let bytes = bytemuck::bytes_of(&uniform);
        self.uniforms[offset..offset + bytes.len()].copy_from_slice(bytes);
        offset as u32
    }

    fn record(&mut self, components: u32, buffer: usize, vertex_count: u32) {
        if vertex_count == 0 {
            return;
        }
        self.binding.ensure_pipeline(self.device, components);
        let uniform_offset = self.push_uniform();
        self.draws.push(PendingDraw { components, buffer, vertex_count, uniform_offset });
    }

    /// Builds a packed xy buffer from CPU-side positions.
    fn record_positions(&mut self, positions: &[Vec2]) {
        let floats: Vec<f32> = positions.iter().flat_map(|p| [p.x, p.y]).collect();
        if let Some(buffer) = self.create_vertex_buffer(&floats) {
            self.record(2, buffer, positions.len() as u32);
        }
    }

    /// Encodes the recorded frame into `target` as one render pass.
    pub fn finish(self, target: &mut RenderTarget<'_>) {
        let bind_group = if self.uniforms.is_empty() {
            None
        } else {
            let ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("daub draw uniforms"),
                size: self.uniforms.len() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.queue.write_buffer(&ubo, 0, &self.uniforms);

            Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("daub draw uniform bind group"),
                layout: &self.binding.bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &ubo,
                        offset: 0,
                        size: Some(draw_uniform_binding_size()),
                    }),
                }],
            }))
        };

        let load = match self.clear {
            Some(c) => wgpu::LoadOp::Clear(c.into()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("daub stamp pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(bind_group) = bind_group.as_ref() else { return };

        for draw in &self.draws {
            let Some(pipeline) = self.binding.pipelines.get(&draw.components) else {
                log::warn!("no pipeline for {}-component vertices; draw skipped", draw.components);
                continue;
            };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[draw.uniform_offset]);
            rpass.set_vertex_buffer(0, self.buffers[draw.buffer].slice(..));
            rpass.draw(0..draw.vertex_count, 0..1);
        }
    }
}

impl Rasterizer for RasterFrame<'_> {
    fn clear(&mut self, color: Rgba) {
        // A clear discards everything drawn before it in this frame.
        self.clear = Some(color);
        self.draws.clear();
        self.uniforms.clear();
    }

    fn set_point_attribute(&mut self, x: f32, y: f32, z: f32) {
        self.state.set_point_attribute(x, y, z);
    }

    fn upload_vertex_buffer(&mut self, floats: &[f32]) {
        self.state.upload(floats);
        self.current_buffer = self.create_vertex_buffer(floats);
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
        let quads: Vec<Vec2> = self
            .state
            .vertices(count)
            .into_iter()
            .filter_map(|p| point_quad(p, self.state.point_size, self.viewport))
            .flatten()
            .collect();
        self.record_positions(&quads);
    }

    fn draw_triangles(&mut self, count: u32) {
        // Triangles only make sense in whole groups of three.
        let count = count - count % 3;
        match self.state.source() {
            // Every vertex identical: zero-area triangles, nothing to rasterize.
            VertexSource::Constant(_) => {}
            VertexSource::Array { components } if bindable_stride(components, self.binding.max_stride) => {
                let available = self.state.available_vertices().unwrap_or(0);
                let n = count.min(available - available % 3);
                if let Some(buffer) = self.current_buffer {
                    self.record(components, buffer, n);
                }
            }
            // No xy pair, or a stride the device rejects: repack as xy.
            VertexSource::Array { .. } => {
                let positions = self.state.vertices(count);
                let whole = positions.len() - positions.len() % 3;
                self.record_positions(&positions[..whole]);
            }
        }
    }
}
