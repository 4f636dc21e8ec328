//! Shared GPU types and geometry helpers for the wgpu binding.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};

// ── uniforms ──────────────────────────────────────────────────────────────

/// Per-draw uniform block (fill colour).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct DrawUniform {
    pub color: [f32; 4],
}

pub(super) fn draw_uniform_binding_size() -> std::num::NonZeroU64 {
    // 16 bytes; `NonZeroU64::MIN` keeps this total without unwrapping.
    std::num::NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64)
        .unwrap_or(std::num::NonZeroU64::MIN)
}

/// Rounds `size` up to the next multiple of `align` (a power of two).
#[inline]
pub(super) fn align_to(size: u64, align: u64) -> u64 {
    let align = align.max(1);
    size.div_ceil(align) * align
}

// ── vertex layout ─────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Position-only layout. `components` is the float count per vertex; extra
/// components past x/y are skipped by the stride.
pub(super) fn position_layout(components: u32) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: u64::from(components.max(2)) * std::mem::size_of::<f32>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

/// Whether a buffer with `components` floats per vertex can be bound as is.
///
/// Fewer than two floats carries no xy pair, and strides past the device
/// limit fail pipeline validation; both are repacked on the CPU instead.
pub(super) fn bindable_stride(components: u32, max_stride: u32) -> bool {
    components >= 2
        && u64::from(components) * std::mem::size_of::<f32>() as u64 <= u64::from(max_stride)
}

/// Maps the outcome of a validation error scope onto the init error taxonomy.
pub(super) fn shader_scope_result(error: Option<wgpu::Error>) -> Result<(), super::RasterError> {
    match error {
        None => Ok(()),
        Some(err) => Err(super::RasterError::ShaderCompileError(err.to_string())),
    }
}

// ── point sprites ─────────────────────────────────────────────────────────

/// Expands a point into the square a GL point of `size_px` covers, as two
/// triangles in NDC.
///
/// Returns `None` for non-positive or non-finite sizes.
pub(super) fn point_quad(center: Vec2, size_px: f32, viewport: Viewport) -> Option<[Vec2; 6]> {
    if !(size_px.is_finite() && size_px > 0.0) || !center.is_finite() {
        return None;
    }
    let px = viewport.ndc_per_pixel();
    let hx = size_px * px.x / 2.0;
    let hy = size_px * px.y / 2.0;

    let bl = Vec2::new(center.x - hx, center.y - hy);
    let br = Vec2::new(center.x + hx, center.y - hy);
    let tr = Vec2::new(center.x + hx, center.y + hy);
    let tl = Vec2::new(center.x - hx, center.y + hy);
    Some([bl, br, tr, bl, tr, tl])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up() {
        assert_eq!(align_to(16, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(0, 256), 0);
    }

    #[test]
    fn stride_follows_components() {
        assert_eq!(position_layout(2).array_stride, 8);
        assert_eq!(position_layout(3).array_stride, 12);
    }

    #[test]
    fn strides_past_the_device_limit_are_not_bound() {
        // downlevel WebGL2 allows 255 bytes per vertex.
        assert!(bindable_stride(2, 255));
        assert!(bindable_stride(63, 255));
        assert!(!bindable_stride(64, 255));
        assert!(!bindable_stride(u32::MAX, 255));
        assert!(!bindable_stride(1, 255));
        assert!(!bindable_stride(0, 255));
    }

    #[test]
    fn validation_error_becomes_shader_compile_error() {
        assert_eq!(shader_scope_result(None), Ok(()));

        let err = wgpu::Error::Validation {
            source: Box::new(std::fmt::Error),
            description: "unknown identifier `colr`".to_string(),
        };
        let Err(super::super::RasterError::ShaderCompileError(msg)) = shader_scope_result(Some(err))
        else {
            panic!("expected a shader compile error");
        };
        assert!(msg.contains("colr"));
    }

    #[test]
    fn point_quad_spans_size_in_pixels() {
        let vp = Viewport::new(200.0, 100.0);
        let quad = point_quad(Vec2::zero(), 10.0, vp).unwrap();
        // 10 px of 200 px is 0.1 NDC wide; of 100 px is 0.2 NDC tall.
        assert!((quad[2].x - quad[0].x - 0.1).abs() < 1e-6);
        assert!((quad[2].y - quad[0].y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn point_quad_rejects_bad_sizes() {
        let vp = Viewport::new(100.0, 100.0);
        assert!(point_quad(Vec2::zero(), 0.0, vp).is_none());
        assert!(point_quad(Vec2::zero(), -3.0, vp).is_none());
        assert!(point_quad(Vec2::zero(), f32::NAN, vp).is_none());
    }
}
