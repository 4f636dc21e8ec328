//! Rasterizer binding.
//!
//! Shapes emit themselves through the [`Rasterizer`] trait. Three
//! implementations are provided:
//! - [`GpuRasterizer`]: wgpu pipelines; records a frame and encodes one pass
//! - [`SoftRasterizer`]: CPU pixel buffer with the same coverage rules
//! - [`RecordingRasterizer`]: logs resolved draw calls
//!
//! Convention: all geometry is in normalized device coordinates; point sizes
//! are in physical pixels.

mod common;
mod ctx;
mod error;
mod gpu;
mod raster;
mod recording;
mod soft;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RasterError;
pub use gpu::{RasterFrame, GpuRasterizer};
pub use raster::{RasterState, Rasterizer, VertexSource};
pub use recording::{DrawOp, RecordingRasterizer};
pub use soft::SoftRasterizer;
