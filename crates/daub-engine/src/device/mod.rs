//! GPU device and window surface.
//!
//! [`Gpu`] owns the wgpu device, queue and the surface bound to the canvas
//! window, and hands out one [`GpuFrame`] per redraw.

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
