//! Daub engine crate.
//!
//! Owns the platform + GPU runtime pieces and the painting core: the shape
//! model, the display list and the rasterizer binding that replays it.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod brush;
pub mod session;
