//! Coordinate and geometry types.
//!
//! Shape geometry lives in normalized device coordinates:
//! - `[-1, 1]` on both axes
//! - origin at the canvas centre
//! - +X right, +Y up
//!
//! Window input arrives in physical pixels (origin top-left, +Y down) and is
//! converted once, through [`Viewport::to_ndc`].

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
