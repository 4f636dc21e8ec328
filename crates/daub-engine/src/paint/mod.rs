//! Paint model: fill colours for stamped shapes.

pub mod color;

pub use color::Rgba;
