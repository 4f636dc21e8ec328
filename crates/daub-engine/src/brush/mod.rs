//! Brush selection and per-stamp parameters.
//!
//! This is the contract between the input layer and the painting core:
//! whatever widget drives it, it hands over a brush, size, colour and segment
//! count, and gets back a fully formed [`Shape`](crate::scene::Shape).

mod settings;

pub use settings::{Brush, BrushSettings, MAX_SEGMENTS, MIN_SEGMENTS};
