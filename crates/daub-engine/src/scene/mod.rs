//! Scene: the shape model and the retained display list.
//!
//! Responsibilities:
//! - own each shape's geometry and appearance
//! - emit shapes to a [`Rasterizer`](crate::render::Rasterizer) in paint order
//! - keep shape-specific code isolated per file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::Shape;
pub use list::DisplayList;
pub use shapes::{CircleShape, PointShape, TriangleShape};
