pub(crate) mod circle;
pub(crate) mod point;
pub(crate) mod triangle;

pub use circle::CircleShape;
pub use point::PointShape;
pub use triangle::TriangleShape;
