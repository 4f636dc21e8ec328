use crate::render::Rasterizer;
use crate::scene::shapes::{CircleShape, PointShape, TriangleShape};

/// A stamped shape.
///
/// Closed set of variants; each knows how to emit itself to a rasterizer.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and a match arm in [`Shape::render`]
/// - implement push helpers on `DisplayList` inside that shape module
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(PointShape),
    Triangle(TriangleShape),
    Circle(CircleShape),
}

impl Shape {
    /// Emits the shape's draw calls. Only `raster` is touched.
    pub fn render(&self, raster: &mut dyn Rasterizer) {
        match self {
            Shape::Point(p) => p.render(raster),
            Shape::Triangle(t) => t.render(raster),
            Shape::Circle(c) => c.render(raster),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Triangle(_) => "triangle",
            Shape::Circle(_) => "circle",
        }
    }
}

impl From<PointShape> for Shape {
    fn from(p: PointShape) -> Self {
        Shape::Point(p)
    }
}

impl From<TriangleShape> for Shape {
    fn from(t: TriangleShape) -> Self {
        Shape::Triangle(t)
    }
}

impl From<CircleShape> for Shape {
    fn from(c: CircleShape) -> Self {
        Shape::Circle(c)
    }
}
