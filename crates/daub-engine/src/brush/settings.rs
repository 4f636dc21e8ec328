use std::fmt;

use crate::coords::Vec2;
use crate::paint::Rgba;
use crate::scene::{CircleShape, PointShape, Shape, TriangleShape};

pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 360;

/// Which shape a stamp produces.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Brush {
    #[default]
    Point,
    Triangle,
    Circle,
}

impl Brush {
    pub const ALL: [Brush; 3] = [Brush::Point, Brush::Triangle, Brush::Circle];

    /// Cycles Point → Triangle → Circle → Point.
    pub fn next(self) -> Self {
        match self {
            Brush::Point => Brush::Triangle,
            Brush::Triangle => Brush::Circle,
            Brush::Circle => Brush::Point,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Brush::Point => "point",
            Brush::Triangle => "triangle",
            Brush::Circle => "circle",
        }
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current tool parameters. Persist until changed.
///
/// Setters clamp into the ranges the shapes expect; fields stay public for
/// callers that already hold validated values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BrushSettings {
    pub brush: Brush,
    /// Point diameter in pixels; also scales triangles and circles
    /// (`size / 200` NDC).
    pub size: f32,
    pub color: Rgba,
    /// Circle tessellation density.
    pub segments: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            brush: Brush::Point,
            size: 10.0,
            color: Rgba::WHITE,
            segments: 10,
        }
    }
}

impl BrushSettings {
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Any positive finite size is accepted; anything else keeps the current
    /// size.
    pub fn set_size(&mut self, size: f32) {
        if size.is_finite() && size > 0.0 {
            self.size = size;
        } else {
            log::debug!("rejecting brush size {size}");
        }
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color.clamped();
    }

    pub fn set_segments(&mut self, segments: u32) {
        self.segments = segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
    }

    /// Builds the shape the current brush stamps at `at` (NDC).
    pub fn stamp(&self, at: Vec2) -> Shape {
        match self.brush {
            Brush::Point => PointShape::new(at, self.size, self.color).into(),
            Brush::Triangle => TriangleShape::stamp(at, self.size, self.color).into(),
            Brush::Circle => {
                CircleShape::new(at, self.size / 200.0, self.segments, self.size, self.color).into()
            }
        }
    }
}

impl fmt::Display for BrushSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba { r, g, b, .. } = self.color;
        write!(f, "{} size {:.0} rgb({r:.1}, {g:.1}, {b:.1})", self.brush, self.size)?;
        if self.brush == Brush::Circle {
            write!(f, " segments {}", self.segments)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_controls() {
        let s = BrushSettings::default();
        assert_eq!(s.brush, Brush::Point);
        assert_eq!(s.size, 10.0);
        assert_eq!(s.segments, 10);
    }

    #[test]
    fn brush_cycle_visits_all() {
        let mut b = Brush::Point;
        for expected in [Brush::Triangle, Brush::Circle, Brush::Point] {
            b = b.next();
            assert_eq!(b, expected);
        }
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn segments_are_clamped() {
        let mut s = BrushSettings::default();
        s.set_segments(1);
        assert_eq!(s.segments, MIN_SEGMENTS);
        s.set_segments(10_000);
        assert_eq!(s.segments, MAX_SEGMENTS);
    }

    #[test]
    fn size_accepts_any_positive_value() {
        let mut s = BrushSettings::default();
        s.set_size(0.25);
        assert_eq!(s.size, 0.25);
        s.set_size(25.0);
        assert_eq!(s.size, 25.0);
    }

    #[test]
    fn invalid_size_keeps_current() {
        let mut s = BrushSettings::default();
        for bad in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            s.set_size(bad);
            assert_eq!(s.size, 10.0);
        }
    }

    #[test]
    fn color_is_clamped() {
        let mut s = BrushSettings::default();
        s.set_color(Rgba::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(s.color, Rgba::new(1.0, 0.0, 0.5, 1.0));
    }

    // ── stamp ─────────────────────────────────────────────────────────────

    #[test]
    fn stamps_point() {
        let s = BrushSettings { color: Rgba::RED, ..Default::default() };
        assert_eq!(
            s.stamp(Vec2::new(0.1, 0.2)),
            Shape::Point(PointShape::new(Vec2::new(0.1, 0.2), 10.0, Rgba::RED))
        );
    }

    #[test]
    fn stamps_triangle_scaled_by_size() {
        let s = BrushSettings { brush: Brush::Triangle, size: 40.0, ..Default::default() };
        let Shape::Triangle(t) = s.stamp(Vec2::zero()) else { panic!("expected triangle") };
        assert_eq!(t.vertices[0], Vec2::new(0.0, 0.2));
        assert_eq!(t.size, 40.0);
    }

    #[test]
    fn stamps_circle_with_radius_from_size() {
        let s = BrushSettings { brush: Brush::Circle, size: 50.0, segments: 24, ..Default::default() };
        let Shape::Circle(c) = s.stamp(Vec2::new(0.5, 0.5)) else { panic!("expected circle") };
        assert_eq!(c.radius, 0.25);
        assert_eq!(c.segments, 24);
        assert_eq!(c.center, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn display_mentions_segments_only_for_circles() {
        let mut s = BrushSettings::default();
        assert!(!s.to_string().contains("segments"));
        s.set_brush(Brush::Circle);
        assert!(s.to_string().contains("segments 10"));
    }
}
