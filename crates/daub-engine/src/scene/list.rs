use crate::paint::Rgba;
use crate::render::Rasterizer;

use super::Shape;

/// Retained, append-only record of every shape stamped since the last clear.
///
/// Insertion order is paint order: later shapes draw on top.
///
/// Performance characteristics:
/// - `push()` is amortized O(1)
/// - `clear()` keeps the allocation for reuse
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DisplayList {
    shapes: Vec<Shape>,
}

impl DisplayList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape. No validation happens here.
    #[inline]
    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Removes every shape.
    #[inline]
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in paint order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Clears the target to `background`, then replays every shape in order.
    ///
    /// Takes `&self`: replaying never changes the list, so two calls with no
    /// mutation in between emit identical draw streams.
    pub fn render_all(&self, raster: &mut dyn Rasterizer, background: Rgba) {
        raster.clear(background);
        for shape in &self.shapes {
            shape.render(raster);
        }
        log::trace!("replayed {} shapes", self.shapes.len());
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::render::{DrawOp, RecordingRasterizer, SoftRasterizer};
    use crate::scene::{CircleShape, PointShape, TriangleShape};

    fn sample() -> DisplayList {
        let mut list = DisplayList::new();
        list.push_point(Vec2::new(-0.5, 0.5), 10.0, Rgba::RED);
        list.push(TriangleShape::stamp(Vec2::new(0.2, 0.2), 40.0, Rgba::BLUE));
        list.push_circle(Vec2::new(0.3, -0.3), 0.2, 16, 40.0, Rgba::GREEN);
        list
    }

    fn colors(ops: &[DrawOp]) -> Vec<Rgba> {
        ops.iter().map(DrawOp::color).collect()
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn starts_empty() {
        let list = DisplayList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn push_grows_by_one() {
        let mut list = sample();
        list.push(PointShape::new(Vec2::zero(), 1.0, Rgba::WHITE));
        assert_eq!(list.len(), 4);
        assert_eq!(list.shapes()[3].kind(), "point");
    }

    #[test]
    fn clear_empties() {
        let mut list = sample();
        list.clear();
        assert!(list.is_empty());
    }

    // ── render_all ────────────────────────────────────────────────────────

    #[test]
    fn empty_list_renders_only_clear() {
        let mut rec = RecordingRasterizer::new();
        DisplayList::new().render_all(&mut rec, Rgba::BLACK);
        assert_eq!(rec.ops(), &[DrawOp::Clear(Rgba::BLACK)]);
    }

    #[test]
    fn replays_in_insertion_order_after_clear() {
        let mut rec = RecordingRasterizer::new();
        sample().render_all(&mut rec, Rgba::BLACK);
        assert_eq!(
            colors(rec.ops()),
            vec![Rgba::BLACK, Rgba::RED, Rgba::BLUE, Rgba::GREEN]
        );
    }

    #[test]
    fn appended_shape_draws_last() {
        let mut list = sample();
        let mut rec = RecordingRasterizer::new();
        list.render_all(&mut rec, Rgba::BLACK);
        let before = rec.take_ops();

        let s = CircleShape::new(Vec2::zero(), 0.1, 3, 5.0, Rgba::WHITE);
        list.push(s);
        list.render_all(&mut rec, Rgba::BLACK);
        let after = rec.take_ops();

        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().map(DrawOp::color), Some(Rgba::WHITE));
    }

    #[test]
    fn render_all_is_idempotent() {
        let list = sample();
        let mut rec = RecordingRasterizer::new();
        list.render_all(&mut rec, Rgba::BLACK);
        let first = rec.take_ops();
        list.render_all(&mut rec, Rgba::BLACK);
        assert_eq!(rec.ops(), &first[..]);

        let mut soft = SoftRasterizer::new(64, 64);
        list.render_all(&mut soft, Rgba::BLACK);
        let pixels = soft.pixels().to_vec();
        list.render_all(&mut soft, Rgba::BLACK);
        assert_eq!(soft.pixels(), &pixels[..]);
    }

    #[test]
    fn later_shapes_cover_earlier_ones() {
        let mut list = DisplayList::new();
        list.push_point(Vec2::zero(), 8.0, Rgba::RED);
        list.push_point(Vec2::zero(), 8.0, Rgba::BLUE);

        let mut soft = SoftRasterizer::new(32, 32);
        list.render_all(&mut soft, Rgba::BLACK);
        assert_eq!(soft.pixel(16, 16), Some(Rgba::BLUE.to_u8()));
        assert_eq!(soft.count_pixels(Rgba::RED), 0);
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn red_point_at_centre() {
        let mut list = DisplayList::new();
        list.push_point(Vec2::new(0.0, 0.0), 10.0, Rgba::new(1.0, 0.0, 0.0, 1.0));

        let mut soft = SoftRasterizer::new(100, 100);
        list.render_all(&mut soft, Rgba::BLACK);

        assert_eq!(soft.count_pixels(Rgba::RED), 100);
        assert_eq!(soft.pixel(50, 50), Some(Rgba::RED.to_u8()));
        assert_eq!(soft.pixel(45, 45), Some(Rgba::RED.to_u8()));
        assert_eq!(soft.pixel(44, 50), Some(Rgba::BLACK.to_u8()));
        assert_eq!(soft.count_pixels(Rgba::BLACK), 100 * 100 - 100);
    }

    #[test]
    fn cleared_circle_leaves_background_only() {
        let mut list = DisplayList::new();
        list.push_circle(Vec2::zero(), 0.5, 32, 10.0, Rgba::new(0.0, 1.0, 0.0, 1.0));

        let mut soft = SoftRasterizer::new(64, 64);
        list.render_all(&mut soft, Rgba::BLACK);
        assert!(soft.count_pixels(Rgba::GREEN) > 0);

        list.clear();
        list.render_all(&mut soft, Rgba::BLACK);
        assert_eq!(soft.count_pixels(Rgba::GREEN), 0);
        assert_eq!(soft.count_pixels(Rgba::BLACK), 64 * 64);
    }
}
