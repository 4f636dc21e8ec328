//! Painting session: the display list plus the tool state that feeds it.
//!
//! Every pointer event is handled to completion: the stamped shape is
//! appended before the next event is looked at, and the session is marked
//! dirty so the owner redraws.

use crate::brush::{Brush, BrushSettings};
use crate::coords::Vec2;
use crate::paint::Rgba;
use crate::render::Rasterizer;
use crate::scene::DisplayList;

#[derive(Debug, Default)]
pub struct PaintSession {
    display_list: DisplayList,
    settings: BrushSettings,
    primary_held: bool,
    dirty: bool,
}

impl PaintSession {
    pub fn new(settings: BrushSettings) -> Self {
        Self {
            settings,
            // First frame must paint the background.
            dirty: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    #[inline]
    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.settings
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.settings.set_brush(brush);
    }

    #[inline]
    pub fn primary_held(&self) -> bool {
        self.primary_held
    }

    /// Primary button pressed at `ndc`: stamps once.
    pub fn pointer_down(&mut self, ndc: Vec2) {
        self.primary_held = true;
        self.stamp(ndc);
    }

    pub fn pointer_up(&mut self) {
        self.primary_held = false;
    }

    /// Pointer moved to `ndc`. Stamps only while the primary button is held.
    pub fn pointer_moved(&mut self, ndc: Vec2) {
        if self.primary_held {
            self.stamp(ndc);
        }
    }

    fn stamp(&mut self, ndc: Vec2) {
        if !ndc.is_finite() {
            log::warn!("ignoring non-finite pointer position {ndc:?}");
            return;
        }
        let shape = self.settings.stamp(ndc);
        log::trace!("stamp {} at ({:.3}, {:.3})", shape.kind(), ndc.x, ndc.y);
        self.display_list.push(shape);
        self.dirty = true;
    }

    /// Empties the display list.
    pub fn clear(&mut self) {
        log::debug!("clearing {} shapes", self.display_list.len());
        self.display_list.clear();
        self.dirty = true;
    }

    /// Full redraw: background, then every shape in order.
    pub fn render(&self, raster: &mut dyn Rasterizer, background: Rgba) {
        self.display_list.render_all(raster, background);
    }

    /// Returns whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingRasterizer};
    use crate::scene::Shape;

    fn session() -> PaintSession {
        PaintSession::new(BrushSettings::default())
    }

    #[test]
    fn new_session_is_empty_and_dirty() {
        let mut s = session();
        assert!(s.display_list().is_empty());
        assert!(s.take_dirty());
        assert!(!s.take_dirty());
    }

    #[test]
    fn press_stamps_one_shape() {
        let mut s = session();
        s.pointer_down(Vec2::new(0.1, 0.1));
        assert_eq!(s.display_list().len(), 1);
        assert!(s.primary_held());
    }

    #[test]
    fn move_without_button_is_ignored() {
        let mut s = session();
        s.take_dirty();
        s.pointer_moved(Vec2::new(0.5, 0.5));
        assert!(s.display_list().is_empty());
        assert!(!s.take_dirty());
    }

    #[test]
    fn drag_stamps_each_move() {
        let mut s = session();
        s.pointer_down(Vec2::zero());
        s.pointer_moved(Vec2::new(0.1, 0.0));
        s.pointer_moved(Vec2::new(0.2, 0.0));
        s.pointer_up();
        s.pointer_moved(Vec2::new(0.3, 0.0));
        assert_eq!(s.display_list().len(), 3);
    }

    #[test]
    fn brush_change_applies_to_next_stamp_only() {
        let mut s = session();
        s.pointer_down(Vec2::zero());
        s.pointer_up();
        s.set_brush(Brush::Circle);
        s.pointer_down(Vec2::zero());

        let kinds: Vec<_> = s.display_list().iter().map(Shape::kind).collect();
        assert_eq!(kinds, ["point", "circle"]);
    }

    #[test]
    fn non_finite_position_is_dropped() {
        let mut s = session();
        s.pointer_down(Vec2::new(f32::NAN, 0.0));
        assert!(s.display_list().is_empty());
    }

    #[test]
    fn clear_then_render_is_background_only() {
        let mut s = session();
        s.pointer_down(Vec2::zero());
        s.clear();

        let mut rec = RecordingRasterizer::new();
        s.render(&mut rec, Rgba::BLACK);
        assert_eq!(rec.ops(), &[DrawOp::Clear(Rgba::BLACK)]);
        assert!(s.take_dirty());
    }
}
