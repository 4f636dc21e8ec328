//! Keyboard bindings for the brush controls.

use daub_engine::brush::Brush;
use daub_engine::input::{Key, Modifiers};
use daub_engine::paint::Rgba;
use daub_engine::session::PaintSession;

/// Size change per `[` / `]` press.
pub const SIZE_STEP: f32 = 5.0;
/// Smallest size the step controls go down to.
pub const MIN_STEP_SIZE: f32 = 1.0;
/// Channel change per `R` / `G` / `B` press.
pub const COLOR_STEP: f32 = 0.1;

/// What a key press did to the session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    /// Settings or canvas changed.
    Applied,
    /// Key has no binding.
    Ignored,
    /// Leave the studio.
    Quit,
}

#[derive(Debug, Copy, Clone)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// Applies one key press to `session`.
pub fn apply_key(session: &mut PaintSession, key: Key, modifiers: Modifiers) -> Control {
    match key {
        Key::Escape => return Control::Quit,

        Key::P | Key::Digit1 => session.set_brush(Brush::Point),
        Key::T | Key::Digit2 => session.set_brush(Brush::Triangle),
        Key::C | Key::Digit3 => session.set_brush(Brush::Circle),
        Key::Tab => {
            let next = session.settings().brush.next();
            session.set_brush(next);
        }

        Key::BracketLeft | Key::Minus => adjust_size(session, -SIZE_STEP),
        Key::BracketRight | Key::Equal => adjust_size(session, SIZE_STEP),

        Key::R => adjust_channel(session, Channel::Red, modifiers),
        Key::G => adjust_channel(session, Channel::Green, modifiers),
        Key::B => adjust_channel(session, Channel::Blue, modifiers),

        Key::ArrowUp => adjust_segments(session, 1),
        Key::ArrowDown => adjust_segments(session, -1),

        Key::Backspace | Key::Delete => session.clear(),

        _ => return Control::Ignored,
    }
    Control::Applied
}

/// Wheel scrolling nudges the size by one per line.
pub fn apply_wheel(session: &mut PaintSession, lines: f32) {
    if lines.is_finite() && lines != 0.0 {
        adjust_size(session, lines);
    }
}

fn adjust_size(session: &mut PaintSession, delta: f32) {
    let size = (session.settings().size + delta).max(MIN_STEP_SIZE);
    session.settings_mut().set_size(size);
}

fn adjust_channel(session: &mut PaintSession, channel: Channel, modifiers: Modifiers) {
    let step = if modifiers.shift { -COLOR_STEP } else { COLOR_STEP };
    let Rgba { r, g, b, a } = session.settings().color;
    let color = match channel {
        Channel::Red => Rgba::new(r + step, g, b, a),
        Channel::Green => Rgba::new(r, g + step, b, a),
        Channel::Blue => Rgba::new(r, g, b + step, a),
    };
    session.settings_mut().set_color(color);
}

fn adjust_segments(session: &mut PaintSession, delta: i32) {
    let segments = session.settings().segments.saturating_add_signed(delta);
    session.settings_mut().set_segments(segments);
}

#[cfg(test)]
mod tests {
    use super::*;
    use daub_engine::brush::{BrushSettings, MAX_SEGMENTS, MIN_SEGMENTS};
    use daub_engine::coords::Vec2;

    fn session() -> PaintSession {
        PaintSession::new(BrushSettings::default())
    }

    fn press(session: &mut PaintSession, key: Key) -> Control {
        apply_key(session, key, Modifiers::default())
    }

    // ── brush selection ─────────────────────────────────────────────────

    #[test]
    fn letters_and_digits_select_brush() {
        let mut s = session();
        assert_eq!(press(&mut s, Key::T), Control::Applied);
        assert_eq!(s.settings().brush, Brush::Triangle);
        press(&mut s, Key::Digit3);
        assert_eq!(s.settings().brush, Brush::Circle);
        press(&mut s, Key::P);
        assert_eq!(s.settings().brush, Brush::Point);
    }

    #[test]
    fn tab_cycles_brushes() {
        let mut s = session();
        press(&mut s, Key::Tab);
        assert_eq!(s.settings().brush, Brush::Triangle);
        press(&mut s, Key::Tab);
        press(&mut s, Key::Tab);
        assert_eq!(s.settings().brush, Brush::Point);
    }

    // ── size / colour / segments ────────────────────────────────────────

    #[test]
    fn brackets_step_size_and_floor_at_one() {
        let mut s = session();
        press(&mut s, Key::BracketRight);
        assert_eq!(s.settings().size, 15.0);
        for _ in 0..10 {
            press(&mut s, Key::BracketLeft);
        }
        assert_eq!(s.settings().size, 1.0);
    }

    #[test]
    fn shift_lowers_colour_channel() {
        let mut s = session();
        apply_key(&mut s, Key::R, Modifiers::SHIFT);
        let c = s.settings().color;
        assert!((c.r - 0.9).abs() < 1e-6);
        assert_eq!(c.g, 1.0);

        // Already at 1.0: raising clamps.
        press(&mut s, Key::G);
        assert_eq!(s.settings().color.g, 1.0);
    }

    #[test]
    fn arrows_step_segments_within_bounds() {
        let mut s = session();
        press(&mut s, Key::ArrowUp);
        assert_eq!(s.settings().segments, 11);

        s.settings_mut().set_segments(MIN_SEGMENTS);
        press(&mut s, Key::ArrowDown);
        assert_eq!(s.settings().segments, MIN_SEGMENTS);

        s.settings_mut().set_segments(MAX_SEGMENTS);
        press(&mut s, Key::ArrowUp);
        assert_eq!(s.settings().segments, MAX_SEGMENTS);
    }

    #[test]
    fn wheel_nudges_size() {
        let mut s = session();
        apply_wheel(&mut s, 2.0);
        assert_eq!(s.settings().size, 12.0);
        apply_wheel(&mut s, f32::NAN);
        assert_eq!(s.settings().size, 12.0);
    }

    // ── canvas / lifecycle ──────────────────────────────────────────────

    #[test]
    fn backspace_clears_canvas() {
        let mut s = session();
        s.pointer_down(Vec2::zero());
        s.pointer_up();
        assert_eq!(s.display_list().len(), 1);

        press(&mut s, Key::Backspace);
        assert!(s.display_list().is_empty());
    }

    #[test]
    fn escape_quits_and_unbound_keys_are_ignored() {
        let mut s = session();
        assert_eq!(press(&mut s, Key::Escape), Control::Quit);
        assert_eq!(press(&mut s, Key::Space), Control::Ignored);
        assert_eq!(*s.settings(), BrushSettings::default());
    }
}
