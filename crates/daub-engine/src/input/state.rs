use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers};

/// What the winit translation needs to remember between events: the last
/// pointer position and the held modifiers.
///
/// Every applied event is also appended to the [`InputFrame`] that the next
/// redraw consumes.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Physical pixels; `None` while the pointer is outside the window.
    pub pointer: Option<Vec2>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::PointerMoved(m) => self.pointer = Some(m.position),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::Key { modifiers, .. } | InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }
            InputEvent::PointerButton(b) => {
                self.pointer = Some(b.position);
                self.modifiers = b.modifiers;
            }
            InputEvent::Focused(_) => {}
        }

        frame.push_event(ev);
    }
}
