use super::types::InputEvent;

/// Everything that happened since the previous redraw, in arrival order.
///
/// Order matters for painting: a press, three moves and a release must stamp
/// in exactly that sequence.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
