use std::fmt;

use crate::coords::Vec2;

/// Keys the painter understands.
///
/// Anything else arrives as `Key::Unknown` carrying the platform code, so
/// bindings can still be matched by code if needed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    BracketLeft,
    BracketRight,
    Minus,
    Equal,

    Shift,
    Control,
    Alt,
    Meta,

    // Brush and colour letters
    B,
    C,
    G,
    P,
    R,
    T,

    // Brush shortcuts
    Digit1,
    Digit2,
    Digit3,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "key#{code}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Held modifier keys.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, meta: false };
}

/// Scroll amount, either in lines (notched wheels) or pixels (touchpads).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical movement in lines; pixel deltas count one line per 40 px.
    pub fn lines_y(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / 40.0,
        }
    }
}

/// Pointer moved; `position` is in physical pixels, origin top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub position: Vec2,
}

/// Button press or release at the last known pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub position: Vec2,
    pub modifiers: Modifiers,
}

impl PointerButtonEvent {
    #[inline]
    pub fn is_primary_press(&self) -> bool {
        self.button == MouseButton::Left && self.state == MouseButtonState::Pressed
    }

    #[inline]
    pub fn is_primary_release(&self) -> bool {
        self.button == MouseButton::Left && self.state == MouseButtonState::Released
    }
}

/// Window-system independent input events, in the order the platform
/// delivered them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Platform scan code, 0 when unavailable.
        code: u32,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    PointerLeft,

    Focused(bool),
}
