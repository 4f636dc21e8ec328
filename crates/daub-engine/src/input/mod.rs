//! Input subsystem.
//!
//! Events, held state and per-frame deltas in pixel coordinates, free of
//! window-system types. `platform::winit` does the translation.

mod frame;
mod state;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent,
};
