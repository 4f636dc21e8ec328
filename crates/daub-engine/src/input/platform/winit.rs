//! winit → engine input translation.

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::coords::Vec2;
use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
};

/// Returns `None` for window events that carry no input.
///
/// Positions are left in physical pixels: the canvas is sized in physical
/// pixels too, so no scale factor is involved in the NDC mapping.
pub(crate) fn translate_window_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(map_modifiers(m.state())),
        WindowEvent::Focused(f) => InputEvent::Focused(*f),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => InputEvent::PointerMoved(PointerMoveEvent {
            position: Vec2::new(position.x as f32, position.y as f32),
        }),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            return button_event(state, map_mouse_button(*button), st);
        }

        WindowEvent::MouseWheel { delta, .. } => InputEvent::MouseWheel {
            delta: match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => MouseWheelDelta::Pixel { x: p.x as f32, y: p.y as f32 },
            },
            modifiers: state.modifiers,
        },

        WindowEvent::KeyboardInput { event, .. } => {
            let (key, code) = match event.physical_key {
                PhysicalKey::Code(code) => (map_key_code(code), code as u32),
                PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
            };
            InputEvent::Key {
                key,
                state: match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                },
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
            }
        }

        _ => return None,
    };
    Some(ev)
}

/// MouseInput carries no position, so the last CursorMoved supplies it.
///
/// A press with no known position is dropped. A release is always delivered
/// (its position is unused) so a drag that left the window still ends.
fn button_event(state: &InputState, button: MouseButton, st: MouseButtonState) -> Option<InputEvent> {
    let position = match (state.pointer, st) {
        (Some(p), _) => p,
        (None, MouseButtonState::Released) => Vec2::zero(),
        (None, MouseButtonState::Pressed) => {
            log::debug!("{button:?} pressed before any pointer position; ignored");
            return None;
        }
    };
    Some(InputEvent::PointerButton(PointerButtonEvent {
        button,
        state: st,
        position,
        modifiers: state.modifiers,
    }))
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

/// Physical key mapping, so bindings follow key position rather than layout.
fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
        KeyCode::Equal | KeyCode::NumpadAdd => Key::Equal,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyT => Key::T,

        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,

        other => Key::Unknown(other as u32),
    }
}
