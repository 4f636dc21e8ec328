use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Returned from every callback; `Exit` closes the window and ends the loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// What the runtime drives.
///
/// Input arrives already translated in [`FrameCtx::input_frame`]; the raw
/// window event hook is for the rare case that needs winit data directly.
pub trait App {
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// One redraw. Redraws follow input, resizes and
    /// [`RuntimeCtx::request_redraw`](crate::window::RuntimeCtx::request_redraw).
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
