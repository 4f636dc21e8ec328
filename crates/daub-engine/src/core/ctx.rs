use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{GpuRasterizer, Rasterizer, RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// The canvas window, as seen from a frame callback.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Drawable size in physical pixels.
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Physical-pixel viewport matching the pointer coordinates of
    /// [`InputEvent`](crate::input::InputEvent)s.
    pub fn viewport(&self) -> Viewport {
        let size = self.physical_size();
        Viewport::new(size.width as f32, size.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Everything one redraw gets: the window, the GPU, held input state and the
/// events buffered since the last redraw.
///
/// `'a` spans the callback; `'w` is the window borrow inside `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window:       WindowCtx<'a>,
    pub gpu:          &'a mut Gpu<'w>,
    /// Built together with `gpu` when the window opened.
    pub raster:       &'a mut GpuRasterizer,
    pub input:        &'a InputState,
    pub input_frame:  &'a InputFrame,
    /// The surface contents are stale (first frame, resize, expose) and the
    /// whole canvas must be painted even if nothing changed.
    pub damaged:      bool,
    pub runtime:      &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the next surface texture, calls `draw` with a ready
    /// [`RenderCtx`] and [`RenderTarget`], then presents the frame.
    ///
    /// `draw` owns the clear: nothing is written to the target beforehand.
    /// A lost or outdated surface skips the frame and schedules another one.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        present(self.gpu, &self.window, self.runtime, draw)
    }

    /// Like [`render`](Self::render), with `draw` recording into the
    /// window's [`GpuRasterizer`] for this frame.
    pub fn paint<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut dyn Rasterizer),
    {
        let raster = &mut *self.raster;
        present(self.gpu, &self.window, self.runtime, |rctx, target| {
            let mut frame = raster.begin_frame(rctx);
            draw(&mut frame);
            frame.finish(target);
        })
    }
}

fn present<F>(gpu: &mut Gpu<'_>, window: &WindowCtx<'_>, runtime: &mut RuntimeCtx, draw: F) -> AppControl
where
    F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
{
    let mut frame = match gpu.begin_frame() {
        Ok(f) => f,
        Err(err) => {
            return match gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => AppControl::Exit,
                SurfaceErrorAction::Reconfigured => {
                    runtime.request_redraw();
                    AppControl::Continue
                }
                SurfaceErrorAction::SkipFrame => AppControl::Continue,
            };
        }
    };

    let size = gpu.size();
    let rctx = RenderCtx::new(
        gpu.device(),
        gpu.queue(),
        gpu.surface_format(),
        Viewport::new(size.width as f32, size.height as f32),
    );

    // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
    {
        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        draw(&rctx, &mut target);
    }

    window.window.pre_present_notify();
    gpu.submit(frame);

    AppControl::Continue
}
