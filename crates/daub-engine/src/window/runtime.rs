use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::GpuRasterizer;

/// Canvas window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "daub".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
        }
    }
}

/// Requests an app can make from inside a frame callback.
///
/// They are applied once the callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw: bool,
    exit: bool,
}

impl RuntimeCtx {
    /// Schedules another full repaint even without new input.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the canvas window and drives `app` until the window closes or
    /// the app asks to exit.
    ///
    /// Frames are produced on demand: after input, after a resize, or when
    /// the app requests one. A GPU context that cannot be created ends the
    /// loop and is returned as the error.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState {
            config,
            gpu_init,
            app,
            canvas: None,
            fatal: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window together with the GPU surface that borrows it.
#[self_referencing]
struct CanvasSurface {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// The canvas window: surface, rasterizer and the redraw bookkeeping.
struct Canvas {
    surface: CanvasSurface,
    raster: GpuRasterizer,
    /// The next frame must repaint everything (first frame, resize, expose,
    /// surface reconfiguration).
    damaged: bool,
    /// A redraw was requested because of input, not by the window system.
    input_redraw: bool,
}

impl Canvas {
    /// Creates the window, the GPU context and the rasterizer. Either GPU
    /// step failing is fatal and comes back as the error.
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let surface = CanvasSurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let raster = surface
            .with_gpu(|gpu| GpuRasterizer::new(gpu.device(), gpu.surface_format()))
            .context("rasterizer initialization failed")?;

        Ok(Self {
            surface,
            raster,
            damaged: true,
            input_redraw: false,
        })
    }

    fn id(&self) -> WindowId {
        self.surface.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.surface.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.surface.with_gpu_mut(|gpu| gpu.resize(size));
        self.damaged = true;
        self.request_redraw();
    }

    /// Feeds an event into the input state. Returns whether it was input.
    fn record_input(&mut self, event: &WindowEvent) -> bool {
        self.surface.with_mut(|fields| match translate_window_event(fields.input_state, event) {
            Some(ev) => {
                fields.input_state.apply_event(fields.input_frame, ev);
                true
            }
            None => false,
        })
    }

    /// Runs one app frame and consumes the buffered input.
    fn redraw<A: CoreApp>(&mut self, app: &mut A) -> RuntimeCtx {
        // Redraws we did not ask for come from the window system (expose,
        // restore) and need the whole canvas.
        let damaged = self.damaged || !self.input_redraw;
        self.damaged = false;
        self.input_redraw = false;

        let mut runtime = RuntimeCtx::default();
        let raster = &mut self.raster;

        self.surface.with_mut(|fields| {
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: fields.window.id(),
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    raster,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    damaged,
                    runtime: &mut runtime,
                };
                app.on_frame(&mut ctx)
            };

            if control == AppControl::Exit {
                runtime.exit();
            }
            fields.input_frame.clear();
        });

        runtime
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    canvas: Option<Canvas>,
    fatal: Option<anyhow::Error>,
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.canvas.is_some() {
            return;
        }

        match Canvas::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(canvas) => {
                log::info!("canvas window open");
                canvas.request_redraw();
                self.canvas = Some(canvas);
            }
            Err(e) => {
                log::error!("failed to open canvas: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if canvas.id() != window_id {
            return;
        }

        if canvas.record_input(&event) {
            canvas.input_redraw = true;
            canvas.request_redraw();
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.canvas = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => canvas.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = canvas.surface.with_window(|w| w.inner_size());
                canvas.resize(size);
            }

            WindowEvent::RedrawRequested => {
                let runtime = canvas.redraw(&mut self.app);
                if runtime.exit {
                    event_loop.exit();
                } else if runtime.redraw {
                    canvas.damaged = true;
                    canvas.request_redraw();
                }
            }

            _ => {}
        }
    }
}
