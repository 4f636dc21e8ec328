//! daub studio: click or drag to stamp points, triangles and circles.
//!
//! Keys: `P`/`T`/`C` (or `1`/`2`/`3`) pick the brush, `[`/`]` size,
//! `R`/`G`/`B` colour (Shift lowers), `Up`/`Down` circle segments,
//! `Backspace` clears, `Escape` quits.

mod app;
mod config;
mod controls;

use anyhow::Result;
use winit::dpi::LogicalSize;

use daub_engine::device::GpuInit;
use daub_engine::logging::{init_logging, LoggingConfig};
use daub_engine::window::{Runtime, RuntimeConfig};

use crate::app::PaintApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::default();
    log::info!("starting {} with {}", config.title, config.brush);

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.width, config.height),
    };

    Runtime::run(runtime, GpuInit::default(), PaintApp::new(&config))
}
