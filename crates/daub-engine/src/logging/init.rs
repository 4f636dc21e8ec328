use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "daub_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted,
/// then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    /// Caps the wgpu/naga crates, which are very chatty at `info`.
    pub gpu_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            gpu_level: log::LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const GPU_MODULES: [&str; 4] = ["wgpu_core", "wgpu_hal", "wgpu", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`, before the window
/// runtime starts.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(config.default_level);
        for module in GPU_MODULES {
            builder.filter_module(module, config.gpu_level);
        }

        // Explicit filters win over the defaults above.
        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            // Another logger was installed by the host; keep it.
            return;
        }

        log::debug!("logging initialized");
    });
}
