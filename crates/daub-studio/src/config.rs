use daub_engine::brush::BrushSettings;
use daub_engine::paint::Rgba;

/// Startup configuration for the studio window.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: f64,
    pub height: f64,
    /// Canvas colour behind every shape.
    pub background: Rgba,
    pub brush: BrushSettings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "daub".to_string(),
            width: 800.0,
            height: 800.0,
            background: Rgba::BLACK,
            brush: BrushSettings::default(),
        }
    }
}
