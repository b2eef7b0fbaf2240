use std::time::Duration;

use crate::render::animator::FloatConfig;
use crate::render::camera::CameraConfig;
use crate::render::layout::SpiralConfig;

/// Top-level viewer settings.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Collection table: a path relative to the working directory, or an http(s) URL
    pub source: String,
    /// Initial window size in logical pixels
    pub window_size: [f32; 2],
    /// Info panel fade-in
    pub panel_fade: Duration,
    pub spiral: SpiralConfig,
    pub camera: CameraConfig,
    pub float: FloatConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: String::from("records.csv"),
            window_size: [1280.0, 800.0],
            panel_fade: Duration::from_millis(300),
            spiral: SpiralConfig::default(),
            camera: CameraConfig::default(),
            float: FloatConfig::default(),
        }
    }
}
