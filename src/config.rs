use log::{Level, LevelFilter};

/// Knobs for a renderer and the logger it reports through.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub clear_color: [f32; 4],
    pub min_client_version: i32,
    pub log_tag: &'static str,
    pub log_level: LevelFilter,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            min_client_version: 3,
            log_tag: "TRIANGLE-LIB",
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Trace
            } else {
                LevelFilter::Info
            },
        }
    }
}

impl RendererConfig {
    pub fn with_clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    pub fn with_min_client_version(mut self, version: i32) -> Self {
        self.min_client_version = version;
        self
    }

    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.log_tag = tag;
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Level to install the platform logger at, or `None` when logging is
    /// switched off and no logger should be installed.
    pub fn logger_level(&self) -> Option<Level> {
        self.log_level.to_level()
    }
}
