use serde::Deserialize;

/// Rendering policy. The smoothing threshold and point sizing came out of
/// eyeballing real simulator dumps; they are knobs, not invariants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Trade count above which the scatter panel switches to a moving average.
    pub smooth_threshold: usize,
    /// window = max(n / window_divisor, min_window)
    pub window_divisor: usize,
    pub min_window: usize,
    /// Histogram display cutoff percentile. Statistics ignore it.
    pub clip_percentile: f64,
    pub histogram_bins: usize,
    /// Scatter point size = clamp(qty * scale, min, max).
    pub point_size_scale: f64,
    pub point_size_min: f64,
    pub point_size_max: f64,
    /// Output image dimensions in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            smooth_threshold: 5000,
            window_divisor: 500,
            min_window: 10,
            clip_percentile: 99.5,
            histogram_bins: 80,
            point_size_scale: 0.5,
            point_size_min: 2.0,
            point_size_max: 30.0,
            width: 1920,
            height: 640,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Load `<name>.{toml,yaml,json,...}` from the working directory. The file
/// is optional; every field falls back to its default.
pub fn load_config(name: &str) -> AppConfig {
    let loaded = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .build()
        .and_then(|c| c.try_deserialize());
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            // Runs before the tracing subscriber is installed.
            eprintln!("config '{name}' ignored ({e}); using defaults");
            AppConfig::default()
        }
    }
}
