//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::chart::AnimatorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_cache_ttl() -> u64 {
    5 * 60
}

impl ApiConfig {
    /// Versioned API root, e.g. `http://localhost:5000/api/v1`
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.base_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Dashboard shell configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Channel whose analysis feeds the stat cards
    pub channel_name: Option<String>,

    #[serde(default = "default_max_videos")]
    pub max_videos: u32,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_refresh_interval() -> u64 {
    5 * 60
}

fn default_max_videos() -> u32 {
    50
}

fn default_output_dir() -> String {
    "./pulseboard-out".to_string()
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            channel_name: None,
            max_videos: default_max_videos(),
            output_dir: default_output_dir(),
        }
    }
}

/// Animation tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_rate")]
    pub rate: f64,

    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Decay rate of the engagement progress bars
    #[serde(default = "default_engagement_rate")]
    pub engagement_rate: f64,

    /// Snap distance for bar heights (values are large)
    #[serde(default = "default_bar_epsilon")]
    pub bar_epsilon: f64,

    /// Snap distance for stat card values
    #[serde(default = "default_stat_epsilon")]
    pub stat_epsilon: f64,

    #[serde(default = "default_reveal_step")]
    pub reveal_step: f64,

    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

fn default_rate() -> f64 {
    0.1
}

fn default_epsilon() -> f64 {
    0.5
}

fn default_tick_ms() -> u64 {
    50
}

fn default_engagement_rate() -> f64 {
    0.08
}

fn default_bar_epsilon() -> f64 {
    1.0
}

fn default_stat_epsilon() -> f64 {
    0.1
}

fn default_reveal_step() -> f64 {
    0.02
}

fn default_frame_ms() -> u64 {
    16
}

impl AnimationConfig {
    fn with_epsilon(&self, epsilon: f64) -> AnimatorConfig {
        AnimatorConfig::new(self.rate, epsilon).with_tick(Duration::from_millis(self.tick_ms))
    }

    pub fn engagement(&self) -> AnimatorConfig {
        AnimatorConfig::new(self.engagement_rate, self.epsilon)
            .with_tick(Duration::from_millis(self.tick_ms))
    }

    pub fn values(&self) -> AnimatorConfig {
        self.with_epsilon(self.epsilon)
    }

    pub fn bars(&self) -> AnimatorConfig {
        self.with_epsilon(self.bar_epsilon)
    }

    pub fn stats(&self) -> AnimatorConfig {
        self.with_epsilon(self.stat_epsilon)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            epsilon: default_epsilon(),
            tick_ms: default_tick_ms(),
            engagement_rate: default_engagement_rate(),
            bar_epsilon: default_bar_epsilon(),
            stat_epsilon: default_stat_epsilon(),
            reveal_step: default_reveal_step(),
            frame_ms: default_frame_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would spin a timer or keep an animation from settling
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.dashboard.refresh_interval_secs == 0 {
            return invalid("dashboard.refresh_interval_secs", "must be at least 1");
        }

        let anim = &self.animation;
        for (field, rate) in [
            ("animation.rate", anim.rate),
            ("animation.engagement_rate", anim.engagement_rate),
            ("animation.reveal_step", anim.reveal_step),
        ] {
            if !(rate > 0.0 && rate <= 1.0) {
                return invalid(field, "must be in (0, 1]");
            }
        }
        for (field, epsilon) in [
            ("animation.epsilon", anim.epsilon),
            ("animation.bar_epsilon", anim.bar_epsilon),
            ("animation.stat_epsilon", anim.stat_epsilon),
        ] {
            if !(epsilon > 0.0 && epsilon.is_finite()) {
                return invalid(field, "must be positive");
            }
        }
        if anim.tick_ms == 0 {
            return invalid("animation.tick_ms", "must be at least 1");
        }
        if anim.frame_ms == 0 {
            return invalid("animation.frame_ms", "must be at least 1");
        }

        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            default_config_path(),
            Some(PathBuf::from("./pulseboard.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `PULSEBOARD_*` overrides read through `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PULSEBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("PULSEBOARD_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Some(refresh) = lookup("PULSEBOARD_REFRESH_SECS") {
            match refresh.parse::<u64>() {
                Ok(r) if r > 0 => self.dashboard.refresh_interval_secs = r,
                _ => {
                    tracing::warn!(value = %refresh, "Ignoring invalid PULSEBOARD_REFRESH_SECS")
                }
            }
        }

        if let Some(level) = lookup("PULSEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PULSEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// `<config dir>/pulseboard/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pulseboard").join("config.toml"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pulseboard Configuration
#
# Environment variables override these settings:
# - PULSEBOARD_API_URL
# - PULSEBOARD_API_TIMEOUT
# - PULSEBOARD_REFRESH_SECS
# - PULSEBOARD_LOG_LEVEL
# - PULSEBOARD_LOG_FORMAT

[api]
# Analytics backend root (the /api/v1 prefix is added automatically)
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 60

# How long cached analysis responses stay fresh (seconds)
cache_ttl_secs = 300

[dashboard]
# Background refresh interval (seconds)
refresh_interval_secs = 300

# Channel analysed for the stat cards
# channel_name = "mychannel"

# Videos considered per channel analysis
max_videos = 50

# Where `pulseboard render` writes SVG files
output_dir = "./pulseboard-out"

[animation]
# Fraction of the remaining distance covered per tick
rate = 0.1

# Snap distance for chart values
epsilon = 0.5

# Tick period (ms)
tick_ms = 50

# Decay rate of the engagement progress bars
engagement_rate = 0.08

# Snap distance for bar heights and stat cards
bar_epsilon = 1.0
stat_epsilon = 0.1

# Line reveal progress per frame, and frame period (ms)
reveal_step = 0.02
frame_ms = 16

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
