//! Sidebar configuration system
//!
//! Loads transition timings and item styling from `sidebar.toml`, with
//! environment variables as overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SidebarConfig {
    /// Transition timings
    pub animation: AnimationConfig,
    /// Dim/highlight styling of top bar items
    pub items: ItemStyleConfig,
    /// Headless demo settings
    pub demo: DemoConfig,
}

/// Transition timings, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Item slide/fade during enter, and item dim/highlight/resume
    pub item_duration_ms: u32,
    /// Shadow line fade-in during enter
    pub shadow_line_duration_ms: u32,
    /// Delay before the shadow line appears
    pub shadow_line_delay_ms: u32,
    /// Background fade-in during enter
    pub background_duration_ms: u32,
    /// Delay before the background appears
    pub background_delay_ms: u32,
    /// Whole-surface slide/fade during exit
    pub exit_duration_ms: u32,
}

/// Item styling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStyleConfig {
    /// Opacity of a dimmed item icon
    pub dim_alpha: f32,
    /// Scale of the highlighted item icon
    pub highlight_scale: f32,
    /// Opacity of the shade drawn over a dimmed spacer
    pub shade_alpha: f32,
}

/// Headless demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated frame interval
    pub frame_ms: f32,
    /// Height of the simulated top bar surface
    pub surface_height: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            item_duration_ms: 200,
            shadow_line_duration_ms: 30,
            shadow_line_delay_ms: 170,
            background_duration_ms: 200,
            background_delay_ms: 120,
            exit_duration_ms: 200,
        }
    }
}

impl Default for ItemStyleConfig {
    fn default() -> Self {
        Self {
            dim_alpha: 0.4,
            highlight_scale: 1.1,
            shade_alpha: 0.6,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16.0,
            surface_height: 120.0,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

impl SidebarConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `sidebar.toml` from the current directory, or defaults if it is
    /// missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file("sidebar.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Some(ms) = env_parse("SIDEBAR_ITEM_DURATION_MS") {
            self.animation.item_duration_ms = ms;
        }
        if let Some(ms) = env_parse("SIDEBAR_EXIT_DURATION_MS") {
            self.animation.exit_duration_ms = ms;
        }
        if let Some(alpha) = env_parse::<f32>("SIDEBAR_DIM_ALPHA") {
            self.items.dim_alpha = alpha.clamp(0.0, 1.0);
        }
        if let Some(ms) = env_parse("SIDEBAR_FRAME_MS") {
            self.demo.frame_ms = ms;
        }
        if let Some(height) = env_parse("SIDEBAR_SURFACE_HEIGHT") {
            self.demo.surface_height = height;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from sidebar.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
