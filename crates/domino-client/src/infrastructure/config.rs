//! TOML-based configuration for the domino client.
//!
//! # Example file
//!
//! ```toml
//! [client]
//! log_level = "debug"
//!
//! [layout]
//! tile_width = 48.0
//! origin_x = 640.0
//! origin_y = 360.0
//! render_budget = 64
//!
//! [resolver]
//! tolerance = 40.0
//! ```
//!
//! # Serde default values
//!
//! Every field is annotated with `#[serde(default = "some_fn")]`, so an empty
//! or partial file is valid and a missing file behaves like an empty one.

use std::path::{Path, PathBuf};

use domino_core::{LayoutSettings, Point, RenderBudget};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::play_session::SessionSettings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but makes no sense.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: GeneralConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// General client behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Board geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Tile width in board pixels; tiles are twice as long.
    #[serde(default = "default_tile_width")]
    pub tile_width: f64,
    /// Board-space X of the origin tile's centre.
    #[serde(default = "default_origin")]
    pub origin_x: f64,
    /// Board-space Y of the origin tile's centre.
    #[serde(default = "default_origin")]
    pub origin_y: f64,
    /// Maximum tiles placed per layout pass.
    #[serde(default = "default_render_budget")]
    pub render_budget: usize,
}

/// Click hit-testing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfig {
    /// Maximum click distance from a tile centre.  Defaults to the tile width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_tile_width() -> f64 {
    domino_core::domain::layout::DEFAULT_TILE_WIDTH
}
fn default_origin() -> f64 {
    500.0
}
fn default_render_budget() -> usize {
    domino_core::domain::layout::DEFAULT_RENDER_BUDGET
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_width: default_tile_width(),
            origin_x: default_origin(),
            origin_y: default_origin(),
            render_budget: default_render_budget(),
        }
    }
}

impl ClientConfig {
    /// Checks values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.layout.tile_width.is_finite() && self.layout.tile_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.tile_width must be positive, got {}",
                self.layout.tile_width
            )));
        }
        if self.layout.render_budget == 0 {
            return Err(ConfigError::Invalid(
                "layout.render_budget must be at least 1".to_string(),
            ));
        }
        if let Some(tolerance) = self.resolver.tolerance {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "resolver.tolerance must be non-negative, got {tolerance}"
                )));
            }
        }
        Ok(())
    }

    /// Session parameters derived from this configuration.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            layout: LayoutSettings {
                tile_width: self.layout.tile_width,
                budget: RenderBudget {
                    max_tiles: self.layout.render_budget,
                },
            },
            origin: Point::new(self.layout.origin_x, self.layout.origin_y),
            tolerance: self.resolver.tolerance.unwrap_or(self.layout.tile_width),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `ClientConfig` from `path`, returning defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is unusable.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<ClientConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ClientConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
