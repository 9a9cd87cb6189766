//! Configuration file handling for GeoScene.
//!
//! Supports JSON and TOML files, selected by extension. Every section has
//! defaults, so a file only needs to name the values it changes.
//!
//! Configuration is organized into sections:
//! - Render options (precision, stroke, point and label sizes)
//! - Viewport settings (widget size, wheel zoom parameters)
//! - Output settings (SVG formatting)

use std::path::{Path, PathBuf};

use geoscene_render::{RenderOptions, SvgOptions};
use geoscene_viewport::ZoomOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "geoscene";
/// File name of the default configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// Viewport widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Widget width in pixels
    pub pixel_width: f64,
    /// Widget height in pixels
    pub pixel_height: f64,
    /// Wheel zoom parameters
    pub zoom: ZoomOptions,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            pixel_width: 800.0,
            pixel_height: 800.0,
            zoom: ZoomOptions::default(),
        }
    }
}

/// SVG output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// One element per line
    pub pretty_svg: bool,
    /// Draw a white box behind labels
    pub label_background: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        let svg = SvgOptions::default();
        Self {
            pretty_svg: svg.pretty,
            label_background: svg.label_background,
        }
    }
}

impl OutputSettings {
    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            pretty: self.pretty_svg,
            label_background: self.label_background,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Conversion options
    pub render: RenderOptions,
    /// Viewport preferences
    pub viewport: ViewportSettings,
    /// Output preferences
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Platform config file location, e.g. `~/.config/geoscene/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".to_string()))
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Loads `path` when given; otherwise the platform default file.
    ///
    /// An explicit path must load cleanly. A missing or broken default file
    /// falls back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = match default_config_path() {
            Ok(p) => p,
            Err(e) => {
                warn!("{}, using defaults", e);
                return Ok(Self::default());
            }
        };
        if !default_path.exists() {
            debug!("No config at {}, using defaults", default_path.display());
            return Ok(Self::default());
        }
        match Self::load_from_file(&default_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    "Ignoring config at {}: {}, using defaults",
                    default_path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.render
            .validate()
            .map_err(|reason| ConfigError::InvalidSetting {
                key: "render".to_string(),
                reason,
            })?;

        let vp = &self.viewport;
        if !(vp.pixel_width.is_finite() && vp.pixel_width > 0.0) {
            return Err(ConfigError::out_of_range("viewport.pixel_width", vp.pixel_width));
        }
        if !(vp.pixel_height.is_finite() && vp.pixel_height > 0.0) {
            return Err(ConfigError::out_of_range("viewport.pixel_height", vp.pixel_height));
        }

        let zoom = &vp.zoom;
        if !(zoom.base.is_finite() && zoom.base > 0.0) {
            return Err(ConfigError::out_of_range("viewport.zoom.base", zoom.base));
        }
        if !zoom.scale.is_finite() {
            return Err(ConfigError::out_of_range("viewport.zoom.scale", zoom.scale));
        }
        if !(zoom.min_zoom > 0.0 && zoom.min_zoom <= zoom.max_zoom && zoom.max_zoom.is_finite()) {
            return Err(ConfigError::InvalidSetting {
                key: "viewport.zoom".to_string(),
                reason: format!(
                    "need 0 < min_zoom <= max_zoom, got {} and {}",
                    zoom.min_zoom, zoom.max_zoom
                ),
            });
        }

        Ok(())
    }
}
