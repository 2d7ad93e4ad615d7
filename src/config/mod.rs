//! Configuration file support for arto.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/arto/config.toml`. Settings include drawing defaults, canvas
//! size and background, guide appearance, history limits and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, GuideConfig, HistoryConfig};

use crate::draw::color::{BLUE, WHITE};
use crate::export::file::is_valid_template;
use crate::input::state::{MAX_WIDTH, MIN_WIDTH};
use crate::input::Tool;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted canvas edge in pixels.
const MAX_CANVAS_EDGE: u32 = 8192;

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "marker"
/// default_color = "#4f46e5"
/// default_width = 5.0
/// symmetry = "quad"
///
/// [canvas]
/// width = 1024
/// height = 768
/// background = "#ffffff"
///
/// [history]
/// max_entries = 100
///
/// [export]
/// format = "jpg"
/// quality = 0.9
/// filename_template = "artwork_%Y-%m-%d_%H%M%S"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool and style defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Surface size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Symmetry guide appearance
    #[serde(default)]
    pub guides: GuideConfig,

    /// Undo/redo limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// Image export preferences
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `drawing.default_width`: 1.0 - 100.0
    /// - `canvas.width` / `canvas.height`: 1 - 8192
    /// - `guides.width`: 0.5 - 10.0
    /// - `export.quality`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        if self.drawing.default_tool.parse::<Tool>().is_err() {
            log::warn!(
                "Invalid default_tool '{}', falling back to 'pencil'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = Tool::default().to_string();
        }

        if !self.drawing.default_width.is_finite() {
            log::warn!(
                "Invalid default_width {}, falling back to {:.1}",
                self.drawing.default_width,
                DrawingConfig::default().default_width
            );
            self.drawing.default_width = DrawingConfig::default().default_width;
        } else if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_width,
                MIN_WIDTH,
                MAX_WIDTH
            );
            self.drawing.default_width = self.drawing.default_width.clamp(MIN_WIDTH, MAX_WIDTH);
        }

        if !self.drawing.default_color.is_valid() {
            log::warn!(
                "Invalid default_color {:?}, falling back to '#4f46e5'",
                self.drawing.default_color
            );
            self.drawing.default_color = DrawingConfig::default().default_color;
        }

        for (name, edge) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=MAX_CANVAS_EDGE).contains(&*edge) {
                log::warn!(
                    "Invalid canvas {} {}, clamping to 1-{} range",
                    name,
                    edge,
                    MAX_CANVAS_EDGE
                );
                *edge = (*edge).clamp(1, MAX_CANVAS_EDGE);
            }
        }

        if !self.canvas.background.is_valid() {
            log::warn!(
                "Invalid canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::from(WHITE.to_hex().as_str());
        }

        if !self.guides.width.is_finite() {
            log::warn!("Invalid guide width {}, using 1.0", self.guides.width);
            self.guides.width = GuideConfig::default().width;
        } else if !(0.5..=10.0).contains(&self.guides.width) {
            log::warn!(
                "Invalid guide width {:.1}, clamping to 0.5-10.0 range",
                self.guides.width
            );
            self.guides.width = self.guides.width.clamp(0.5, 10.0);
        }

        if self.guides.dash.iter().any(|len| !len.is_finite() || *len < 0.0) {
            log::warn!("Invalid guide dash {:?}, using solid guides", self.guides.dash);
            self.guides.dash.clear();
        }

        if !self.guides.color.is_valid() {
            log::warn!("Invalid guide color {:?}, using blue", self.guides.color);
            self.guides.color = ColorSpec::from(BLUE.to_hex().as_str());
        }

        if !self.export.quality.is_finite() {
            log::warn!("Invalid export quality {}, falling back to 1.0", self.export.quality);
            self.export.quality = ExportConfig::default().quality;
        } else if !(0.0..=1.0).contains(&self.export.quality) {
            log::warn!(
                "Invalid export quality {:.2}, clamping to 0.0-1.0 range",
                self.export.quality
            );
            self.export.quality = self.export.quality.clamp(0.0, 1.0);
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to 'digital-artwork'");
            self.export.filename_template = ExportConfig::default().filename_template;
        } else if !is_valid_template(&self.export.filename_template) {
            log::warn!(
                "Invalid format specifier in filename_template '{}', falling back to 'digital-artwork'",
                self.export.filename_template
            );
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/arto/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("arto");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ImageFormat;
    use crate::symmetry::SymmetryMode;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.guides.dash, vec![5.0, 5.0]);
        assert_eq!(config.export.filename_template, "digital-artwork");
        assert_eq!(config.export.format, ImageFormat::Png);
        assert_eq!(config.history.max_entries, 0);
    }

    #[test]
    fn parses_sections() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            default_tool = "neon"
            default_color = [255, 0, 0]
            symmetry = "quad"

            [export]
            format = "jpg"
            quality = 0.5
            share_command = "tee /dev/null"
            "##,
        )
        .unwrap();
        assert_eq!(config.drawing.symmetry, SymmetryMode::Quad);
        assert_eq!(config.export.format, ImageFormat::Jpeg);
        assert_eq!(config.export.share_command.as_deref(), Some("tee /dev/null"));
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.default_width = 500.0;
        config.drawing.default_tool = "spray".into();
        config.canvas.width = 0;
        config.export.quality = 4.0;
        config.guides.dash = vec![-1.0];
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 100.0);
        assert_eq!(config.drawing.default_tool, "pencil");
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.export.quality, 1.0);
        assert!(config.guides.dash.is_empty());
    }

    #[test]
    fn validate_replaces_non_finite_numbers() {
        let mut config = Config::default();
        config.drawing.default_width = f64::NAN;
        config.guides.width = f64::INFINITY;
        config.export.quality = f64::NAN;
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.guides.width, 1.0);
        assert_eq!(config.export.quality, 1.0);
    }

    #[test]
    fn validate_rejects_bad_filename_template() {
        for template in ["art_100%", "art_%Q"] {
            let mut config = Config::default();
            config.export.filename_template = template.into();
            config.validate_and_clamp();
            assert_eq!(config.export.filename_template, "digital-artwork");
        }

        let mut config = Config::default();
        config.export.filename_template = "art_%Y-%m-%d".into();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "art_%Y-%m-%d");
    }

    #[test]
    fn nan_width_in_toml_falls_back_to_default() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing]\ndefault_width = nan\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_width, 5.0);
    }

    #[test]
    fn load_from_reads_and_validates() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas]\nwidth = 99999\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, MAX_CANVAS_EDGE);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("drawing"));
        assert!(schema.contains("export"));
    }
}
