//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::export::ImageFormat;
use crate::symmetry::SymmetryMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and style state the editor starts with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial tool: pencil, marker, watercolor, neon, pixel, eraser, line,
    /// rectangle, circle, polygon or select
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Initial stroke color - hex string, named color or `[r, g, b]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial brush width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Fill closed shapes (rectangle, circle, polygon) with the stroke color
    #[serde(default)]
    pub fill_shapes: bool,

    /// Initial symmetry mode: none, horizontal, vertical or quad
    #[serde(default)]
    pub symmetry: SymmetryMode,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_width: default_width(),
            fill_shapes: false,
            symmetry: SymmetryMode::None,
        }
    }
}

/// Drawing surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Surface height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Background fill color
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Appearance of the symmetry guide lines.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideConfig {
    #[serde(default = "default_guide_color")]
    pub color: ColorSpec,

    /// Line width in pixels (valid range: 0.5 - 10.0)
    #[serde(default = "default_guide_width")]
    pub width: f64,

    /// Dash pattern as on/off lengths; empty for solid lines
    #[serde(default = "default_guide_dash")]
    pub dash: Vec<f64>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            color: default_guide_color(),
            width: default_guide_width(),
            dash: default_guide_dash(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots (0 = unlimited)
    #[serde(default)]
    pub max_entries: usize,
}

/// Image export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Default image format: png or jpg
    #[serde(default)]
    pub format: ImageFormat,

    /// JPEG quality factor (valid range: 0.0 - 1.0)
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Download filename without extension (supports chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Directory downloads are written to (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Command that receives the PNG on stdin when sharing; sharing is
    /// unavailable when unset
    #[serde(default)]
    pub share_command: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            quality: default_quality(),
            filename_template: default_filename_template(),
            save_directory: default_save_directory(),
            share_command: None,
        }
    }
}

fn default_tool() -> String {
    "pencil".to_string()
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#4f46e5".to_string())
}

fn default_width() -> f64 {
    5.0
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_guide_color() -> ColorSpec {
    ColorSpec::Name("#3b82f6".to_string())
}

fn default_guide_width() -> f64 {
    1.0
}

fn default_guide_dash() -> Vec<f64> {
    vec![5.0, 5.0]
}

fn default_quality() -> f64 {
    1.0
}

fn default_filename_template() -> String {
    "digital-artwork".to_string()
}

fn default_save_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("Arto").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Pictures/Arto".to_string())
}
