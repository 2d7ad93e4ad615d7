//! Configuration enum types.

use crate::draw::{Color, color::INDIGO};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a hex string, a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color
/// default_color = "#4f46e5"
///
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#rgb`, `#rrggbb`, `#rrggbbaa` or a named color: red, green, blue,
    /// yellow, orange, pink, white, black, indigo
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unparsable strings fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => Color::parse(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using {}", name, fallback.to_hex());
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Converts the color specification, falling back to the default pen color.
    pub fn to_color(&self) -> Color {
        self.to_color_or(INDIGO)
    }

    /// Returns true if the specification names a color that can be parsed.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => Color::parse(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        ColorSpec::Name(value.to_string())
    }
}
