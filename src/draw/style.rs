//! Immutable style descriptors attached to every scene object.

use super::color::{BLACK, Color};
use serde::{Deserialize, Serialize};

/// How stroke ends are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// How stroke segments are joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Compositing mode used when the object is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Composite {
    /// Paint over whatever is below (source-over).
    #[default]
    Over,
    /// Remove previously painted content (destination-out).
    Erase,
}

/// Soft glow drawn behind a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: Color,
    /// Blur radius in pixels
    pub blur: f64,
}

/// Stroke and fill parameters for a drawable object.
///
/// Styles are plain values: building a new object copies the descriptor, so
/// changing the editor's current color never reaches already committed shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f64,
    /// Interior fill, `None` for outline-only shapes
    #[serde(default)]
    pub fill: Option<Color>,
    /// Object opacity applied on top of the color alpha (0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    #[serde(default)]
    pub glow: Option<Glow>,
    /// Dash pattern (on/off lengths); empty means a solid line
    #[serde(default)]
    pub dash: Vec<f64>,
    #[serde(default)]
    pub composite: Composite,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::outline(BLACK, 1.0)
    }
}

impl StrokeStyle {
    /// Solid round-capped outline of the given color and width.
    pub fn outline(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            fill: None,
            opacity: 1.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            glow: None,
            dash: Vec::new(),
            composite: Composite::Over,
        }
    }

    /// Style for parametric shapes: miter joins, optional fill in the stroke color.
    pub fn shape(color: Color, width: f64, filled: bool) -> Self {
        Self {
            fill: filled.then_some(color),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Self::outline(color, width)
        }
    }

    /// Returns a copy with a dash pattern applied.
    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dash = pattern.to_vec();
        self
    }

    /// Stroke color with opacity folded into its alpha channel.
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha(self.color.a * self.opacity)
    }

    /// Fill color with opacity folded into its alpha channel.
    pub fn effective_fill(&self) -> Option<Color> {
        self.fill.map(|fill| fill.with_alpha(fill.a * self.opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    #[test]
    fn shape_style_fills_only_when_requested() {
        assert_eq!(StrokeStyle::shape(RED, 2.0, true).fill, Some(RED));
        assert_eq!(StrokeStyle::shape(RED, 2.0, false).fill, None);
    }

    #[test]
    fn opacity_folds_into_alpha() {
        let style = StrokeStyle {
            opacity: 0.3,
            ..StrokeStyle::outline(RED, 4.0)
        };
        assert!((style.effective_color().a - 0.3).abs() < f64::EPSILON);
    }
}
