//! Drawing tool selection.

use crate::draw::DragShape;
use std::fmt;
use std::str::FromStr;

/// Freehand brush variants. They differ only in the stroke style derived
/// before the stroke starts (see [`super::BrushProfile`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    /// Thin base-width line with tight point decimation
    Pencil,
    /// Wider line with looser decimation
    Marker,
    /// Wide translucent line with soft joins
    Watercolor,
    /// Line with a glow in the stroke color
    Neon,
    /// Width snapped to multiples of 5 with heavy decimation
    Pixel,
    /// Removes paint (destination-out)
    Eraser,
}

/// Drawing tool selection.
///
/// The active tool determines what a pointer gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tool {
    /// Freehand drawing with one of the brush variants
    Brush(BrushKind),
    /// Straight line from anchor to pointer
    Line,
    /// Rectangle from corner to corner
    Rectangle,
    /// Circle inscribed between anchor and pointer
    Circle,
    /// Polygon built click by click, finished by double-click
    Polygon,
    /// Pick up and move existing objects
    Select,
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Brush(BrushKind::Pencil)
    }
}

impl Tool {
    /// Returns the parametric shape drawn by drag tools.
    pub fn drag_shape(self) -> Option<DragShape> {
        match self {
            Tool::Line => Some(DragShape::Line),
            Tool::Rectangle => Some(DragShape::Rectangle),
            Tool::Circle => Some(DragShape::Circle),
            _ => None,
        }
    }

    /// Whether pointer gestures with this tool create new objects.
    pub fn is_drawing(self) -> bool {
        self != Tool::Select
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Brush(BrushKind::Pencil) => "pencil",
            Tool::Brush(BrushKind::Marker) => "marker",
            Tool::Brush(BrushKind::Watercolor) => "watercolor",
            Tool::Brush(BrushKind::Neon) => "neon",
            Tool::Brush(BrushKind::Pixel) => "pixel",
            Tool::Brush(BrushKind::Eraser) => "eraser",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Polygon => "polygon",
            Tool::Select => "select",
        };
        f.write_str(name)
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tool = match s.trim().to_lowercase().as_str() {
            "pencil" | "pen" => Tool::Brush(BrushKind::Pencil),
            "marker" => Tool::Brush(BrushKind::Marker),
            "watercolor" => Tool::Brush(BrushKind::Watercolor),
            "neon" => Tool::Brush(BrushKind::Neon),
            "pixel" | "pixelated" => Tool::Brush(BrushKind::Pixel),
            "eraser" => Tool::Brush(BrushKind::Eraser),
            "line" => Tool::Line,
            "rectangle" | "rect" => Tool::Rectangle,
            "circle" => Tool::Circle,
            "polygon" => Tool::Polygon,
            "select" => Tool::Select,
            other => return Err(format!("unknown tool '{other}'")),
        };
        Ok(tool)
    }
}

impl TryFrom<String> for Tool {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_display() {
        for tool in [
            Tool::Brush(BrushKind::Pixel),
            Tool::Brush(BrushKind::Eraser),
            Tool::Rectangle,
            Tool::Select,
        ] {
            assert_eq!(tool.to_string().parse::<Tool>(), Ok(tool));
        }
    }

    #[test]
    fn aliases_and_unknown_names() {
        assert_eq!("Rect".parse::<Tool>(), Ok(Tool::Rectangle));
        assert_eq!("pixelated".parse::<Tool>(), Ok(Tool::Brush(BrushKind::Pixel)));
        assert!("spray".parse::<Tool>().is_err());
    }

    #[test]
    fn only_drag_tools_have_drag_shapes() {
        assert_eq!(Tool::Circle.drag_shape(), Some(DragShape::Circle));
        assert_eq!(Tool::Polygon.drag_shape(), None);
        assert!(!Tool::Select.is_drawing());
    }
}
