//! Symmetry engine: mirror modes, guide lines and mirrored clones.

use crate::draw::{ObjectRole, Point, Scene, Shape, StrokeStyle, create_object};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mirror symmetry mode of the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SymmetryMode {
    #[default]
    None,
    /// Mirror across the horizontal center line (y = height / 2)
    Horizontal,
    /// Mirror across the vertical center line (x = width / 2)
    Vertical,
    /// Mirror across both center lines
    Quad,
}

impl SymmetryMode {
    pub fn is_active(self) -> bool {
        self != SymmetryMode::None
    }

    fn mirrors_y(self) -> bool {
        matches!(self, SymmetryMode::Horizontal | SymmetryMode::Quad)
    }

    fn mirrors_x(self) -> bool {
        matches!(self, SymmetryMode::Vertical | SymmetryMode::Quad)
    }

    /// `(flip_x, flip_y)` for each clone this mode produces, in strand order.
    fn flips(self) -> &'static [(bool, bool)] {
        match self {
            SymmetryMode::None => &[],
            SymmetryMode::Horizontal => &[(false, true)],
            SymmetryMode::Vertical => &[(true, false)],
            SymmetryMode::Quad => &[(false, true), (true, false), (true, true)],
        }
    }
}

impl fmt::Display for SymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymmetryMode::None => "none",
            SymmetryMode::Horizontal => "horizontal",
            SymmetryMode::Vertical => "vertical",
            SymmetryMode::Quad => "quad",
        };
        f.write_str(name)
    }
}

impl FromStr for SymmetryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(SymmetryMode::None),
            "horizontal" => Ok(SymmetryMode::Horizontal),
            "vertical" => Ok(SymmetryMode::Vertical),
            "quad" | "both" => Ok(SymmetryMode::Quad),
            other => Err(format!("unknown symmetry mode '{other}'")),
        }
    }
}

/// Replaces the scene's guide lines with the ones for `mode`.
///
/// Guides are tagged [`ObjectRole::Guide`], added last so they paint above
/// content, and are never selectable.
pub fn apply_guides(scene: &mut Scene, mode: SymmetryMode, style: &StrokeStyle) {
    scene.remove_role(ObjectRole::Guide);

    let width = f64::from(scene.width());
    let height = f64::from(scene.height());
    let (cx, cy) = scene.center();

    if mode.mirrors_y() {
        scene.add_object(create_object(
            Shape::Line {
                x1: 0.0,
                y1: cy,
                x2: width,
                y2: cy,
            },
            style.clone(),
            ObjectRole::Guide,
        ));
    }
    if mode.mirrors_x() {
        scene.add_object(create_object(
            Shape::Line {
                x1: cx,
                y1: 0.0,
                x2: cx,
                y2: height,
            },
            style.clone(),
            ObjectRole::Guide,
        ));
    }
}

/// Produces independent mirrored clones of a committed shape.
///
/// Returns no clones for [`SymmetryMode::None`], one for horizontal or
/// vertical and three for quad (vertical flip, horizontal flip, both).
pub fn mirror(shape: &Shape, mode: SymmetryMode, width: u32, height: u32) -> Vec<Shape> {
    let center_x = f64::from(width) / 2.0;
    let center_y = f64::from(height) / 2.0;
    mode.flips()
        .iter()
        .map(|&(flip_x, flip_y)| Shape::Mirrored {
            source: Box::new(shape.clone()),
            flip_x,
            flip_y,
            center_x,
            center_y,
        })
        .collect()
}

/// Inline list of up to 3 mirrored points (no heap allocation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MirroredPoints {
    data: [Point; 3],
    len: usize,
}

impl MirroredPoints {
    pub fn as_slice(&self) -> &[Point] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Mirrors a single point for live brush strokes.
///
/// The original point is not included. Index `i` of the result belongs to
/// strand `i + 1` of the live path.
pub fn mirror_point(point: Point, mode: SymmetryMode, width: u32, height: u32) -> MirroredPoints {
    let w = f64::from(width);
    let h = f64::from(height);
    let mut out = MirroredPoints {
        data: [point; 3],
        len: 0,
    };
    for &(flip_x, flip_y) in mode.flips() {
        out.data[out.len] = Point::new(
            if flip_x { w - point.x } else { point.x },
            if flip_y { h - point.y } else { point.y },
        );
        out.len += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, WHITE};

    fn guide_style() -> StrokeStyle {
        StrokeStyle::outline(BLUE, 1.0).dashed(&[5.0, 5.0])
    }

    #[test]
    fn horizontal_mirror_of_rect_reflects_top() {
        let rect = Shape::Rect {
            left: 10.0,
            top: 10.0,
            width: 20.0,
            height: 20.0,
        };
        let clones = mirror(&rect, SymmetryMode::Horizontal, 200, 200);
        assert_eq!(clones.len(), 1);
        let bounds = clones[0].bounds().unwrap();
        assert_eq!(bounds.top, 170.0);
        assert_eq!(bounds.left, 10.0);
        assert_eq!((bounds.width, bounds.height), (20.0, 20.0));
    }

    #[test]
    fn quad_produces_three_clones() {
        let line = Shape::Line {
            x1: 10.0,
            y1: 10.0,
            x2: 30.0,
            y2: 20.0,
        };
        let clones = mirror(&line, SymmetryMode::Quad, 100, 100);
        assert_eq!(clones.len(), 3);
        let corner = clones[2].bounds().unwrap();
        assert_eq!((corner.left, corner.top), (70.0, 80.0));
        assert!(mirror(&line, SymmetryMode::None, 100, 100).is_empty());
    }

    #[test]
    fn mirror_point_matches_strand_order() {
        let mirrored = mirror_point(Point::new(10.0, 20.0), SymmetryMode::Quad, 100, 200);
        assert_eq!(
            mirrored.as_slice(),
            &[
                Point::new(10.0, 180.0),
                Point::new(90.0, 20.0),
                Point::new(90.0, 180.0)
            ]
        );
        assert!(mirror_point(Point::new(1.0, 1.0), SymmetryMode::None, 10, 10).is_empty());
    }

    #[test]
    fn guides_are_replaced_not_accumulated() {
        let mut scene = Scene::new(200, 100, WHITE);
        apply_guides(&mut scene, SymmetryMode::Quad, &guide_style());
        apply_guides(&mut scene, SymmetryMode::Quad, &guide_style());
        let guides: Vec<_> = scene
            .objects()
            .iter()
            .filter(|obj| obj.role == ObjectRole::Guide)
            .collect();
        assert_eq!(guides.len(), 2);
        assert!(guides.iter().all(|obj| !obj.is_selectable()));

        apply_guides(&mut scene, SymmetryMode::Vertical, &guide_style());
        assert_eq!(scene.objects().len(), 1);
        assert_eq!(
            scene.objects()[0].shape,
            Shape::Line {
                x1: 100.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0
            }
        );
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Quad".parse::<SymmetryMode>(), Ok(SymmetryMode::Quad));
        assert!("diagonal".parse::<SymmetryMode>().is_err());
        assert_eq!(SymmetryMode::Horizontal.to_string(), "horizontal");
    }
}
