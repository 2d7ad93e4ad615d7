//! Shape geometry for drawable objects.

use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Builds bounds from min/max corners.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            left: min_x.min(max_x),
            top: min_y.min(max_y),
            width: (max_x - min_x).abs(),
            height: (max_y - min_y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Grows the box evenly in all directions.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Parametric shape tools that are defined by an anchor and the current pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragShape {
    Line,
    Rectangle,
    Circle,
}

/// Geometry of a drawable object.
///
/// Every variant owns its coordinates; mirrored copies embed a value copy of
/// their source, so editing the original later never moves its mirrors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Freehand brush path. The first strand is the drawn path; additional
    /// strands hold points mirrored live while the stroke was being drawn.
    Freehand { strands: Vec<Vec<Point>> },
    /// Straight line segment
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Rectangle with a normalized (non-negative) size
    Rect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    /// Circle given by center and radius
    Circle { cx: f64, cy: f64, radius: f64 },
    /// Closed polygon through the given vertices
    Polygon { points: Vec<Point> },
    /// Reflection of another shape across the surface center lines
    Mirrored {
        source: Box<Shape>,
        flip_x: bool,
        flip_y: bool,
        center_x: f64,
        center_y: f64,
    },
}

impl Shape {
    /// Computes live geometry for a drag from `anchor` to `current`.
    ///
    /// Rectangles normalize negative extents by moving the anchor; circles are
    /// centered between the two points with half their distance as radius.
    pub fn from_drag(kind: DragShape, anchor: Point, current: Point) -> Self {
        match kind {
            DragShape::Line => Shape::Line {
                x1: anchor.x,
                y1: anchor.y,
                x2: current.x,
                y2: current.y,
            },
            DragShape::Rectangle => {
                let bounds = Bounds::from_min_max(anchor.x, anchor.y, current.x, current.y);
                Shape::Rect {
                    left: bounds.left,
                    top: bounds.top,
                    width: bounds.width,
                    height: bounds.height,
                }
            }
            DragShape::Circle => {
                let center = anchor.midpoint(current);
                Shape::Circle {
                    cx: center.x,
                    cy: center.y,
                    radius: anchor.distance(current) / 2.0,
                }
            }
        }
    }

    /// Returns the geometric bounding box (stroke width not included).
    ///
    /// Returns `None` for shapes without any points.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Shape::Freehand { strands } => bounds_for_points(strands.iter().flatten()),
            Shape::Polygon { points } => bounds_for_points(points.iter()),
            Shape::Line { x1, y1, x2, y2 } => Some(Bounds::from_min_max(*x1, *y1, *x2, *y2)),
            Shape::Rect {
                left,
                top,
                width,
                height,
            } => Some(Bounds {
                left: *left,
                top: *top,
                width: *width,
                height: *height,
            }),
            Shape::Circle { cx, cy, radius } => Some(Bounds {
                left: cx - radius,
                top: cy - radius,
                width: radius * 2.0,
                height: radius * 2.0,
            }),
            Shape::Mirrored {
                source,
                flip_x,
                flip_y,
                center_x,
                center_y,
            } => {
                let mut bounds = source.bounds()?;
                if *flip_x {
                    bounds.left = 2.0 * center_x - bounds.left - bounds.width;
                }
                if *flip_y {
                    bounds.top = 2.0 * center_y - bounds.top - bounds.height;
                }
                Some(bounds)
            }
        }
    }

    /// Moves the shape by the given offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Freehand { strands } => {
                for point in strands.iter_mut().flatten() {
                    point.x += dx;
                    point.y += dy;
                }
            }
            Shape::Polygon { points } => {
                for point in points.iter_mut() {
                    point.x += dx;
                    point.y += dy;
                }
            }
            Shape::Line { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Shape::Rect { left, top, .. } => {
                *left += dx;
                *top += dy;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Mirrored {
                source,
                flip_x,
                flip_y,
                ..
            } => {
                // Moving the reflection moves the embedded source the opposite way on flipped axes.
                let sdx = if *flip_x { -dx } else { dx };
                let sdy = if *flip_y { -dy } else { dy };
                source.translate(sdx, sdy);
            }
        }
    }

    /// Returns true when `point` lies within the shape's bounds grown by `padding`.
    pub fn hit_test(&self, point: Point, padding: f64) -> bool {
        self.bounds()
            .map(|bounds| bounds.inflate(padding).contains(point))
            .unwrap_or(false)
    }

    /// Returns true when the shape encloses an area that can be filled.
    pub fn is_closed(&self) -> bool {
        match self {
            Shape::Rect { .. } | Shape::Circle { .. } | Shape::Polygon { .. } => true,
            Shape::Freehand { .. } | Shape::Line { .. } => false,
            Shape::Mirrored { source, .. } => source.is_closed(),
        }
    }
}

fn bounds_for_points<'a>(mut points: impl Iterator<Item = &'a Point>) -> Option<Bounds> {
    let first = points.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(Bounds::from_min_max(min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_drag_normalizes_negative_extent() {
        let shape = Shape::from_drag(
            DragShape::Rectangle,
            Point::new(50.0, 60.0),
            Point::new(20.0, 100.0),
        );
        assert_eq!(
            shape,
            Shape::Rect {
                left: 20.0,
                top: 60.0,
                width: 30.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn circle_drag_uses_half_distance_and_midpoint() {
        let shape = Shape::from_drag(
            DragShape::Circle,
            Point::new(0.0, 0.0),
            Point::new(60.0, 80.0),
        );
        assert_eq!(
            shape,
            Shape::Circle {
                cx: 30.0,
                cy: 40.0,
                radius: 50.0
            }
        );
        let bounds = shape.bounds().expect("circle has bounds");
        assert_eq!((bounds.left, bounds.top), (-20.0, -10.0));
    }

    #[test]
    fn freehand_bounds_cover_every_strand() {
        let shape = Shape::Freehand {
            strands: vec![
                vec![Point::new(10.0, 10.0), Point::new(20.0, 15.0)],
                vec![Point::new(10.0, 190.0), Point::new(20.0, 185.0)],
            ],
        };
        let bounds = shape.bounds().expect("freehand has bounds");
        assert_eq!(bounds.top, 10.0);
        assert_eq!(bounds.bottom(), 190.0);
        assert!(Shape::Freehand { strands: vec![] }.bounds().is_none());
    }

    #[test]
    fn mirrored_bounds_reflect_across_center() {
        let shape = Shape::Mirrored {
            source: Box::new(Shape::Rect {
                left: 10.0,
                top: 10.0,
                width: 20.0,
                height: 20.0,
            }),
            flip_x: false,
            flip_y: true,
            center_x: 100.0,
            center_y: 100.0,
        };
        let bounds = shape.bounds().expect("mirrored rect has bounds");
        assert_eq!(bounds.top, 170.0);
        assert_eq!(bounds.left, 10.0);
        assert_eq!((bounds.width, bounds.height), (20.0, 20.0));
    }

    #[test]
    fn translating_a_mirror_moves_its_visible_position() {
        let mut shape = Shape::Mirrored {
            source: Box::new(Shape::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 0.0,
            }),
            flip_x: true,
            flip_y: false,
            center_x: 50.0,
            center_y: 50.0,
        };
        let before = shape.bounds().unwrap();
        shape.translate(5.0, 3.0);
        let after = shape.bounds().unwrap();
        assert_eq!(after.left - before.left, 5.0);
        assert_eq!(after.top - before.top, 3.0);
    }

    #[test]
    fn hit_test_respects_padding() {
        let line = Shape::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 100.0,
            y2: 0.0,
        };
        assert!(line.hit_test(Point::new(50.0, 3.0), 4.0));
        assert!(!line.hit_test(Point::new(50.0, 10.0), 4.0));
    }
}
