use crate::draw::{Color, ObjectRole, Point, Scene, Shape, StrokeStyle, WHITE, create_object};
use crate::input::tool::Tool;

use super::{Commit, InputState};

/// Radius of the vertex marker circles.
const MARKER_RADIUS: f64 = 3.0;

/// Vertex marker fill (#ff4081).
const MARKER_FILL: Color = Color {
    r: 1.0,
    g: 64.0 / 255.0,
    b: 129.0 / 255.0,
    a: 1.0,
};

impl InputState {
    /// Adds a polygon vertex at `point` together with its marker.
    ///
    /// Once three or more vertices exist a preview polygon is shown.
    pub(crate) fn add_polygon_vertex(&mut self, scene: &mut Scene, point: Point) {
        self.polygon.vertices.push(point);

        let marker_style = StrokeStyle {
            fill: Some(MARKER_FILL),
            ..StrokeStyle::outline(WHITE, 1.0)
        };
        let marker = scene.add_object(create_object(
            Shape::Circle {
                cx: point.x,
                cy: point.y,
                radius: MARKER_RADIUS,
            },
            marker_style,
            ObjectRole::Marker,
        ));
        self.polygon.markers.push(marker);

        if self.polygon.vertices.len() < 3 {
            return;
        }
        let shape = Shape::Polygon {
            points: self.polygon.vertices.clone(),
        };
        match self.polygon.preview {
            Some(preview) => {
                scene.modify(preview, |obj| obj.shape = shape);
            }
            None => {
                self.polygon.preview = Some(scene.add_object(create_object(
                    shape,
                    self.shape_style(),
                    ObjectRole::Preview,
                )));
            }
        }
    }

    /// Processes a double-click.
    ///
    /// With the polygon tool and at least three vertices, the polygon is
    /// committed (plus symmetry clones) and the builder reset. With fewer
    /// vertices nothing happens and the in-progress polygon is kept.
    pub fn on_double_click(&mut self, scene: &mut Scene, _point: Point) -> Option<Commit> {
        if self.current_tool != Tool::Polygon {
            return None;
        }
        if self.polygon.vertices.len() < 3 {
            log::debug!(
                "Polygon needs at least 3 vertices, have {}",
                self.polygon.vertices.len()
            );
            return None;
        }

        let points = self.polygon.vertices.clone();
        self.abandon_polygon(scene);

        let id = scene.add_object(create_object(
            Shape::Polygon { points },
            self.shape_style(),
            ObjectRole::Content,
        ));
        self.needs_redraw = true;
        Some(Commit::Added(self.add_with_mirrors(scene, id)))
    }
}
