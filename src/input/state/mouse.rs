use crate::draw::{ObjectRole, Point, Scene, Shape, create_object};
use crate::input::brush::{BrushProfile, PathBuilder, PointSink, SymmetrySink};
use crate::input::tool::Tool;

use super::{Commit, DrawingState, InputState};

/// Extra hit-test slack around objects for the select tool, in pixels.
const SELECT_TOLERANCE: f64 = 4.0;

impl InputState {
    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Brush tools: start a new stroke with the current brush profile
    /// - Line/rectangle/circle: add a zero-size preview anchored at the pointer
    /// - Polygon: add a vertex (and marker, and a preview once 3 vertices exist)
    /// - Select: pick up the top-most content object under the pointer
    pub fn on_pointer_down(&mut self, scene: &mut Scene, point: Point) {
        if !point.is_finite() {
            log::warn!("Ignoring pointer down at non-finite position {:?}", point);
            return;
        }
        if self.is_gesture_active() {
            log::debug!("Pointer down during active gesture; ignoring");
            return;
        }

        match self.current_tool {
            Tool::Brush(kind) => {
                let profile = BrushProfile::for_brush(
                    kind,
                    self.current_color,
                    self.current_width,
                    self.background,
                );
                let mut sink = SymmetrySink::new(
                    PathBuilder::new(profile.decimate),
                    self.symmetry,
                    scene.width(),
                    scene.height(),
                );
                sink.consume(point);
                self.state = DrawingState::Brushing { profile, sink };
            }
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                let Some(shape) = self.current_tool.drag_shape() else {
                    return;
                };
                let preview = scene.add_object(create_object(
                    Shape::from_drag(shape, point, point),
                    self.shape_style(),
                    ObjectRole::Preview,
                ));
                self.state = DrawingState::Dragging {
                    shape,
                    anchor: point,
                    preview,
                };
            }
            Tool::Polygon => self.add_polygon_vertex(scene, point),
            Tool::Select => {
                let hit = scene
                    .top_hit(point, SELECT_TOLERANCE)
                    .and_then(|id| scene.get(id).map(|obj| (id, obj.shape.clone())));
                if let Some((object, original)) = hit {
                    self.state = DrawingState::Moving {
                        object,
                        origin: point,
                        last: point,
                        original,
                    };
                }
            }
        }
        self.needs_redraw = true;
    }

    /// Processes pointer motion while the pointer may be held down.
    pub fn on_pointer_move(&mut self, scene: &mut Scene, point: Point) {
        if !point.is_finite() {
            log::warn!("Ignoring pointer move to non-finite position {:?}", point);
            return;
        }
        match &mut self.state {
            DrawingState::Idle => return,
            DrawingState::Brushing { sink, .. } => sink.consume(point),
            DrawingState::Dragging {
                shape,
                anchor,
                preview,
            } => {
                let geometry = Shape::from_drag(*shape, *anchor, point);
                scene.modify(*preview, |obj| obj.shape = geometry);
            }
            DrawingState::Moving { object, last, .. } => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                if dx != 0.0 || dy != 0.0 {
                    scene.modify(*object, |obj| obj.shape.translate(dx, dy));
                    *last = point;
                }
            }
        }
        self.needs_redraw = true;
    }

    /// Processes a pointer release and finalizes the gesture.
    ///
    /// Returns the committed change, if any. Brush strokes and drag shapes are
    /// always committed; a select gesture only when the object actually moved.
    pub fn on_pointer_up(&mut self, scene: &mut Scene, point: Point) -> Option<Commit> {
        if matches!(self.state, DrawingState::Idle) {
            return None;
        }
        if !point.is_finite() {
            log::warn!("Ignoring pointer up at non-finite position {:?}", point);
            return None;
        }
        self.on_pointer_move(scene, point);
        self.needs_redraw = true;

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => None,
            DrawingState::Brushing { profile, mut sink } => {
                sink.finish(point);
                let strands = sink.into_inner().into_strands();
                let id = scene.add_object(create_object(
                    Shape::Freehand { strands },
                    profile.style,
                    ObjectRole::Content,
                ));
                log::debug!("Committed {} stroke {}", self.current_tool, id);
                Some(Commit::Added(vec![id]))
            }
            DrawingState::Dragging { preview, .. } => {
                scene.promote(preview);
                Some(Commit::Added(self.add_with_mirrors(scene, preview)))
            }
            DrawingState::Moving {
                object,
                origin,
                last,
                ..
            } => (origin != last).then_some(Commit::Moved(object)),
        }
    }
}
