//! Tool controller state machine and style state.

use crate::draw::{Color, DragShape, ObjectId, ObjectRole, Point, Scene, Shape, StrokeStyle};
use crate::input::brush::{BrushProfile, PathBuilder, SymmetrySink};
use crate::input::tool::Tool;
use crate::symmetry::SymmetryMode;

/// Smallest brush width in pixels.
pub const MIN_WIDTH: f64 = 1.0;
/// Largest brush width in pixels.
pub const MAX_WIDTH: f64 = 100.0;

/// Current gesture of the tool controller.
///
/// Transitions happen on pointer events; switching tools always returns to
/// [`DrawingState::Idle`] without committing anything.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for pointer input
    Idle,
    /// Freehand stroke in progress (pointer held down)
    Brushing {
        /// Style and sampling captured when the stroke started
        profile: BrushProfile,
        /// Path builder, decorated with live symmetry
        sink: SymmetrySink<PathBuilder>,
    },
    /// Line, rectangle or circle drag in progress
    Dragging {
        shape: DragShape,
        /// Where the pointer went down
        anchor: Point,
        /// Live preview object in the scene
        preview: ObjectId,
    },
    /// Select tool is moving an object
    Moving {
        object: ObjectId,
        /// Pointer position when the object was picked up
        origin: Point,
        /// Last pointer position applied to the object
        last: Point,
        /// Geometry before the move, restored on cancel
        original: Shape,
    },
}

/// Vertices and scene helpers of a polygon under construction.
#[derive(Debug, Default)]
pub struct PolygonBuilder {
    pub vertices: Vec<Point>,
    /// Preview polygon, present once three vertices exist
    pub preview: Option<ObjectId>,
    /// One marker circle per vertex
    pub markers: Vec<ObjectId>,
}

impl PolygonBuilder {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Result of a gesture that changed committed artwork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// New content objects (the shape plus its symmetry clones)
    Added(Vec<ObjectId>),
    /// An existing object was moved with the select tool
    Moved(ObjectId),
}

/// Tool controller: style state plus the pointer-gesture state machine.
///
/// All scene mutations go through the `&mut Scene` passed to each event
/// handler; the controller itself only remembers ids of transient objects.
#[derive(Debug)]
pub struct InputState {
    /// Active tool
    pub current_tool: Tool,
    /// Current stroke color
    pub current_color: Color,
    /// Current brush/stroke width in pixels
    pub current_width: f64,
    /// Whether closed shapes are filled with the stroke color
    pub fill_shapes: bool,
    /// Active mirror mode
    pub symmetry: SymmetryMode,
    /// Canvas background, used as the eraser's fallback color
    pub background: Color,
    /// Current gesture
    pub state: DrawingState,
    /// Polygon under construction (survives pointer-up, cleared on finish or tool switch)
    pub polygon: PolygonBuilder,
    /// Whether the host should redraw
    pub needs_redraw: bool,
}

impl InputState {
    /// Creates a new InputState with specified defaults.
    ///
    /// The width is clamped to the supported range; a non-finite width
    /// falls back to the minimum.
    pub fn with_defaults(
        tool: Tool,
        color: Color,
        width: f64,
        fill_shapes: bool,
        symmetry: SymmetryMode,
        background: Color,
    ) -> Self {
        Self {
            current_tool: tool,
            current_color: color,
            current_width: if width.is_finite() {
                width.clamp(MIN_WIDTH, MAX_WIDTH)
            } else {
                MIN_WIDTH
            },
            fill_shapes,
            symmetry,
            background,
            state: DrawingState::Idle,
            polygon: PolygonBuilder::default(),
            needs_redraw: true,
        }
    }

    /// Switches tools, abandoning any in-progress gesture or polygon.
    pub fn select_tool(&mut self, scene: &mut Scene, tool: Tool) {
        if self.current_tool == tool {
            return;
        }
        self.cancel_gesture(scene);
        self.current_tool = tool;
        self.needs_redraw = true;
        log::info!("Tool changed to {}", tool);
    }

    /// Abandons the current gesture without committing it.
    ///
    /// Removes live previews and polygon markers, and puts an object being
    /// moved back where it was picked up.
    pub fn cancel_gesture(&mut self, scene: &mut Scene) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            DrawingState::Brushing { .. } => {
                log::debug!("Discarding in-progress stroke");
            }
            DrawingState::Dragging { preview, .. } => {
                scene.remove_object(preview);
            }
            DrawingState::Moving {
                object,
                origin,
                last,
                original,
            } => {
                if origin != last {
                    scene.modify(object, |obj| obj.shape = original);
                }
            }
        }
        self.abandon_polygon(scene);
        self.needs_redraw = true;
    }

    /// Returns true while a pointer gesture is in progress.
    ///
    /// A polygon waiting for more clicks is not a gesture; its transient
    /// objects are previews and markers only.
    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.state, DrawingState::Idle)
    }

    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    /// Sets the brush width for the next stroke, clamped to 1..=100.
    ///
    /// Non-finite widths are ignored and the current width is kept.
    pub fn set_width(&mut self, width: f64) -> f64 {
        if !width.is_finite() {
            log::warn!("Ignoring brush width {}, keeping {:.1}", width, self.current_width);
            return self.current_width;
        }
        let clamped = width.clamp(MIN_WIDTH, MAX_WIDTH);
        if clamped != width {
            log::warn!("Brush width {:.1} out of range, using {:.1}", width, clamped);
        }
        self.current_width = clamped;
        clamped
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.fill_shapes = fill;
    }

    pub fn set_symmetry(&mut self, mode: SymmetryMode) {
        self.symmetry = mode;
        self.needs_redraw = true;
    }

    /// Style for line, rectangle, circle and polygon objects.
    pub(crate) fn shape_style(&self) -> StrokeStyle {
        StrokeStyle::shape(self.current_color, self.current_width, self.fill_shapes)
    }

    pub(crate) fn abandon_polygon(&mut self, scene: &mut Scene) {
        let polygon = std::mem::take(&mut self.polygon);
        if polygon.is_empty() {
            return;
        }
        if let Some(preview) = polygon.preview {
            scene.remove_object(preview);
        }
        for marker in polygon.markers {
            scene.remove_object(marker);
        }
        log::debug!("Abandoned polygon with {} vertices", polygon.vertices.len());
    }

    /// Adds committed content plus its symmetry clones; returns all new ids.
    pub(crate) fn add_with_mirrors(&self, scene: &mut Scene, id: ObjectId) -> Vec<ObjectId> {
        let mut ids = vec![id];
        let Some(source) = scene.get(id).cloned() else {
            return ids;
        };
        let (width, height) = (scene.width(), scene.height());
        for clone in crate::symmetry::mirror(&source.shape, self.symmetry, width, height) {
            ids.push(scene.add_object(crate::draw::create_object(
                clone,
                source.style.clone(),
                ObjectRole::Content,
            )));
        }
        ids
    }
}
