//! Drawing primitives and the scene host (Cairo-based).
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`StrokeStyle`]: stroke/fill descriptor copied into every object
//! - [`Shape`]: geometry of lines, rectangles, circles, polygons and freehand paths
//! - [`Scene`]: ordered object list with change events and snapshots
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod render;
pub mod scene;
pub mod shape;
pub mod style;

pub use color::Color;
pub use render::{render_object, render_scene, render_strands};
pub use scene::{ObjectId, ObjectRole, Scene, SceneEvent, SceneObject, Snapshot, create_object};
pub use shape::{Bounds, DragShape, Point, Shape};
pub use style::{Composite, Glow, LineCap, LineJoin, StrokeStyle};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, INDIGO, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
