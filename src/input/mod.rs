//! Input handling and the tool controller.
//!
//! This module translates pointer events into scene mutations. It maintains
//! the current tool and style state (color, width, fill, symmetry) and the
//! state machine for gestures (idle, brushing, dragging, moving), plus the
//! polygon builder that spans several clicks.

pub mod brush;
pub mod state;
pub mod tool;

pub use brush::{BrushProfile, PathBuilder, PointSink, SymmetrySink};
pub use state::{Commit, DrawingState, InputState};
pub use tool::{BrushKind, Tool};
