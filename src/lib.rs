//! Library exports for the arto drawing canvas.
//!
//! The [`Editor`] owns the scene, the active tool and the undo history; host
//! UIs forward pointer input and toolbar actions to it and render with
//! [`Editor::render`]. Configuration types are exported so external tools can
//! share validation logic and schema generation with the main binary.

pub mod config;
pub mod draw;
pub mod editor;
pub mod export;
pub mod history;
pub mod input;
pub mod notification;
pub mod script;
pub mod symmetry;

pub use config::Config;
pub use editor::{Editor, EditorCommand, EditorConfig, Notice, NoticeLevel};
pub use export::{ExportError, ImageFormat};
pub use history::{Availability, History};
pub use input::{BrushKind, Tool};
pub use script::{Script, ScriptError};
pub use symmetry::SymmetryMode;
