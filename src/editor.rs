//! Editor handle: the composition root owning scene, tools and history.
//!
//! Every operation the host UI can trigger (drawing, undo/redo, clear, export)
//! goes through an [`Editor`]. After each operation the editor drains the
//! scene's change events; when a finished operation changed committed artwork
//! it records exactly one history snapshot.

use crate::config::Config;
use crate::draw::{Color, Point, Scene, SceneEvent, Snapshot, StrokeStyle, render_scene};
use crate::export::{self, ExportError, ImageFormat};
use crate::history::{Availability, History};
use crate::input::{Commit, InputState, Tool};
use crate::symmetry::{self, SymmetryMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Export destinations and defaults.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub format: ImageFormat,
    pub quality: f64,
    pub filename_template: String,
    pub save_directory: PathBuf,
    pub share_command: Option<String>,
}

/// Everything needed to start an editor session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub tool: Tool,
    pub color: Color,
    pub brush_width: f64,
    pub fill_shapes: bool,
    pub symmetry: SymmetryMode,
    pub guide_style: StrokeStyle,
    /// Maximum retained history entries (0 = unlimited)
    pub max_history: usize,
    pub export: ExportSettings,
}

impl From<&Config> for EditorConfig {
    fn from(config: &Config) -> Self {
        let guide_color = config.guides.color.to_color();
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            background: config.canvas.background.to_color_or(crate::draw::WHITE),
            tool: config.drawing.default_tool.parse().unwrap_or_default(),
            color: config.drawing.default_color.to_color(),
            brush_width: config.drawing.default_width,
            fill_shapes: config.drawing.fill_shapes,
            symmetry: config.drawing.symmetry,
            guide_style: StrokeStyle::outline(guide_color, config.guides.width)
                .dashed(&config.guides.dash),
            max_history: config.history.max_entries,
            export: ExportSettings {
                format: config.export.format,
                quality: config.export.quality,
                filename_template: config.export.filename_template.clone(),
                save_directory: export::expand_tilde(&config.export.save_directory),
                share_command: config.export.share_command.clone(),
            },
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Dismissible message for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

/// A single editor operation, as replayed from scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    SelectTool { tool: Tool },
    /// Hex (`#rrggbb`) or named color
    SetColor { color: String },
    SetBrushWidth { width: f64 },
    SetFill { fill: bool },
    SetSymmetry { mode: SymmetryMode },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    /// Press at the first point, move through the rest, release at the last
    Stroke { points: Vec<[f64; 2]> },
    Undo,
    Redo,
    Clear,
    Resize { width: u32, height: u32 },
    /// Write the artwork to the download directory
    Download {
        #[serde(default)]
        format: Option<ImageFormat>,
    },
    CopyToClipboard,
    Share,
}

/// The drawing editor.
pub struct Editor {
    scene: Scene,
    input: InputState,
    history: History,
    guide_style: StrokeStyle,
    export: ExportSettings,
    notices: Vec<Notice>,
}

impl Editor {
    /// Creates an editor with an empty canvas and a single history entry.
    pub fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::new(config.width, config.height, config.background);
        let input = InputState::with_defaults(
            config.tool,
            config.color,
            config.brush_width,
            config.fill_shapes,
            config.symmetry,
            config.background,
        );
        let initial = scene.serialize().unwrap_or_else(|err| {
            log::error!("Failed to serialize empty scene: {}", err);
            Snapshot::empty()
        });
        symmetry::apply_guides(&mut scene, config.symmetry, &config.guide_style);
        scene.take_events();

        log::info!(
            "Editor ready: {}x{} canvas, tool {}, symmetry {}",
            config.width,
            config.height,
            config.tool,
            config.symmetry
        );

        Self {
            scene,
            input,
            history: History::with_limit(initial, config.max_history),
            guide_style: config.guide_style,
            export: config.export,
            notices: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current undo/redo availability.
    pub fn availability(&self) -> Availability {
        self.history.availability()
    }

    /// Drains queued user-visible notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Returns true once after anything visible changed; hosts poll this
    /// from their frame loop.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.input.needs_redraw)
    }

    // ------------------------------------------------------------------
    // Style state
    // ------------------------------------------------------------------

    pub fn select_tool(&mut self, tool: Tool) {
        self.input.select_tool(&mut self.scene, tool);
        self.sync();
    }

    pub fn set_color(&mut self, color: Color) {
        self.input.set_color(color);
    }

    /// Sets the width for the next stroke; returns the clamped value.
    pub fn set_brush_width(&mut self, width: f64) -> f64 {
        self.input.set_width(width)
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.input.set_fill(fill);
    }

    /// Changes the mirror mode and redraws the guides for it.
    pub fn set_symmetry(&mut self, mode: SymmetryMode) {
        self.input.set_symmetry(mode);
        symmetry::apply_guides(&mut self.scene, mode, &self.guide_style);
        self.sync();
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.input.on_pointer_down(&mut self.scene, Point::new(x, y));
        self.sync();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input.on_pointer_move(&mut self.scene, Point::new(x, y));
        self.sync();
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<Commit> {
        let commit = self.input.on_pointer_up(&mut self.scene, Point::new(x, y));
        self.sync();
        commit
    }

    pub fn double_click(&mut self, x: f64, y: f64) -> Option<Commit> {
        let commit = self.input.on_double_click(&mut self.scene, Point::new(x, y));
        self.sync();
        commit
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restores the previous snapshot. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> Availability {
        self.input.cancel_gesture(&mut self.scene);
        if let Some(snapshot) = self.history.undo().cloned() {
            self.restore(&snapshot);
            log::debug!("Undo to history entry {}", self.history.index());
        }
        self.scene.take_events();
        self.availability()
    }

    /// Re-applies the next snapshot. No-op when already at the newest entry.
    pub fn redo(&mut self) -> Availability {
        self.input.cancel_gesture(&mut self.scene);
        if let Some(snapshot) = self.history.redo().cloned() {
            self.restore(&snapshot);
            log::debug!("Redo to history entry {}", self.history.index());
        }
        self.scene.take_events();
        self.availability()
    }

    /// Removes all artwork, records history and re-adds the guides.
    pub fn clear(&mut self) {
        self.input.cancel_gesture(&mut self.scene);
        self.scene.clear();
        symmetry::apply_guides(&mut self.scene, self.input.symmetry, &self.guide_style);
        self.sync();
    }

    /// Changes the surface size; existing objects keep their coordinates.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.set_dimensions(width, height);
        symmetry::apply_guides(&mut self.scene, self.input.symmetry, &self.guide_style);
        self.sync();
        log::debug!("Canvas resized to {}x{}", width, height);
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.scene.restore(snapshot) {
            log::error!("Failed to restore history snapshot: {}", err);
            self.notify(NoticeLevel::Error, format!("Could not restore drawing: {err}"));
        }
        symmetry::apply_guides(&mut self.scene, self.input.symmetry, &self.guide_style);
        self.input.needs_redraw = true;
    }

    /// Drains scene events and records history for finished content changes.
    fn sync(&mut self) {
        if self.input.is_gesture_active() {
            return;
        }
        let events = self.scene.take_events();
        if !events.is_empty() {
            self.input.needs_redraw = true;
        }
        if events.iter().any(SceneEvent::touches_content) {
            self.commit();
        }
    }

    fn commit(&mut self) {
        let snapshot = match self.scene.serialize() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Failed to serialize scene: {}", err);
                self.notify(NoticeLevel::Error, format!("Could not record history: {err}"));
                return;
            }
        };
        if self.history.current() == Some(&snapshot) {
            log::debug!("Scene content unchanged; skipping history entry");
            return;
        }
        let availability = self.history.commit(snapshot);
        log::debug!(
            "History entry {} recorded (undo: {}, redo: {})",
            self.history.index(),
            availability.can_undo,
            availability.can_redo
        );
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Renders the live scene (guides included) plus any in-progress stroke.
    pub fn render(&self, ctx: &cairo::Context) -> Result<(), cairo::Error> {
        render_scene(ctx, &self.scene)?;
        self.input.render_provisional(ctx);
        Ok(())
    }

    /// Encoded image of the artwork, guides excluded.
    pub fn export_image(&mut self, format: ImageFormat, quality: f64) -> Result<Vec<u8>, ExportError> {
        let result = export::rasterize(&mut self.scene, format, quality);
        self.report("Export", result)
    }

    /// `data:` URL of the artwork, guides excluded.
    pub fn image_data_url(&mut self, format: ImageFormat, quality: f64) -> Result<String, ExportError> {
        let result = export::image_data_url(&mut self.scene, format, quality);
        self.report("Export", result)
    }

    /// Writes the artwork into the configured download directory.
    pub fn download(&mut self, format: Option<ImageFormat>) -> Result<PathBuf, ExportError> {
        let format = format.unwrap_or(self.export.format);
        let result = export::rasterize(&mut self.scene, format, self.export.quality).and_then(|bytes| {
            export::save_image(
                &bytes,
                &self.export.save_directory,
                &self.export.filename_template,
                format.extension(),
            )
        });
        let path = self.report("Download", result)?;
        self.notify(NoticeLevel::Info, format!("Saved {}", path.display()));
        Ok(path)
    }

    /// Writes the artwork to an explicit path.
    pub fn save_to(&mut self, path: &Path, format: ImageFormat, quality: f64) -> Result<PathBuf, ExportError> {
        let result = export::rasterize(&mut self.scene, format, quality)
            .and_then(|bytes| export::save_image_to(&bytes, path));
        self.report("Save", result)
    }

    /// Copies the artwork as PNG to the clipboard (best-effort).
    pub fn copy_to_clipboard(&mut self) -> Result<(), ExportError> {
        let format = ImageFormat::Png;
        let result = export::rasterize(&mut self.scene, format, 1.0)
            .and_then(|bytes| export::copy_to_clipboard(&bytes, format.mime_type()));
        self.report("Copy", result)?;
        self.notify(NoticeLevel::Info, "Copied artwork to clipboard".to_string());
        Ok(())
    }

    /// Hands the artwork as PNG to the configured share command (best-effort).
    pub fn share(&mut self) -> Result<(), ExportError> {
        let result = export::rasterize(&mut self.scene, ImageFormat::Png, 1.0)
            .and_then(|bytes| export::share_image(&bytes, self.export.share_command.as_deref()));
        self.report("Share", result)
    }

    /// Logs export failures and turns them into notices.
    fn report<T>(&mut self, action: &str, result: Result<T, ExportError>) -> Result<T, ExportError> {
        if let Err(err) = &result {
            match err {
                ExportError::Unavailable(_) => {
                    log::warn!("{} unavailable: {}", action, err);
                    self.notify(NoticeLevel::Warning, err.to_string());
                }
                _ => {
                    log::error!("{} failed: {}", action, err);
                    self.notify(NoticeLevel::Error, format!("{action} failed: {err}"));
                }
            }
        }
        result
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Applies one command. Failures surface as notices, never as panics.
    pub fn apply(&mut self, command: &EditorCommand) {
        match command {
            EditorCommand::SelectTool { tool } => self.select_tool(*tool),
            EditorCommand::SetColor { color } => match Color::parse(color) {
                Some(parsed) => self.set_color(parsed),
                None => {
                    log::warn!("Ignoring unknown color '{}'", color);
                    self.notify(NoticeLevel::Warning, format!("Unknown color '{color}'"));
                }
            },
            EditorCommand::SetBrushWidth { width } => {
                self.set_brush_width(*width);
            }
            EditorCommand::SetFill { fill } => self.set_fill(*fill),
            EditorCommand::SetSymmetry { mode } => self.set_symmetry(*mode),
            EditorCommand::PointerDown { x, y } => self.pointer_down(*x, *y),
            EditorCommand::PointerMove { x, y } => self.pointer_move(*x, *y),
            EditorCommand::PointerUp { x, y } => {
                self.pointer_up(*x, *y);
            }
            EditorCommand::DoubleClick { x, y } => {
                self.double_click(*x, *y);
            }
            EditorCommand::Stroke { points } => self.stroke(points),
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
            EditorCommand::Clear => self.clear(),
            EditorCommand::Resize { width, height } => self.resize(*width, *height),
            EditorCommand::Download { format } => {
                let _ = self.download(*format);
            }
            EditorCommand::CopyToClipboard => {
                let _ = self.copy_to_clipboard();
            }
            EditorCommand::Share => {
                let _ = self.share();
            }
        }
    }

    fn stroke(&mut self, points: &[[f64; 2]]) {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            log::warn!("Ignoring stroke without points");
            return;
        };
        self.pointer_down(first[0], first[1]);
        for point in &points[1..] {
            self.pointer_move(point[0], point[1]);
        }
        self.pointer_up(last[0], last[1]);
    }
}
