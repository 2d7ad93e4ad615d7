//! Recorded editor sessions.
//!
//! A script is a list of [`EditorCommand`]s stored as JSON or TOML:
//!
//! ```toml
//! [[commands]]
//! op = "set_symmetry"
//! mode = "quad"
//!
//! [[commands]]
//! op = "stroke"
//! points = [[10.0, 10.0], [60.0, 40.0]]
//! ```

use crate::editor::{Editor, EditorCommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML script: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Ordered list of editor commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub commands: Vec<EditorCommand>,
}

impl Script {
    /// Loads a script, choosing the format by extension (`.json` or `.toml`).
    ///
    /// Files with any other extension are parsed as JSON when they start with
    /// `{`, and as TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let script = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source)?,
            Some("toml") => Self::from_toml(&source)?,
            _ if source.trim_start().starts_with('{') => Self::from_json(&source)?,
            _ => Self::from_toml(&source)?,
        };
        log::info!("Loaded {} commands from {}", script.commands.len(), path.display());
        Ok(script)
    }

    pub fn from_json(source: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    /// Applies every command in order.
    pub fn run(&self, editor: &mut Editor) {
        for (index, command) in self.commands.iter().enumerate() {
            log::trace!("Command {}: {:?}", index, command);
            editor.apply(command);
        }
    }
}
