//! Writing exported images to disk ("download").

use super::types::ExportError;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns true if every `%` specifier in `template` is one chrono understands.
pub fn is_valid_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string, may contain chrono format specifiers
/// * `extension` - File extension (e.g., "png")
///
/// # Errors
/// Returns [`ExportError::Encode`] for a template with a stray or unknown `%` specifier.
pub fn generate_filename(template: &str, extension: &str) -> Result<String, ExportError> {
    if !is_valid_template(template) {
        return Err(ExportError::Encode(format!(
            "invalid filename template '{template}'"
        )));
    }
    let stem = Local::now().format(template).to_string();
    Ok(format!("{}.{}", stem, extension))
}

/// Ensure the target directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());
    Ok(canonical)
}

/// Writes encoded image bytes as `<template>.<extension>` inside `directory`.
///
/// Returns the path of the written file.
pub fn save_image(
    image_data: &[u8],
    directory: &Path,
    template: &str,
    extension: &str,
) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(generate_filename(template, extension)?);

    log::info!(
        "Saving artwork to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );
    fs::write(&file_path, image_data)?;
    Ok(file_path)
}

/// Writes encoded image bytes to an explicit path, creating parent directories.
pub fn save_image_to(image_data: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }
    fs::write(path, image_data)?;
    log::info!("Artwork written to {}", path.display());
    Ok(path.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
