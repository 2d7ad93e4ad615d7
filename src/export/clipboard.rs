//! Clipboard integration for copying exported artwork.

use super::types::ExportError;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, ServeRequests, Source};

/// Copy encoded image data to the Wayland clipboard.
///
/// Tries the `wl-copy` command first and falls back to wl-clipboard-rs.
/// When both fail the clipboard is reported as unavailable.
pub fn copy_to_clipboard(image_data: &[u8], mime_type: &str) -> Result<(), ExportError> {
    log::debug!(
        "Attempting to copy artwork to clipboard ({} bytes, {})",
        image_data.len(),
        mime_type
    );

    let cmd_err = match copy_via_command(image_data, mime_type) {
        Ok(()) => {
            log::info!("Copied artwork to clipboard via wl-copy");
            return Ok(());
        }
        Err(err) => err,
    };
    log::warn!("wl-copy failed ({}); falling back to wl-clipboard-rs", cmd_err);

    match copy_via_library(image_data, mime_type) {
        Ok(()) => {
            log::info!("Copied artwork to clipboard via wl-clipboard-rs");
            Ok(())
        }
        Err(lib_err) => Err(ExportError::Unavailable(format!(
            "Clipboard is not available (wl-copy: {cmd_err}; wl-clipboard-rs: {lib_err})"
        ))),
    }
}

fn copy_via_library(image_data: &[u8], mime_type: &str) -> Result<(), String> {
    let mut opts = Options::new();
    // Serve a single paste, then exit.
    opts.serve_requests(ServeRequests::Only(1));
    opts.copy(
        Source::Bytes(image_data.into()),
        MimeType::Specific(mime_type.to_string()),
    )
    .map_err(|e| e.to_string())
}

fn copy_via_command(image_data: &[u8], mime_type: &str) -> Result<(), String> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg(mime_type)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to spawn wl-copy: {e}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(image_data)
            .map_err(|e| format!("failed to write to wl-copy: {e}"))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("failed to wait for wl-copy: {e}"))?;
    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
    }
    Ok(())
}
