//! Best-effort sharing through a user-configured command.

use super::types::ExportError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes encoded image bytes into the configured share command.
///
/// The command line is split on whitespace; the image arrives on stdin.
/// Without a command, or when it cannot be launched, sharing is unavailable.
pub fn share_image(image_data: &[u8], command: Option<&str>) -> Result<(), ExportError> {
    let mut parts = command.unwrap_or_default().split_whitespace();
    let Some(program) = parts.next() else {
        return Err(ExportError::Unavailable(
            "Sharing is not available: no share command configured".to_string(),
        ));
    };

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ExportError::Unavailable(format!("Sharing is not available ({program}: {e})")))?;

    // A target may exit without reading everything; the exit status decides.
    let write_result = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(image_data),
        None => Ok(()),
    };
    let status = child.wait()?;

    if !status.success() {
        let detail = match write_result {
            Ok(()) => status.to_string(),
            Err(e) => format!("{status}; stdin: {e}"),
        };
        return Err(ExportError::Io(std::io::Error::other(format!(
            "share command '{program}' failed ({detail})"
        ))));
    }
    if let Err(e) = write_result {
        log::debug!("Share command '{}' closed stdin early: {}", program, e);
    }
    log::info!("Shared artwork via '{}'", program);
    Ok(())
}
