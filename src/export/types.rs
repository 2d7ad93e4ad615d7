//! Data types for image export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raster image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(format!("unsupported image format '{other}'")),
        }
    }
}

/// Errors that can occur while exporting artwork.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    /// The platform lacks the capability (clipboard, share target).
    #[error("{0}")]
    Unavailable(String),
}

impl From<cairo::Error> for ExportError {
    fn from(err: cairo::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpg_and_jpeg_parse_to_the_same_format() {
        assert_eq!("jpg".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert_eq!("JPEG".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert!("gif".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn mime_and_extension() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }
}
