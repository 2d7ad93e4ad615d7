//! Export/query facade: rasterized images for preview, download, clipboard and share.
//!
//! Every rasterizing entry point hides symmetry guides before rendering and
//! restores them afterwards, so guides never reach exported output.

pub mod clipboard;
pub mod file;
pub mod raster;
pub mod share;
pub mod types;

pub use clipboard::copy_to_clipboard;
pub use file::{expand_tilde, save_image, save_image_to};
pub use raster::{data_url, image_data_url, rasterize, rasterize_surface};
pub use share::share_image;
pub use types::{ExportError, ImageFormat};
