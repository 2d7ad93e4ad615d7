//! Rasterization of the scene to PNG/JPEG bytes and data URLs.

use super::types::{ExportError, ImageFormat};
use crate::draw::{Color, Scene, render_scene};
use base64::Engine;
use image::ImageEncoder;

/// Renders the scene with guides hidden into a new image surface.
///
/// Guide visibility is restored before returning, on success or failure.
/// The scene is borrowed mutably for the whole call, so no other mutation
/// can land between hiding and restoring.
pub fn rasterize_surface(scene: &mut Scene) -> Result<cairo::ImageSurface, ExportError> {
    let hidden = scene.hide_guides();
    let rendered = render_to_surface(scene);
    scene.show_objects(&hidden);
    rendered
}

/// Rasterizes the scene (guides excluded) and encodes it.
///
/// `quality` (0.0 - 1.0) only applies to JPEG, where it maps to 1 - 100.
pub fn rasterize(
    scene: &mut Scene,
    format: ImageFormat,
    quality: f64,
) -> Result<Vec<u8>, ExportError> {
    let background = scene.background();
    let mut surface = rasterize_surface(scene)?;
    match format {
        ImageFormat::Png => encode_png(&surface),
        ImageFormat::Jpeg => encode_jpeg(&mut surface, background, quality),
    }
}

/// Rasterizes the scene into a `data:<mime>;base64,...` URL.
pub fn image_data_url(
    scene: &mut Scene,
    format: ImageFormat,
    quality: f64,
) -> Result<String, ExportError> {
    let bytes = rasterize(scene, format, quality)?;
    Ok(data_url(&bytes, format))
}

/// Wraps already encoded image bytes into a data URL.
pub fn data_url(bytes: &[u8], format: ImageFormat) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", format.mime_type(), encoded)
}

/// Maps a 0.0 - 1.0 quality factor to the encoder's 1 - 100 range.
pub fn jpeg_quality(quality: f64) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

fn render_to_surface(scene: &Scene) -> Result<cairo::ImageSurface, ExportError> {
    let width = i32::try_from(scene.width().max(1))
        .map_err(|_| ExportError::Render(format!("surface width {} too large", scene.width())))?;
    let height = i32::try_from(scene.height().max(1))
        .map_err(|_| ExportError::Render(format!("surface height {} too large", scene.height())))?;

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_scene(&ctx, scene)?;
    }
    surface.flush();
    log::debug!("Rasterized scene at {}x{}", width, height);
    Ok(surface)
}

fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    surface
        .write_to_png(&mut buf)
        .map_err(|e| ExportError::Encode(format!("PNG encoding failed: {e}")))?;
    Ok(buf)
}

/// Encodes the surface as JPEG, flattening transparency onto `background`.
fn encode_jpeg(
    surface: &mut cairo::ImageSurface,
    background: Color,
    quality: f64,
) -> Result<Vec<u8>, ExportError> {
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let stride = surface.stride() as usize;
    let bg = [
        (background.r.clamp(0.0, 1.0) * 255.0).round(),
        (background.g.clamp(0.0, 1.0) * 255.0).round(),
        (background.b.clamp(0.0, 1.0) * 255.0).round(),
    ];

    let data = surface
        .data()
        .map_err(|e| ExportError::Render(format!("surface data unavailable: {e}")))?;
    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in data.chunks(stride).take(height) {
        for px in row[..width * 4].chunks_exact(4) {
            // ARGB32 is a native-endian u32 with premultiplied color.
            let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            let inv = 1.0 - f64::from((argb >> 24) & 0xff) / 255.0;
            for (shift, bg) in [(16, bg[0]), (8, bg[1]), (0, bg[2])] {
                let channel = f64::from((argb >> shift) & 0xff);
                rgb.push(bg.mul_add(inv, channel).round().min(255.0) as u8);
            }
        }
    }
    drop(data);

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality));
    encoder
        .write_image(
            &rgb,
            width as u32,
            height as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::Encode(format!("JPEG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}
