use std::io::Cursor;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::foundation::error::{VahanError, VahanResult};

const MAX_SVG_DIM: u32 = 16_384;

/// Decode encoded image bytes into straight-alpha RGBA8.
///
/// SVG documents are rasterized at their intrinsic size; everything else goes through `image`.
pub fn decode_image(bytes: &[u8]) -> VahanResult<image::RgbaImage> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| VahanError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Rasterize an SVG document at its intrinsic size.
pub fn decode_svg(bytes: &[u8]) -> VahanResult<image::RgbaImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| VahanError::decode(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(VahanError::decode("svg has invalid width/height"));
    }
    let width = (w.ceil() as u32).max(1);
    let height = (h.ceil() as u32).max(1);
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(VahanError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VahanError::decode("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(width as f32 / w, height as f32 / h);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| VahanError::decode("svg pixmap size mismatch"))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"<")
}

// tiny-skia pixmaps are premultiplied.
fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Decode a `data:<media>;base64,<payload>` URL.
pub fn decode_data_url(url: &str) -> VahanResult<image::RgbaImage> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| VahanError::decode("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| VahanError::decode("data URL has no payload separator"))?;
    if !meta.ends_with(";base64") {
        return Err(VahanError::decode("only base64 data URLs are supported"));
    }
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| VahanError::decode(format!("data URL base64: {e}")))?;
    decode_image(&bytes)
}

/// Encode as JPEG at `quality` and wrap in a base64 data URL.
///
/// JPEG has no alpha channel; transparent pixels flatten to their color channels.
pub fn encode_jpeg_data_url(img: &image::RgbaImage, quality: u8) -> VahanResult<String> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
    image::DynamicImage::ImageRgb8(rgb)
        .write_with_encoder(encoder)
        .context("encode jpeg")
        .map_err(|e| VahanError::encode(format!("{e:#}")))?;
    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&buf)))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
