use image::imageops::{self, FilterType};

use crate::foundation::core::{FitRect, PixelSize};

/// Scale `image` to fit entirely inside `container`, multiply by `zoom`, and center it.
pub fn contain_fit(container: PixelSize, image: PixelSize, zoom: f64) -> FitRect {
    let cw = f64::from(container.width);
    let ch = f64::from(container.height);
    if image.is_empty() {
        return FitRect {
            x: cw / 2.0,
            y: ch / 2.0,
            width: 0.0,
            height: 0.0,
        };
    }
    let iw = f64::from(image.width);
    let ih = f64::from(image.height);
    let scale = (cw / iw).min(ch / ih) * zoom;
    let width = iw * scale;
    let height = ih * scale;
    FitRect {
        x: (cw - width) / 2.0,
        y: (ch - height) / 2.0,
        width,
        height,
    }
}

/// Draw `frame` contain-fitted into a transparent canvas of `container` size.
///
/// Only the source region that lands on the canvas is resampled, so high zoom costs no more
/// than the container area. `None` when the container has no area.
pub fn render_frame(
    container: PixelSize,
    frame: &image::RgbaImage,
    zoom: f64,
) -> Option<image::RgbaImage> {
    if container.is_empty() {
        return None;
    }
    let mut canvas = image::RgbaImage::new(container.width, container.height);
    let (fw, fh) = frame.dimensions();
    let rect = contain_fit(container, PixelSize::new(fw, fh), zoom);
    if rect.width < 0.5 || rect.height < 0.5 {
        return Some(canvas);
    }

    let Some((sx, dx, dw)) = visible_span(rect.x, rect.width, f64::from(container.width), fw)
    else {
        return Some(canvas);
    };
    let Some((sy, dy, dh)) = visible_span(rect.y, rect.height, f64::from(container.height), fh)
    else {
        return Some(canvas);
    };

    let region = imageops::crop_imm(frame, sx.0, sy.0, sx.1 - sx.0, sy.1 - sy.0).to_image();
    let scaled = if (dw, dh) == region.dimensions() {
        region
    } else {
        imageops::resize(&region, dw, dh, FilterType::Triangle)
    };
    imageops::overlay(&mut canvas, &scaled, dx, dy);
    Some(canvas)
}

/// One axis of the crop: the source pixel range `[lo, hi)` covering the visible part of
/// `[pos, pos + len)` within `[0, extent)`, plus where and how wide it lands on the canvas.
fn visible_span(
    pos: f64,
    len: f64,
    extent: f64,
    src_len: u32,
) -> Option<((u32, u32), i64, u32)> {
    let lo = pos.max(0.0);
    let hi = (pos + len).min(extent);
    if hi <= lo {
        return None;
    }
    let scale = len / f64::from(src_len);
    let src_lo = ((lo - pos) / scale).floor().clamp(0.0, f64::from(src_len)) as u32;
    let src_hi = ((hi - pos) / scale).ceil().clamp(0.0, f64::from(src_len)) as u32;
    if src_hi <= src_lo {
        return None;
    }
    let dest = pos + f64::from(src_lo) * scale;
    let size = (f64::from(src_hi - src_lo) * scale).round() as u32;
    if size == 0 {
        return None;
    }
    Some(((src_lo, src_hi), dest.round() as i64, size))
}

#[cfg(test)]
#[path = "../../tests/unit/orbit/render.rs"]
mod tests;
