use std::io::Cursor;

use base64::Engine as _;

use super::*;

fn png_bytes(rgba: Vec<u8>, w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let bytes = png_bytes(vec![100, 50, 200, 128], 1, 1);
    let img = decode_image(&bytes).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(err.to_string().contains("decode error:"));
}

#[test]
fn data_url_decodes_png_payload() {
    let bytes = png_bytes(vec![1, 2, 3, 255, 4, 5, 6, 255], 2, 1);
    let url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );
    let img = decode_data_url(&url).unwrap();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(1, 0).0, [4, 5, 6, 255]);
}

#[test]
fn data_url_rejects_non_base64_and_missing_payload() {
    assert!(decode_data_url("data:image/png,rawbytes").is_err());
    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("/images/a.jpg").is_err());
}

#[test]
fn jpeg_data_url_decodes_back_to_same_dimensions() {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([200, 40, 40, 255]));
    let url = encode_jpeg_data_url(&img, 90).unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));
    let back = decode_data_url(&url).unwrap();
    assert_eq!(back.dimensions(), (8, 4));
    let px = back.get_pixel(3, 2).0;
    assert!(px[0] > 150 && px[1] < 90 && px[3] == 255);
}

const RED_SQUARE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
<rect width="4" height="4" fill="#ff0000"/>
</svg>"##;

#[test]
fn decode_image_rasterizes_svg_at_intrinsic_size() {
    let img = decode_image(RED_SQUARE_SVG).unwrap();
    assert_eq!(img.dimensions(), (4, 4));
    let px = img.get_pixel(2, 2).0;
    assert!(px[0] > 250 && px[1] < 5 && px[2] < 5 && px[3] > 250);
}

#[test]
fn decode_svg_demultiplies_partial_alpha() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2">
<rect width="2" height="2" fill="#0000ff" fill-opacity="0.5"/>
</svg>"##;
    let img = decode_svg(svg).unwrap();
    let px = img.get_pixel(1, 1).0;
    assert!(px[3].abs_diff(128) <= 2);
    assert!(px[2] > 250, "expected straight-alpha blue, got {px:?}");
}

#[test]
fn decode_svg_rejects_malformed_document() {
    let err = decode_svg(b"<svg").unwrap_err();
    assert!(err.to_string().contains("parse svg tree"));
}

#[test]
fn svg_data_url_decodes() {
    let url = format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(RED_SQUARE_SVG)
    );
    let img = decode_data_url(&url).unwrap();
    assert_eq!(img.dimensions(), (4, 4));
}
