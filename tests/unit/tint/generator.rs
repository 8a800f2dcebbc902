use std::sync::Arc;

use super::*;
use crate::assets::decode::decode_data_url;
use crate::foundation::error::VahanError;

struct SolidLoader([u8; 4]);

impl ImageLoader for SolidLoader {
    fn load(&self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>> {
        if src.as_str().contains("broken") {
            return Err(VahanError::load("404"));
        }
        Ok(Arc::new(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba(self.0),
        )))
    }
}

fn generator() -> TintGenerator<SolidLoader> {
    TintGenerator::new(
        SolidLoader([200, 30, 30, 255]),
        ColorTintTable::builtin(),
        &GalleryConfig::default(),
    )
}

#[test]
fn success_pads_single_tinted_image() {
    let tint_gen = generator();
    let out = tint_gen.generate(
        &ImageSrc::new("/images/a.jpg"),
        "Jet Black",
        &ImageSrc::new("/images/a.jpg"),
    );
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|s| s == &out[0]));
    assert!(out[0].is_data_url());

    let decoded = decode_data_url(out[0].as_str()).unwrap();
    let p = decoded.get_pixel(1, 1).0;
    // Jet Black desaturates and darkens.
    assert!(p[0].abs_diff(p[1]) <= 8 && p[1].abs_diff(p[2]) <= 8, "{p:?}");
    assert!(p[0] < 60, "{p:?}");
}

#[test]
fn padding_follows_config() {
    let cfg = GalleryConfig {
        tint_padding: 1,
        ..GalleryConfig::default()
    };
    let tint_gen = TintGenerator::new(
        SolidLoader([1, 2, 3, 255]),
        ColorTintTable::builtin(),
        &cfg,
    );
    let out = tint_gen.generate(&ImageSrc::new("/a.jpg"), "White", &ImageSrc::new("/a.jpg"));
    assert_eq!(out.len(), 1);
}

#[test]
fn load_failure_resolves_to_fallback() {
    let tint_gen = generator();
    let out = tint_gen.generate(
        &ImageSrc::new("/images/broken.jpg"),
        "Jet Black",
        &ImageSrc::new("/images/base.jpg"),
    );
    assert_eq!(out, vec![ImageSrc::new("/images/base.jpg")]);

    let out = tint_gen.generate(
        &ImageSrc::new("/images/broken.jpg"),
        "Jet Black",
        &ImageSrc::default(),
    );
    assert_eq!(out, vec![ImageSrc::new("/images/broken.jpg")]);
}

#[test]
fn unknown_color_still_produces_an_image() {
    let tint_gen = generator();
    let tinted = tint_gen.tint(&ImageSrc::new("/a.jpg"), "Neon Pink").unwrap();
    assert_eq!(tinted.get_pixel(0, 0).0, [200, 30, 30, 255]);
}
