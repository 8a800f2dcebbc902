use super::*;
use serde_json::json;

#[test]
fn defaults_are_valid() {
    GalleryConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg: GalleryConfig = serde_json::from_value(json!({"drag_sensitivity_px": 20.0})).unwrap();
    assert_eq!(cfg.drag_sensitivity_px, 20.0);
    assert_eq!(cfg.zoom_max, 3.0);
    assert_eq!(cfg.placeholder.as_str(), "/images/placeholder.svg");
}

#[test]
fn unknown_keys_are_rejected() {
    let r: Result<GalleryConfig, _> = serde_json::from_value(json!({"zoom_maxx": 2.0}));
    assert!(r.is_err());
}

#[test]
fn validate_rejects_inverted_zoom_bounds() {
    let cfg = GalleryConfig {
        zoom_min: 2.0,
        zoom_max: 1.5,
        ..GalleryConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_bad_numbers() {
    let cfg = GalleryConfig {
        drag_sensitivity_px: f64::NAN,
        ..GalleryConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = GalleryConfig {
        jpeg_quality: 0,
        ..GalleryConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = GalleryConfig {
        financing_ratio: 1.5,
        ..GalleryConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_file_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, br#"{"play_tick_ms": 50}"#).unwrap();
    let cfg = GalleryConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.play_tick_ms, 50);

    std::fs::write(&path, br#"{"play_tick_ms": 0}"#).unwrap();
    assert!(GalleryConfig::from_json_file(&path).is_err());

    assert!(GalleryConfig::from_json_file(dir.path().join("missing.json")).is_err());
}
