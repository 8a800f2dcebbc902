use super::*;
use crate::catalog::{BuiltinCatalog, Catalog};

#[test]
fn builtin_covers_every_sample_color() {
    let table = ColorTintTable::builtin();
    let catalog = Catalog::load(&BuiltinCatalog).unwrap();
    for entry in catalog.entries() {
        for color in entry.bike.color_names() {
            assert!(table.get(color).is_some(), "missing tint for '{color}'");
        }
    }
    assert_eq!(table.len(), 30);
}

#[test]
fn lookup_unknown_color_is_identity() {
    let table = ColorTintTable::builtin();
    assert!(table.lookup("Neon Pink").is_identity());
    assert_eq!(
        table.lookup("Mint Green").to_string(),
        "hue-rotate(110deg) saturate(1.3)"
    );
}

#[test]
fn from_json_parses_css_values() {
    let table =
        ColorTintTable::from_json_str(r#"{"Lava": "hue-rotate(-5deg) saturate(2)"}"#).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.get("Lava").unwrap().ops(),
        &[FilterOp::HueRotate(-5.0), FilterOp::Saturate(2.0)]
    );
    assert!(ColorTintTable::from_json_str(r#"{"Lava": "glow(1)"}"#).is_err());
}
