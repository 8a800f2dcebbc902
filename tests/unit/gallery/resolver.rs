use std::cell::Cell;

use super::*;
use crate::catalog::{BuiltinCatalog, CatalogSource};

struct CountingGen(Cell<usize>);

impl GalleryGenerator for CountingGen {
    fn generate(&self, _source: &ImageSrc, color: &str, _fallback: &ImageSrc) -> Vec<ImageSrc> {
        self.0.set(self.0.get() + 1);
        vec![ImageSrc::new(format!("data:image/jpeg;base64,{color}")); 3]
    }
}

fn bike(id: &str) -> Bike {
    BuiltinCatalog
        .fetch()
        .unwrap()
        .into_iter()
        .find(|b| b.id == id)
        .unwrap()
}

fn srcs(paths: &[&str]) -> Vec<ImageSrc> {
    paths.iter().map(|p| ImageSrc::new(*p)).collect()
}

#[test]
fn distinct_entries_are_used_directly() {
    let map = ColorImageMap::builtin().unwrap();
    let resolver = ColorResolver::new();
    let out = resolver.resolve(&bike("2"), &map, "Mint Green");
    assert_eq!(
        out,
        Resolution::Ready(srcs(&["/images/ather-450x-green.jpg"]))
    );
}

#[test]
fn missing_mapping_falls_back_to_base_gallery() {
    let b = bike("1");
    let resolver = ColorResolver::new();
    let out = resolver.resolve(&b, &ColorImageMap::new(), "Cyan Blue");
    assert_eq!(out, Resolution::Ready(b.base_gallery()));

    let mut map = ColorImageMap::new();
    map.insert("1", "Cyan Blue", srcs(&["", "  "]));
    assert_eq!(
        resolver.resolve(&b, &map, "Cyan Blue"),
        Resolution::Ready(b.base_gallery())
    );
}

#[test]
fn duplicate_entries_request_generation() {
    let b = bike("1");
    let mut map = ColorImageMap::new();
    map.insert("1", "Racing Black", srcs(&["/images/x.jpg", "/images/x.jpg"]));
    let out = ColorResolver::new().resolve(&b, &map, "Racing Black");
    assert_eq!(
        out,
        Resolution::Generate {
            source: ImageSrc::new("/images/x.jpg"),
            fallback: ImageSrc::new("/images/yamaha-mt15.jpg"),
        }
    );
}

#[test]
fn generation_runs_once_per_color() {
    let b = bike("1");
    let mut map = ColorImageMap::new();
    map.insert("1", "Racing Black", srcs(&["/images/x.jpg"; 3]));
    map.insert("1", "Cyan Blue", srcs(&["/images/y.jpg"; 2]));
    let tint_gen = CountingGen(Cell::new(0));
    let mut resolver = ColorResolver::new();

    let first = resolver.resolve_with(&b, &map, "Racing Black", &tint_gen);
    let again = resolver.resolve_with(&b, &map, "Racing Black", &tint_gen);
    assert_eq!(first, again);
    assert_eq!(first.len(), 3);
    assert_eq!(tint_gen.0.get(), 1);

    resolver.resolve_with(&b, &map, "Cyan Blue", &tint_gen);
    resolver.resolve_with(&b, &map, "Racing Black", &tint_gen);
    assert_eq!(tint_gen.0.get(), 2);
    assert_eq!(resolver.generation_count(), 2);
    assert!(resolver.cached("Cyan Blue").is_some());
    assert!(resolver.cached("Jet Black").is_none());
}

#[test]
fn builtin_map_never_generates_for_sample_colors() {
    let map = ColorImageMap::builtin().unwrap();
    let tint_gen = CountingGen(Cell::new(0));
    let mut resolver = ColorResolver::new();
    for b in BuiltinCatalog.fetch().unwrap() {
        for color in b.color_names() {
            let gallery = resolver.resolve_with(&b, &map, color, &tint_gen);
            assert!(!gallery.is_empty(), "bike {} color {color}", b.id);
        }
    }
    assert_eq!(tint_gen.0.get(), 0);
}

#[test]
fn empty_generated_gallery_stores_fallback() {
    let mut resolver = ColorResolver::new();
    let fb = ImageSrc::new("/images/base.jpg");
    let stored = resolver.store_generated("Jet Black", vec![ImageSrc::new("")], &fb);
    assert_eq!(stored, vec![fb.clone()]);
    assert_eq!(resolver.cached("Jet Black"), Some(&[fb][..]));
}
