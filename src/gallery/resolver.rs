use std::collections::{HashMap, HashSet};

use crate::catalog::{Bike, ColorImageMap};
use crate::foundation::core::ImageSrc;
use crate::tint::GalleryGenerator;

/// Outcome of resolving a color selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Ready(Vec<ImageSrc>),
    /// The color has no distinct photo; synthesize one from `source`.
    Generate {
        /// Base image to tint.
        source: ImageSrc,
        /// Shown when synthesis fails.
        fallback: ImageSrc,
    },
}

/// Maps a `(bike, color)` selection to a gallery.
///
/// Owns the generated-gallery cache for one bike-detail view. The cache only grows and is dropped
/// with the resolver.
#[derive(Debug, Default)]
pub struct ColorResolver {
    generated: HashMap<String, Vec<ImageSrc>>,
    generation_count: usize,
}

impl ColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what to show for `color`.
    ///
    /// A color whose mapping lists the same path more than once has no real photographed variant
    /// and resolves to [`Resolution::Generate`] until a generated gallery is stored for it.
    /// Missing or empty mappings fall back to the bike's base gallery.
    pub fn resolve(&self, bike: &Bike, color_map: &ColorImageMap, color: &str) -> Resolution {
        if let Some(hit) = self.generated.get(color) {
            tracing::debug!(bike = %bike.id, color, "generated gallery cache hit");
            return Resolution::Ready(hit.clone());
        }

        let mapped: Vec<ImageSrc> = color_map
            .get(&bike.id, color)
            .unwrap_or_default()
            .iter()
            .filter(|s| !s.is_blank())
            .cloned()
            .collect();
        if mapped.is_empty() {
            tracing::debug!(bike = %bike.id, color, "no color mapping; using base gallery");
            return Resolution::Ready(bike.base_gallery());
        }

        let unique: HashSet<&ImageSrc> = mapped.iter().collect();
        if mapped.len() >= 2 && unique.len() == 1 {
            let source = mapped[0].clone();
            let fallback = bike.primary_image().unwrap_or_else(|| source.clone());
            return Resolution::Generate { source, fallback };
        }

        Resolution::Ready(mapped)
    }

    /// Resolve and, when needed, run `generator` once and remember its output.
    pub fn resolve_with(
        &mut self,
        bike: &Bike,
        color_map: &ColorImageMap,
        color: &str,
        generator: &dyn GalleryGenerator,
    ) -> Vec<ImageSrc> {
        match self.resolve(bike, color_map, color) {
            Resolution::Ready(gallery) => gallery,
            Resolution::Generate { source, fallback } => {
                let generated = generator.generate(&source, color, &fallback);
                self.store_generated(color, generated, &fallback)
            }
        }
    }

    /// Record a generated gallery for `color`, returning what was stored.
    ///
    /// Blank entries are dropped; an empty result is replaced by `[fallback]`.
    pub fn store_generated(
        &mut self,
        color: &str,
        gallery: Vec<ImageSrc>,
        fallback: &ImageSrc,
    ) -> Vec<ImageSrc> {
        let mut gallery: Vec<ImageSrc> = gallery.into_iter().filter(|s| !s.is_blank()).collect();
        if gallery.is_empty() {
            gallery.push(fallback.clone());
        }
        self.generation_count += 1;
        self.generated.insert(color.to_owned(), gallery.clone());
        gallery
    }

    pub fn cached(&self, color: &str) -> Option<&[ImageSrc]> {
        self.generated.get(color).map(Vec::as_slice)
    }

    pub fn generation_count(&self) -> usize {
        self.generation_count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/resolver.rs"]
mod tests;
