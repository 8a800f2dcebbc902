use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::loader::{ImageLoader, resolve_asset_path};
use crate::foundation::core::ImageSrc;
use crate::foundation::error::VahanResult;

/// Outcome of a background preload batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub loaded: usize,
    pub already_cached: usize,
    /// Sources that failed, with the error text. Failures never stop the rest of the batch.
    pub failed: Vec<(ImageSrc, String)>,
}

/// Decode-once image cache in front of an [`ImageLoader`].
///
/// Keys ignore query strings and path spelling differences, so `/a.jpg?v=1` and `a.jpg` share
/// one entry. Failed loads are not remembered.
pub struct ImageCache<L> {
    loader: L,
    images: HashMap<String, Arc<image::RgbaImage>>,
    decode_counts: HashMap<String, u32>,
}

impl<L: ImageLoader> ImageCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            images: HashMap::new(),
            decode_counts: HashMap::new(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Cache key for a source.
    pub fn key_for(src: &ImageSrc) -> String {
        if src.is_data_url() {
            return src.as_str().to_owned();
        }
        resolve_asset_path(src).unwrap_or_else(|_| src.path_part().to_owned())
    }

    pub fn get(&self, src: &ImageSrc) -> Option<Arc<image::RgbaImage>> {
        self.images.get(&Self::key_for(src)).cloned()
    }

    /// Return the resident image or load and keep it.
    pub fn get_or_load(&mut self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>> {
        let key = Self::key_for(src);
        if let Some(img) = self.images.get(&key) {
            return Ok(img.clone());
        }
        let img = self.loader.load(src)?;
        *self.decode_counts.entry(key.clone()).or_insert(0) += 1;
        self.images.insert(key, img.clone());
        Ok(img)
    }

    /// Load every not-yet-resident source in parallel.
    #[tracing::instrument(skip_all, fields(requested = srcs.len()))]
    pub fn preload_all(&mut self, srcs: &[ImageSrc]) -> PreloadReport {
        let mut report = PreloadReport::default();
        let mut pending = Vec::<(String, &ImageSrc)>::new();
        for src in srcs {
            let key = Self::key_for(src);
            if self.images.contains_key(&key) || pending.iter().any(|(k, _)| *k == key) {
                report.already_cached += 1;
                continue;
            }
            pending.push((key, src));
        }

        let loader = &self.loader;
        let results: Vec<_> = pending
            .into_par_iter()
            .map(|(key, src)| (key, src, loader.load(src)))
            .collect();

        for (key, src, result) in results {
            match result {
                Ok(img) => {
                    *self.decode_counts.entry(key.clone()).or_insert(0) += 1;
                    self.images.insert(key, img);
                    report.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(src = %src.abbreviated(), error = %e, "preload failed");
                    report.failed.push((src.clone(), e.to_string()));
                }
            }
        }
        report
    }

    /// How many times the source was decoded through this cache.
    pub fn decode_count(&self, src: &ImageSrc) -> u32 {
        self.decode_counts
            .get(&Self::key_for(src))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
