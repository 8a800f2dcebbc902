use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{decode_data_url, decode_image};
use crate::foundation::core::ImageSrc;
use crate::foundation::error::{VahanError, VahanResult};

/// Fetch-and-decode port for image sources.
///
/// Implementations must be shareable across the preload worker threads.
pub trait ImageLoader: Send + Sync {
    /// Load one source as straight-alpha RGBA8.
    fn load(&self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>>;
}

impl<L: ImageLoader + ?Sized> ImageLoader for &L {
    fn load(&self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>> {
        (**self).load(src)
    }
}

impl<L: ImageLoader + ?Sized> ImageLoader for Arc<L> {
    fn load(&self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>> {
        (**self).load(src)
    }
}

/// Map a base-URL-relative source to a path relative to the static asset root.
///
/// Strips the query string and a leading `/`, normalizes `\` to `/`, drops `.` segments and
/// rejects parent traversals.
pub fn resolve_asset_path(src: &ImageSrc) -> VahanResult<String> {
    if src.is_data_url() {
        return Err(VahanError::load("data URLs have no asset path"));
    }
    let s = src.path_part().replace('\\', "/");
    let s = s.trim_start_matches('/');
    if s.is_empty() {
        return Err(VahanError::load("image source must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(VahanError::load("image sources must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(VahanError::load("image source must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Loads sources from a static asset directory; `data:` URLs are decoded inline.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Serve assets from `root` (the directory `/` maps to).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, src: &ImageSrc) -> VahanResult<Arc<image::RgbaImage>> {
        if src.is_data_url() {
            return decode_data_url(src.as_str()).map(Arc::new);
        }
        let rel = resolve_asset_path(src)?;
        let path = self.root.join(&rel);
        let bytes = std::fs::read(&path)
            .map_err(|e| VahanError::load(format!("read '{}': {e}", path.display())))?;
        decode_image(&bytes).map(Arc::new)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
