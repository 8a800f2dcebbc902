use crate::assets::decode::encode_jpeg_data_url;
use crate::assets::loader::ImageLoader;
use crate::config::GalleryConfig;
use crate::foundation::core::ImageSrc;
use crate::foundation::error::VahanResult;
use crate::tint::filter::apply_filter;
use crate::tint::table::ColorTintTable;

/// Produces a gallery for a color that has no distinct photographed variant.
///
/// Implementations never fail: whatever goes wrong, they return a displayable gallery (at
/// worst `[fallback]`).
pub trait GalleryGenerator {
    /// Build the gallery for `color` starting from `source`.
    fn generate(&self, source: &ImageSrc, color: &str, fallback: &ImageSrc) -> Vec<ImageSrc>;
}

/// Synthesizes color variants by tinting a base photo.
pub struct TintGenerator<L> {
    loader: L,
    table: ColorTintTable,
    padding: usize,
    jpeg_quality: u8,
}

impl<L: ImageLoader> TintGenerator<L> {
    /// Generator over `loader` using `table`, padded and encoded per `config`.
    pub fn new(loader: L, table: ColorTintTable, config: &GalleryConfig) -> Self {
        Self {
            loader,
            table,
            padding: config.tint_padding.max(1),
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// The tint table in use.
    pub fn table(&self) -> &ColorTintTable {
        &self.table
    }

    /// Load `source` and apply the tint for `color`.
    pub fn tint(&self, source: &ImageSrc, color: &str) -> VahanResult<image::RgbaImage> {
        let base = self.loader.load(source)?;
        Ok(apply_filter(&base, &self.table.lookup(color)))
    }

    fn try_generate(&self, source: &ImageSrc, color: &str) -> VahanResult<ImageSrc> {
        let tinted = self.tint(source, color)?;
        Ok(ImageSrc::new(encode_jpeg_data_url(&tinted, self.jpeg_quality)?))
    }
}

impl<L: ImageLoader> GalleryGenerator for TintGenerator<L> {
    #[tracing::instrument(skip(self, source, fallback), fields(source = %source.abbreviated()))]
    fn generate(&self, source: &ImageSrc, color: &str, fallback: &ImageSrc) -> Vec<ImageSrc> {
        match self.try_generate(source, color) {
            Ok(url) => vec![url; self.padding],
            Err(e) => {
                tracing::warn!(error = %e, "tint generation failed; using untinted fallback");
                let fallback = if fallback.is_blank() { source } else { fallback };
                vec![fallback.clone()]
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tint/generator.rs"]
mod tests;
