use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::ImageSrc;
use crate::foundation::error::{VahanError, VahanResult};

/// Tunables for the gallery, tint and orbit pipeline.
///
/// Every field has a default; a JSON config only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Image shown whenever a source fails to resolve or load.
    pub placeholder: ImageSrc,
    /// How many copies of a synthesized tint fill a generated gallery.
    pub tint_padding: usize,
    /// JPEG quality (1..=100) for synthesized data URLs.
    pub jpeg_quality: u8,
    /// Fewest real frames that enable drag rotation in the orbit viewer.
    pub min_orbit_frames: usize,
    /// Horizontal drag distance per frame step.
    pub drag_sensitivity_px: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Multiplicative step for zoom buttons.
    pub zoom_button_step: f64,
    /// Multiplicative step per wheel tick.
    pub zoom_wheel_step: f64,
    /// Auto-play frame interval in milliseconds.
    pub play_tick_ms: u64,
    /// Share of the ex-showroom price financed by default.
    pub financing_ratio: f64,
    pub default_tenure_months: u32,
    /// Default annual interest rate in percent.
    pub default_annual_rate_pct: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            placeholder: ImageSrc::new("/images/placeholder.svg"),
            tint_padding: 3,
            jpeg_quality: 90,
            min_orbit_frames: 8,
            drag_sensitivity_px: 10.0,
            zoom_min: 0.5,
            zoom_max: 3.0,
            zoom_button_step: 1.2,
            zoom_wheel_step: 1.1,
            play_tick_ms: 100,
            financing_ratio: 0.9,
            default_tenure_months: 24,
            default_annual_rate_pct: 9.5,
        }
    }
}

impl GalleryConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> VahanResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| VahanError::validation(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the pipeline cannot operate with.
    pub fn validate(&self) -> VahanResult<()> {
        fn positive(name: &str, v: f64) -> VahanResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(VahanError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        if self.placeholder.is_blank() {
            return Err(VahanError::validation("placeholder must be non-empty"));
        }
        if self.tint_padding == 0 {
            return Err(VahanError::validation("tint_padding must be >= 1"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(VahanError::validation("jpeg_quality must be in 1..=100"));
        }
        if self.min_orbit_frames < 2 {
            return Err(VahanError::validation("min_orbit_frames must be >= 2"));
        }
        positive("drag_sensitivity_px", self.drag_sensitivity_px)?;
        positive("zoom_min", self.zoom_min)?;
        positive("zoom_max", self.zoom_max)?;
        if self.zoom_min > self.zoom_max {
            return Err(VahanError::validation("zoom_min must be <= zoom_max"));
        }
        if !(self.zoom_min..=self.zoom_max).contains(&1.0) {
            return Err(VahanError::validation("zoom bounds must include 1.0"));
        }
        positive("zoom_button_step", self.zoom_button_step)?;
        positive("zoom_wheel_step", self.zoom_wheel_step)?;
        if self.play_tick_ms == 0 {
            return Err(VahanError::validation("play_tick_ms must be >= 1"));
        }
        if !self.financing_ratio.is_finite() || !(0.0..=1.0).contains(&self.financing_ratio) {
            return Err(VahanError::validation("financing_ratio must be in [0, 1]"));
        }
        if self.default_tenure_months == 0 {
            return Err(VahanError::validation("default_tenure_months must be >= 1"));
        }
        if !self.default_annual_rate_pct.is_finite() || self.default_annual_rate_pct < 0.0 {
            return Err(VahanError::validation(
                "default_annual_rate_pct must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
