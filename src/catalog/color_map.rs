use std::collections::BTreeMap;

use crate::foundation::core::ImageSrc;
use crate::foundation::error::{VahanError, VahanResult};

const BUILTIN_COLOR_IMAGES_JSON: &str = include_str!("data/color_images.json");

/// Bike id → color name → ordered image paths.
///
/// An entry that repeats one path is how the data marks "no photographed variant"; that is a
/// tint trigger for the resolver, not a data error.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorImageMap {
    by_bike: BTreeMap<String, BTreeMap<String, Vec<ImageSrc>>>,
}

impl ColorImageMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the sample catalog.
    pub fn builtin() -> VahanResult<Self> {
        Self::from_json_str(BUILTIN_COLOR_IMAGES_JSON)
    }

    /// Parse a map from JSON (`{"<bike id>": {"<color>": ["<path>", ...]}}`).
    pub fn from_json_str(json: &str) -> VahanResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VahanError::validation(format!("color image map: {e}")))
    }

    /// Mapped paths for one bike and color.
    pub fn get(&self, bike_id: &str, color: &str) -> Option<&[ImageSrc]> {
        self.by_bike
            .get(bike_id)
            .and_then(|colors| colors.get(color))
            .map(Vec::as_slice)
    }

    /// Colors mapped for a bike, in name order.
    pub fn colors_for(&self, bike_id: &str) -> impl Iterator<Item = &str> {
        self.by_bike
            .get(bike_id)
            .into_iter()
            .flat_map(|colors| colors.keys().map(String::as_str))
    }

    /// Insert or replace one entry.
    pub fn insert(
        &mut self,
        bike_id: impl Into<String>,
        color: impl Into<String>,
        images: Vec<ImageSrc>,
    ) {
        self.by_bike
            .entry(bike_id.into())
            .or_default()
            .insert(color.into(), images);
    }
}
