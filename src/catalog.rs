pub(crate) mod browse;
pub(crate) mod color_map;
pub(crate) mod model;
pub(crate) mod recommend;
pub(crate) mod source;

use std::collections::HashMap;

use crate::foundation::error::{VahanError, VahanResult};

pub use browse::{BikeFilter, SortOrder};
pub use color_map::ColorImageMap;
pub use model::{Bike, BikeKind, Condition, FuelType, UsedEfficiency};
pub use recommend::{Experience, Recommendation, RiderProfile, SHORTLIST_LEN, Terrain, Usage};
pub use source::{BuiltinCatalog, CatalogSource, JsonFileCatalog};

/// A bike together with its load-time classification.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub bike: Bike,
    /// Display kind derived from condition and fuel type.
    pub kind: BikeKind,
}

/// Validated, indexed set of bikes.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    idx_by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Fetch from a source and validate.
    pub fn load(source: &dyn CatalogSource) -> VahanResult<Self> {
        Self::from_bikes(source.fetch()?)
    }

    /// Validate and index a list of records, preserving their order.
    pub fn from_bikes(bikes: Vec<Bike>) -> VahanResult<Self> {
        let mut entries = Vec::with_capacity(bikes.len());
        let mut idx_by_id = HashMap::with_capacity(bikes.len());

        for bike in bikes {
            if bike.id.trim().is_empty() {
                return Err(VahanError::validation("bike id must be non-empty"));
            }
            if let Some(colors) = &bike.colors
                && colors.is_empty()
            {
                return Err(VahanError::validation(format!(
                    "bike '{}' lists colors but the list is empty",
                    bike.id
                )));
            }
            if idx_by_id.insert(bike.id.clone(), entries.len()).is_some() {
                return Err(VahanError::validation(format!(
                    "duplicate bike id '{}'",
                    bike.id
                )));
            }
            if bike.base_gallery().is_empty() {
                tracing::warn!(bike = %bike.id, "bike has no images; placeholder will be shown");
            }
            let kind = BikeKind::of(&bike);
            entries.push(CatalogEntry { bike, kind });
        }

        Ok(Self { entries, idx_by_id })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.idx_by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_fuel(&self, fuel: FuelType) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.bike.fuel_type == fuel)
    }

    pub fn by_condition(&self, condition: Condition) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.bike.condition == condition)
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.bike.is_upcoming)
    }
}

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;
