use std::cmp::Ordering;

use crate::catalog::model::{Bike, Condition, FuelType};
use crate::catalog::{Catalog, CatalogEntry};

/// Listing filter. An empty list matches everything on that axis.
#[derive(Clone, Debug, PartialEq)]
pub struct BikeFilter {
    /// Case-insensitive substring of the name or brand; blank matches all.
    pub search: String,
    pub brands: Vec<String>,
    pub fuel_types: Vec<FuelType>,
    pub conditions: Vec<Condition>,
    /// Inclusive price bounds.
    pub price: (u64, u64),
    /// Inclusive bounds on [`Bike::efficiency_figure`].
    pub efficiency: (f64, f64),
}

impl Default for BikeFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            brands: Vec::new(),
            fuel_types: Vec::new(),
            conditions: Vec::new(),
            price: (0, 500_000),
            efficiency: (0.0, 100.0),
        }
    }
}

impl BikeFilter {
    /// No price or efficiency bounds at all.
    pub fn unbounded() -> Self {
        Self {
            price: (0, u64::MAX),
            efficiency: (0.0, f64::INFINITY),
            ..Self::default()
        }
    }

    pub fn matches(&self, bike: &Bike) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty()
            && !bike.name.to_lowercase().contains(&term)
            && !bike.brand.to_lowercase().contains(&term)
        {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.iter().any(|b| b == &bike.brand) {
            return false;
        }
        if !self.fuel_types.is_empty() && !self.fuel_types.contains(&bike.fuel_type) {
            return false;
        }
        if !self.conditions.is_empty() && !self.conditions.contains(&bike.condition) {
            return false;
        }
        let (lo, hi) = self.price;
        if bike.price < lo || bike.price > hi {
            return false;
        }
        let (lo, hi) = self.efficiency;
        let eff = bike.efficiency_figure();
        eff >= lo && eff <= hi
    }
}

/// Listing order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Popularity,
    PriceLow,
    PriceHigh,
    /// Best efficiency figure first.
    Efficiency,
    EcoScore,
}

impl SortOrder {
    /// Accepts the listing page's keys (`price-low`, `eco-score`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" => Some(Self::Popularity),
            "price-low" => Some(Self::PriceLow),
            "price-high" => Some(Self::PriceHigh),
            "mileage" | "efficiency" => Some(Self::Efficiency),
            "eco-score" => Some(Self::EcoScore),
            _ => None,
        }
    }

    fn compare(self, a: &Bike, b: &Bike) -> Ordering {
        match self {
            Self::Popularity => Ordering::Equal,
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Efficiency => b.efficiency_figure().total_cmp(&a.efficiency_figure()),
            Self::EcoScore => b.eco_score.total_cmp(&a.eco_score),
        }
    }
}

impl Catalog {
    /// Entries passing `filter`, ordered by `order`. Ties keep catalog order.
    pub fn browse(&self, filter: &BikeFilter, order: SortOrder) -> Vec<&CatalogEntry> {
        let mut hits: Vec<&CatalogEntry> = self
            .entries()
            .iter()
            .filter(|e| filter.matches(&e.bike))
            .collect();
        hits.sort_by(|a, b| order.compare(&a.bike, &b.bike));
        hits
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in self.entries() {
            if !out.contains(&e.bike.brand.as_str()) {
                out.push(&e.bike.brand);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/browse.rs"]
mod tests;
