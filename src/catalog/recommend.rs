//! Rule-based shortlist for the "find my bike" questionnaire.
//!
//! Bikes outside the budget or the preferred powertrains are dropped; the rest earn points for
//! matching the rider's usage, terrain and experience, and the best few are returned.

use crate::catalog::model::{Bike, FuelType};
use crate::catalog::{Catalog, CatalogEntry};
use crate::foundation::error::{VahanError, VahanResult};

/// Default shortlist length.
pub const SHORTLIST_LEN: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    #[default]
    Daily,
    Weekend,
    Touring,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    City,
    Highway,
    Offroad,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Usage {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekend" => Some(Self::Weekend),
            "touring" => Some(Self::Touring),
            _ => None,
        }
    }
}

impl Terrain {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "city" => Some(Self::City),
            "highway" => Some(Self::Highway),
            "offroad" | "off-road" => Some(Self::Offroad),
            _ => None,
        }
    }
}

impl Experience {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Questionnaire answers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiderProfile {
    /// Inclusive price bounds.
    pub budget: (u64, u64),
    pub fuel_types: Vec<FuelType>,
    pub usage: Usage,
    pub terrain: Terrain,
    pub experience: Experience,
}

impl Default for RiderProfile {
    fn default() -> Self {
        Self {
            budget: (50_000, 200_000),
            fuel_types: vec![FuelType::Petrol],
            usage: Usage::Daily,
            terrain: Terrain::City,
            experience: Experience::Beginner,
        }
    }
}

impl RiderProfile {
    pub fn validate(&self) -> VahanResult<()> {
        if self.budget.0 > self.budget.1 {
            return Err(VahanError::validation("budget minimum exceeds maximum"));
        }
        if self.fuel_types.is_empty() {
            return Err(VahanError::validation("pick at least one fuel type"));
        }
        Ok(())
    }

    /// Hard constraints: price within budget and a preferred powertrain.
    pub fn admits(&self, bike: &Bike) -> bool {
        let (lo, hi) = self.budget;
        (lo..=hi).contains(&bike.price) && self.fuel_types.contains(&bike.fuel_type)
    }

    /// Soft-match points, 0..=7.
    pub fn score(&self, bike: &Bike) -> u32 {
        let usage = match self.usage {
            Usage::Daily => bike.mileage > 40.0,
            Usage::Weekend => bike.max_power > 15.0,
            Usage::Touring => bike.range.is_some_and(|r| r > 200.0),
        };
        // No ground-clearance figure is recorded, so offroad never earns terrain points.
        let terrain = match self.terrain {
            Terrain::City => bike.weight < 150.0,
            Terrain::Highway => bike.max_speed > 100.0,
            Terrain::Offroad => false,
        };
        let experience = match self.experience {
            Experience::Beginner => bike.max_power < 20.0,
            Experience::Intermediate => (20.0..=40.0).contains(&bike.max_power),
            Experience::Expert => bike.max_power > 40.0,
        };
        3 * u32::from(usage) + 2 * u32::from(terrain) + 2 * u32::from(experience)
    }
}

/// A shortlisted bike and the points it earned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recommendation<'a> {
    pub entry: &'a CatalogEntry,
    pub score: u32,
}

impl Catalog {
    /// Up to `limit` admitted bikes, best score first; ties keep catalog order.
    pub fn recommend(
        &self,
        profile: &RiderProfile,
        limit: usize,
    ) -> VahanResult<Vec<Recommendation<'_>>> {
        profile.validate()?;
        let mut picks: Vec<Recommendation<'_>> = self
            .entries()
            .iter()
            .filter(|e| profile.admits(&e.bike))
            .map(|entry| Recommendation {
                entry,
                score: profile.score(&entry.bike),
            })
            .collect();
        picks.sort_by(|a, b| b.score.cmp(&a.score));
        picks.truncate(limit);
        tracing::debug!(picks = picks.len(), "recommendations ranked");
        Ok(picks)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/recommend.rs"]
mod tests;
