//! Environmental impact of a powertrain over an ownership period, measured against a petrol
//! commuter covering the same distance.

use crate::catalog::FuelType;
use crate::foundation::error::{VahanError, VahanResult};

const DAYS_PER_YEAR: f64 = 365.0;
const TREE_KG_CO2_PER_YEAR: f64 = 22.0;

const PETROL_KG_CO2_PER_KM: f64 = 0.12;
const PETROL_PRICE_PER_L: f64 = 100.0;
const PETROL_KM_PER_L: f64 = 40.0;

const ELECTRIC_KG_CO2_PER_KM: f64 = 0.03;
const ELECTRIC_PRICE_PER_KWH: f64 = 8.0;
const ELECTRIC_KM_PER_KWH: f64 = 10.0;

const HYBRID_KG_CO2_PER_KM: f64 = 0.07;
const HYBRID_KM_PER_L: f64 = 25.0;
const HYBRID_FUEL_COST_FACTOR: f64 = 0.7;

/// Riding pattern to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Commute {
    pub fuel_type: FuelType,
    pub daily_km: f64,
    pub years: u32,
}

impl Default for Commute {
    fn default() -> Self {
        Self {
            fuel_type: FuelType::Electric,
            daily_km: 30.0,
            years: 5,
        }
    }
}

/// Outcome of [`Commute::impact`]. Savings are negative when the choice is worse than petrol.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EcoImpact {
    pub total_km: f64,
    pub co2_kg: f64,
    pub energy_cost: f64,
    pub co2_saved_kg: f64,
    pub cost_saved: f64,
    pub trees_equivalent: f64,
    /// 0..=100.
    pub eco_score: u8,
}

fn footprint(fuel: FuelType, km: f64) -> (f64, f64) {
    match fuel {
        FuelType::Petrol => (
            km * PETROL_KG_CO2_PER_KM,
            km / PETROL_KM_PER_L * PETROL_PRICE_PER_L,
        ),
        FuelType::Electric => (
            km * ELECTRIC_KG_CO2_PER_KM,
            km / ELECTRIC_KM_PER_KWH * ELECTRIC_PRICE_PER_KWH,
        ),
        FuelType::Hybrid => (
            km * HYBRID_KG_CO2_PER_KM,
            km / HYBRID_KM_PER_L * PETROL_PRICE_PER_L * HYBRID_FUEL_COST_FACTOR,
        ),
    }
}

impl Commute {
    pub fn validate(&self) -> VahanResult<()> {
        if !self.daily_km.is_finite() || self.daily_km < 0.0 {
            return Err(VahanError::validation("daily_km must be finite and >= 0"));
        }
        if self.years == 0 {
            return Err(VahanError::validation("years must be >= 1"));
        }
        Ok(())
    }

    pub fn impact(&self) -> VahanResult<EcoImpact> {
        self.validate()?;
        let years = f64::from(self.years);
        let total_km = self.daily_km * DAYS_PER_YEAR * years;

        let (co2_kg, energy_cost) = footprint(self.fuel_type, total_km);
        let (petrol_co2, petrol_cost) = footprint(FuelType::Petrol, total_km);
        let co2_saved_kg = petrol_co2 - co2_kg;

        let base = match self.fuel_type {
            FuelType::Electric => 90.0,
            FuelType::Hybrid => 70.0,
            FuelType::Petrol => 40.0,
        };
        // Heavier daily use lowers the score.
        let usage = 100.0 - self.daily_km / 10.0;
        let eco_score = ((base + usage) / 2.0).round().clamp(0.0, 100.0) as u8;

        Ok(EcoImpact {
            total_km,
            co2_kg,
            energy_cost,
            co2_saved_kg,
            cost_saved: petrol_cost - energy_cost,
            trees_equivalent: co2_saved_kg / (TREE_KG_CO2_PER_YEAR * years),
            eco_score,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/eco/eco.rs"]
mod tests;
