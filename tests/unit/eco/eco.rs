use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn default_electric_commute() {
    let r = Commute::default().impact().unwrap();
    assert!(close(r.total_km, 54_750.0));
    assert!(close(r.co2_kg, 1_642.5));
    assert!(close(r.co2_saved_kg, 4_927.5));
    assert!(close(r.energy_cost, 43_800.0));
    assert!(close(r.cost_saved, 93_075.0));
    assert!(close(r.trees_equivalent, 4_927.5 / 110.0));
    assert_eq!(r.eco_score, 94);
}

#[test]
fn petrol_is_its_own_baseline() {
    let r = Commute {
        fuel_type: FuelType::Petrol,
        daily_km: 50.0,
        years: 2,
    }
    .impact()
    .unwrap();
    assert!(close(r.co2_saved_kg, 0.0));
    assert!(close(r.cost_saved, 0.0));
    assert!(close(r.trees_equivalent, 0.0));
    assert_eq!(r.eco_score, 68);
}

#[test]
fn hybrid_saves_co2_but_costs_more_to_fuel() {
    let r = Commute {
        fuel_type: FuelType::Hybrid,
        daily_km: 40.0,
        years: 1,
    }
    .impact()
    .unwrap();
    assert!(close(r.co2_saved_kg, 14_600.0 * 0.05));
    assert!(r.cost_saved < 0.0);
    assert_eq!(r.eco_score, 83);
}

#[test]
fn score_is_clamped_for_extreme_usage() {
    let r = Commute {
        fuel_type: FuelType::Petrol,
        daily_km: 5_000.0,
        years: 1,
    }
    .impact()
    .unwrap();
    assert_eq!(r.eco_score, 0);
}

#[test]
fn rejects_bad_inputs() {
    let zero_years = Commute {
        years: 0,
        ..Commute::default()
    };
    assert!(zero_years.impact().is_err());
    let negative = Commute {
        daily_km: -1.0,
        ..Commute::default()
    };
    assert!(negative.impact().is_err());
}
