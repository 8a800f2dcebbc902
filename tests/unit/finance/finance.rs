use super::*;

#[test]
fn payment_round_trips_through_present_value() {
    for &(p, rate, n) in &[
        (148_500.0, 9.5, 24),
        (100_000.0, 12.0, 36),
        (64_800.0, 0.5, 6),
        (1.0, 30.0, 120),
    ] {
        let terms = LoanTerms::new(p, rate, n).unwrap();
        let m = terms.monthly_payment();
        let back = present_value(m, terms.monthly_rate(), n);
        assert!((back - p).abs() <= p * 1e-9, "{p} {rate} {n}: {back}");
    }
}

#[test]
fn known_value_matches_calculator() {
    // 90% of 165,000 at 9.5% over 24 months.
    let terms = LoanTerms::for_price(165_000, &GalleryConfig::default());
    assert_eq!(terms.principal, 148_500.0);
    assert_eq!(terms.tenure_months, 24);
    assert_eq!(terms.monthly_payment_rounded(), 6818);
    assert_eq!(terms.total_payable(), 6818.0 * 24.0);
    assert!((terms.total_interest() - (6818.0 * 24.0 - 148_500.0)).abs() < 1e-9);
}

#[test]
fn zero_rate_splits_evenly() {
    let terms = LoanTerms::new(12_000.0, 0.0, 12).unwrap();
    assert_eq!(terms.monthly_payment(), 1000.0);
    assert_eq!(present_value(1000.0, 0.0, 12), 12_000.0);
}

#[test]
fn invalid_terms_are_rejected() {
    assert!(LoanTerms::new(-1.0, 9.5, 12).is_err());
    assert!(LoanTerms::new(1000.0, f64::NAN, 12).is_err());
    assert!(LoanTerms::new(1000.0, 9.5, 0).is_err());
}

#[test]
fn schedule_amortizes_to_zero() {
    let terms = LoanTerms::new(50_000.0, 10.0, 12).unwrap();
    let rows = terms.schedule();
    assert_eq!(rows.len(), 12);
    assert!(rows.last().unwrap().balance.abs() < 1e-6);
    let paid: f64 = rows.iter().map(|r| r.principal).sum();
    assert!((paid - 50_000.0).abs() < 1e-6);
    assert!(rows[0].interest > rows[11].interest);
}
