//! Invariants that must hold whatever the inputs

use super::NOW;
use crate::allocation::allocate;
use crate::amortization::{annuity_payment, schedule};
use crate::config::{AssetBuilder, DebtBuilder, EventBuilder, ProjectionBuilder, ProjectionConfig};
use crate::model::{Asset, AssetClass, ClassValues, Projection, SavingsWarning, Strategy};
use crate::simulation::simulate;

fn sample_targets() -> Vec<ClassValues> {
    vec![
        ClassValues::new(),
        ClassValues::from_pairs([(AssetClass::Stock, 0.5)]),
        ClassValues::from_pairs([(AssetClass::Stock, 60.0), (AssetClass::Cash, 40.0)]),
        ClassValues::from_pairs([(AssetClass::Crypto, 250.0), (AssetClass::Metal, 50.0)]),
        ClassValues::from_pairs([(AssetClass::Stock, -30.0), (AssetClass::Cash, 10.0)]),
        ClassValues::from_pairs([(AssetClass::Stock, f64::NAN), (AssetClass::Metal, 5.0)]),
        ClassValues::from_pairs([(AssetClass::RealEstate, 100.0)]),
    ]
}

fn sample_currents() -> Vec<ClassValues> {
    vec![
        ClassValues::new(),
        ClassValues::from_pairs([(AssetClass::Stock, 10_000.0), (AssetClass::Cash, 10.0)]),
        ClassValues::from_pairs([(AssetClass::Cash, -500.0), (AssetClass::Crypto, 300.0)]),
        ClassValues::from_pairs([(AssetClass::RealEstate, 250_000.0)]),
    ]
}

fn holdings() -> Vec<Asset> {
    ProjectionBuilder::new()
        .asset(AssetBuilder::stock("a").quantity(3.0).price(10.0).cost(20.0))
        .asset(AssetBuilder::stock("b").quantity(1.0).price(50.0).cost(25.0))
        .asset(AssetBuilder::crypto("c").quantity(2.0).price(7.0))
        .build()
        .unwrap()
        .assets
}

/// Cash available right before the investment step of `month`, with no cash yield.
fn cash_before_investment(projection: &Projection, month: usize) -> f64 {
    projection.series[month - 1].buckets[AssetClass::Cash] + projection.series[month].cash_flow
}

#[test]
fn test_p1_never_invests_more_than_cash() {
    let config = ProjectionBuilder::new()
        .horizon_months(36)
        .income("Salary", 1_800.0)
        .expense("Living", 1_650.0)
        .asset(AssetBuilder::cash("Savings").value(400.0))
        .event(EventBuilder::expense("Car").amount(2_500.0).on(2027, 3, 1))
        .event(EventBuilder::income("Bonus").amount(1_000.0).on(2027, 6, 1).yearly())
        .target(AssetClass::Stock, 50.0)
        .target(AssetClass::Cash, 50.0)
        .investment_goal(500.0)
        .build()
        .unwrap();

    for strategy in Strategy::ALL {
        let projection = simulate(&config.with_strategy(strategy), NOW);
        for month in 1..projection.series.len() {
            let available = cash_before_investment(&projection, month).max(0.0);
            let invested = projection.series[month].invested;
            assert!(invested >= 0.0);
            assert!(
                invested <= available + 1e-9,
                "{strategy} month {month}: invested {invested} with {available} available"
            );
        }
    }
}

#[test]
fn test_p2_schedule_converges() {
    for (principal, rate, months) in [
        (200_000.0, 1.6, 300),
        (15_000.0, 4.9, 48),
        (5_000.0, 19.9, 12),
        (1_000.0, 0.0, 7),
    ] {
        let payment = annuity_payment(principal, rate, months);
        let rows = schedule(principal, rate, months, payment);
        assert_eq!(rows.len(), months as usize);
        let last = rows.last().unwrap();
        assert!(last.balance.abs() < 1e-6, "{principal} @ {rate}% over {months}");
    }
}

#[test]
fn test_p3_allocation_is_bounded_and_finite() {
    let holdings = holdings();
    for targets in sample_targets() {
        for current in sample_currents() {
            for amount in [0.0, 0.01, 100.0, 12_345.67] {
                for strategy in Strategy::ALL {
                    let plan = allocate(amount, &current, &targets, strategy, &holdings);
                    for line in &plan.classes {
                        assert!(line.amount.is_finite() && line.amount >= 0.0);
                        assert!(line.target_percent.is_finite());
                    }
                    for line in &plan.holdings {
                        assert!(line.amount.is_finite() && line.amount >= 0.0);
                    }
                    assert!(plan.total() <= amount + 1e-9, "{strategy}: {plan:?}");
                }
            }
        }
    }
}

#[test]
fn test_p3_dca_hands_out_everything() {
    let targets = ClassValues::from_pairs([
        (AssetClass::Stock, 45.0),
        (AssetClass::Crypto, 5.0),
        (AssetClass::Metal, 10.0),
        (AssetClass::Cash, 40.0),
    ]);
    for amount in [1.0, 99.99, 2_500.0] {
        let plan = allocate(amount, &ClassValues::new(), &targets, Strategy::Dca, &[]);
        assert!((plan.total() - amount).abs() < 1e-9);
    }
}

#[test]
fn test_p4_deficit_is_never_downgraded() {
    // Deficit while the loan runs for two more months, surplus afterwards
    let config = ProjectionBuilder::new()
        .income("Salary", 2_000.0)
        .expense("Living", 1_000.0)
        .debt(DebtBuilder::new("Bridge loan").payment(1_500.0).ends(2026, 12, 1))
        .asset(AssetBuilder::cash("Savings").value(10_000.0))
        .target(AssetClass::Stock, 100.0)
        .investment_goal(100.0)
        .build()
        .unwrap();

    for horizon in 1..=24 {
        let projection = simulate(&config.with_horizon(horizon), NOW);
        assert_eq!(
            projection.stats.savings_used,
            SavingsWarning::StructuralDeficit,
            "horizon {horizon}"
        );
    }
}

#[test]
fn test_p5_month_zero_gain_matches_inputs() {
    let config = ProjectionBuilder::new()
        .asset(AssetBuilder::stock("A").quantity(12.0).price(130.0).cost(100.0))
        .asset(AssetBuilder::stock("B").quantity(4.0).price(50.0).cost(75.0))
        .asset(AssetBuilder::metal("Gold").quantity(2.0).price(2_000.0).cost(1_500.0))
        .asset(AssetBuilder::crypto("Coin").quantity(0.5).price(60_000.0))
        .asset(AssetBuilder::real_estate("Flat").value(250_000.0))
        .build()
        .unwrap();

    let expected: f64 = config
        .assets
        .iter()
        .map(|a| a.current_value() - a.cost_basis())
        .sum();
    let projection = simulate(&config, NOW);
    assert_eq!(projection.series[0].unrealized_gain, expected);
    assert_eq!(expected, 360.0 - 100.0 + 1_000.0);
}

#[test]
fn test_same_inputs_same_output() {
    let config: ProjectionConfig = ProjectionBuilder::new()
        .horizon_months(120)
        .income("Salary", 3_100.0)
        .expense("Living", 2_200.0)
        .asset(AssetBuilder::stock("A").quantity(12.0).price(130.0).cost(100.0))
        .event(EventBuilder::expense("Holidays").amount(1_500.0).on(2027, 7, 1).yearly())
        .target(AssetClass::Stock, 80.0)
        .target(AssetClass::Metal, 20.0)
        .yield_rate(AssetClass::Stock, 7.0)
        .yield_rate(AssetClass::Metal, 3.0)
        .investment_goal(700.0)
        .strategy(Strategy::Active)
        .build()
        .unwrap();

    assert_eq!(simulate(&config, NOW), simulate(&config, NOW));
}

#[test]
fn test_buckets_keep_every_class() {
    let projection = simulate(&ProjectionBuilder::new().horizon_months(3).build().unwrap(), NOW);
    for point in &projection.series {
        assert_eq!(point.buckets.iter().count(), AssetClass::COUNT);
    }
}
