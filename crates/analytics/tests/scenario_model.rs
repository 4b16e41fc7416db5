//! Integration tests for the scenario model.
//!
//! Verifies the accounting identities, the scenario 2 volume insensitivity
//! and the agreement between scenario 1 and the sensitivity grid.

use analytics::{
    compute_scenario_one, compute_scenario_two, compute_sensitivity_grid, DomainError,
    ScenarioModel, SCENARIO_ONE_DISCOUNT_RATE,
};
use configuration::{Config, Model, Sensitivity};
use core_types::{MarketParameters, OpexParameters, ScenarioResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Spot prices and volumes across and slightly beyond the slider ranges.
fn sample_markets() -> Vec<MarketParameters> {
    let prices = [dec!(120000), dec!(130000.50), dec!(155000), dec!(187654.32), dec!(200000)];
    let volumes = [dec!(1), dec!(10), dec!(25), dec!(33.3), dec!(50)];
    prices
        .iter()
        .flat_map(|p| volumes.iter().map(move |v| MarketParameters::new(*p, *v).unwrap()))
        .collect()
}

fn sample_opex() -> Vec<OpexParameters> {
    [
        (dec!(0), dec!(0)),
        (dec!(35000), dec!(7500)),
        (dec!(500000), dec!(99999.99)),
    ]
    .into_iter()
    .map(|(overhead, cost)| OpexParameters::new(overhead, cost).unwrap())
    .collect()
}

fn assert_identities(result: &ScenarioResult, principal: Decimal) {
    assert_eq!(result.net_profit, result.gross_profit - result.total_opex);
    assert_eq!(result.roi_pct, result.net_profit / principal * dec!(100));
}

#[test]
fn net_profit_and_roi_identities_hold_for_all_samples() {
    let model = ScenarioModel::default();
    for market in sample_markets() {
        for opex in sample_opex() {
            let evaluation = model.evaluate(&market, &opex).unwrap();
            assert_identities(&evaluation.scenario_one, evaluation.principal);
            assert_identities(&evaluation.scenario_two, evaluation.principal);
        }
    }
}

#[test]
fn scenario_two_ignores_monthly_volume() {
    let model = ScenarioModel::default();
    let opex = OpexParameters::new(dec!(35000), dec!(7500)).unwrap();

    let low = MarketParameters::new(dec!(155000), dec!(10)).unwrap();
    let high = MarketParameters::new(dec!(155000), dec!(50)).unwrap();

    let s2_low = model.scenario_two(&low, &opex).unwrap();
    let s2_high = model.scenario_two(&high, &opex).unwrap();
    assert_eq!(s2_low.gross_profit, s2_high.gross_profit);
    assert_eq!(s2_low.total_opex, s2_high.total_opex);
    assert_eq!(s2_low, s2_high);

    // Scenario 1 does react to the same change.
    let s1_low = model.scenario_one(&low, &opex).unwrap();
    let s1_high = model.scenario_one(&high, &opex).unwrap();
    assert!(s1_high.gross_profit > s1_low.gross_profit);
}

#[test]
fn grid_centre_column_is_the_spot_price_and_columns_increase() {
    let model = ScenarioModel::default();
    let opex = OpexParameters::new(dec!(35000), dec!(7500)).unwrap();
    for market in sample_markets() {
        let grid = model.sensitivity_grid(&market, &opex).unwrap();
        let prices = grid.prices();
        assert_eq!(prices.len(), 5);
        assert_eq!(prices[2], market.spot_price_per_kg);
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn default_grid_price_axis() {
    let grid = compute_sensitivity_grid(
        dec!(155000),
        dec!(25),
        dec!(420000),
        &[dec!(0.06), dec!(0.07), dec!(0.08), dec!(0.09), dec!(0.10)],
        dec!(0.2),
        5,
    )
    .unwrap();
    assert_eq!(
        grid.prices(),
        &[dec!(124000), dec!(139500), dec!(155000), dec!(170500), dec!(186000)]
    );
}

#[test]
fn grid_agrees_with_scenario_one_at_the_rofr_rate() {
    let model = ScenarioModel::default();
    for market in sample_markets() {
        for opex in sample_opex() {
            let evaluation = model.evaluate(&market, &opex).unwrap();
            let s1 = &evaluation.scenario_one;
            let cell = evaluation
                .sensitivity
                .value_at(SCENARIO_ONE_DISCOUNT_RATE, market.spot_price_per_kg)
                .unwrap();
            assert_eq!(cell, s1.gross_profit - s1.total_opex);
        }
    }
}

#[test]
fn dashboard_scenarios() {
    let s1 = compute_scenario_one(dec!(155000), dec!(25), dec!(35000), dec!(870000)).unwrap();
    assert_eq!(s1.gross_profit, dec!(3720000));
    assert_eq!(s1.total_opex, dec!(420000));
    assert_eq!(s1.net_profit, dec!(3300000));
    assert_eq!(s1.roi_pct.round_dp(1), dec!(379.3));

    let s2 = compute_scenario_two(dec!(155000), dec!(7500), dec!(870000)).unwrap();
    assert_eq!(s2.gross_profit, dec!(155000));
    assert_eq!(s2.total_opex, dec!(15000));
    assert_eq!(s2.net_profit, dec!(140000));
    assert_eq!(s2.roi_pct.round_dp(1), dec!(16.1));
}

#[test]
fn zero_principal_fails_both_scenarios() {
    assert!(matches!(
        compute_scenario_one(dec!(155000), dec!(25), dec!(35000), dec!(0)),
        Err(DomainError::InvalidPrincipal(_))
    ));
    assert!(matches!(
        compute_scenario_two(dec!(155000), dec!(7500), dec!(0)),
        Err(DomainError::InvalidPrincipal(_))
    ));
}

#[test]
fn model_uses_configured_grid_shape() {
    let mut config = Config::default();
    config.sensitivity = Sensitivity {
        discount_rates: vec![dec!(0.05), dec!(0.08), dec!(0.12)],
        price_spread_fraction: dec!(0.1),
        grid_size: 3,
    };
    config.model = Model {
        principal: dec!(500000),
    };
    let model = ScenarioModel::from_config(&config).unwrap();

    let market = MarketParameters::new(dec!(150000), dec!(20)).unwrap();
    let opex = OpexParameters::new(dec!(10000), dec!(5000)).unwrap();
    let evaluation = model.evaluate(&market, &opex).unwrap();

    assert_eq!(evaluation.principal, dec!(500000));
    assert_eq!(evaluation.sensitivity.discount_rates().len(), 3);
    assert_eq!(
        evaluation.sensitivity.prices(),
        &[dec!(135000), dec!(150000), dec!(165000)]
    );
    assert_eq!(evaluation.comparison().len(), 6);
}

#[test]
fn evaluation_serializes_for_json_output() {
    let model = ScenarioModel::default();
    let market = MarketParameters::new(dec!(155000), dec!(25)).unwrap();
    let opex = OpexParameters::new(dec!(35000), dec!(7500)).unwrap();
    let evaluation = model.evaluate(&market, &opex).unwrap();

    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["scenario_one"]["scenario"], "Venture");
    assert_eq!(json["sensitivity"]["cells"].as_array().unwrap().len(), 5);
}
