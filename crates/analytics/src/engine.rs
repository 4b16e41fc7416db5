use crate::report::Evaluation;
use crate::sensitivity::{compute_sensitivity_grid, SensitivityGrid};
use configuration::{Config, Model, Sensitivity};
use core_types::structs::{ensure_non_negative, ensure_positive};
use core_types::{DomainError, MarketParameters, OpexParameters, ScenarioId, ScenarioResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Discount to spot captured per kilogram under the ROFR agreement (scenario 1).
pub const SCENARIO_ONE_DISCOUNT_RATE: Decimal = dec!(0.08);

/// Margin earned per kilogram on each scenario 2 trade.
pub const SCENARIO_TWO_MARGIN_RATE: Decimal = dec!(0.02);

/// Scenario 2 trades a fixed lot. It is not an input.
pub const FIXED_VOLUME_KG: Decimal = dec!(25);

/// Scenario 2 trade frequency. It is not an input.
pub const TRADES_PER_YEAR: Decimal = dec!(2);

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes the annual result of scenario 1 (monthly purchases at the ROFR discount).
///
/// # Arguments
///
/// * `spot_price` - LBMA spot price per kilogram, must be positive.
/// * `monthly_volume_kg` - Kilograms purchased each month, must be positive.
/// * `monthly_overhead` - Operating cost per month, must not be negative.
/// * `principal` - Capital base for the ROI, must be positive.
///
/// # Returns
///
/// A `ScenarioResult` where `gross_profit = spot * 8% * volume * 12` and
/// `total_opex = overhead * 12`.
pub fn compute_scenario_one(
    spot_price: Decimal,
    monthly_volume_kg: Decimal,
    monthly_overhead: Decimal,
    principal: Decimal,
) -> Result<ScenarioResult, DomainError> {
    ensure_principal(principal)?;
    ensure_positive("spot_price", spot_price)?;
    ensure_positive("monthly_volume_kg", monthly_volume_kg)?;
    ensure_non_negative("monthly_overhead", monthly_overhead)?;

    let gross_profit = checked_product(
        "gross_profit",
        &[spot_price, SCENARIO_ONE_DISCOUNT_RATE, monthly_volume_kg, MONTHS_PER_YEAR],
    )?;
    let total_opex = checked_product("total_opex", &[monthly_overhead, MONTHS_PER_YEAR])?;

    let result = finish(ScenarioId::Venture, gross_profit, total_opex, principal)?;
    tracing::debug!(
        spot = %spot_price,
        volume = %monthly_volume_kg,
        net = %result.net_profit,
        roi = %result.roi_pct,
        "Computed scenario 1"
    );
    Ok(result)
}

/// Computes the annual result of scenario 2 (two fixed 25 kg trades at a 2% margin).
///
/// Volume and frequency are the `FIXED_VOLUME_KG` and `TRADES_PER_YEAR`
/// constants, so the result does not depend on scenario 1's monthly volume.
pub fn compute_scenario_two(
    spot_price: Decimal,
    cost_per_trade: Decimal,
    principal: Decimal,
) -> Result<ScenarioResult, DomainError> {
    ensure_principal(principal)?;
    ensure_positive("spot_price", spot_price)?;
    ensure_non_negative("cost_per_trade", cost_per_trade)?;

    let gross_profit = checked_product(
        "gross_profit",
        &[spot_price, SCENARIO_TWO_MARGIN_RATE, FIXED_VOLUME_KG, TRADES_PER_YEAR],
    )?;
    let total_opex = checked_product("total_opex", &[cost_per_trade, TRADES_PER_YEAR])?;

    let result = finish(ScenarioId::Dubai, gross_profit, total_opex, principal)?;
    tracing::debug!(
        spot = %spot_price,
        net = %result.net_profit,
        roi = %result.roi_pct,
        "Computed scenario 2"
    );
    Ok(result)
}

/// Derives net profit and ROI from the gross and cost figures.
fn finish(
    scenario: ScenarioId,
    gross_profit: Decimal,
    total_opex: Decimal,
    principal: Decimal,
) -> Result<ScenarioResult, DomainError> {
    let net_profit = gross_profit
        .checked_sub(total_opex)
        .ok_or_else(|| overflow("net_profit"))?;
    let roi_pct = net_profit
        .checked_div(principal)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| overflow("roi_pct"))?;

    Ok(ScenarioResult {
        scenario,
        gross_profit,
        total_opex,
        net_profit,
        roi_pct,
    })
}

fn ensure_principal(principal: Decimal) -> Result<(), DomainError> {
    if principal <= Decimal::ZERO {
        return Err(DomainError::InvalidPrincipal(principal));
    }
    Ok(())
}

/// Multiplies left to right, reporting decimal overflow as invalid input.
pub(crate) fn checked_product(
    field: &'static str,
    factors: &[Decimal],
) -> Result<Decimal, DomainError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| overflow(field))
}

pub(crate) fn overflow(field: &'static str) -> DomainError {
    DomainError::invalid_input(field, "value is too large to represent")
}

/// Runs both scenarios and the sensitivity grid with a fixed principal and grid shape.
#[derive(Debug, Clone)]
pub struct ScenarioModel {
    principal: Decimal,
    sensitivity: Sensitivity,
}

impl ScenarioModel {
    /// Creates a model from the `[model]` and `[sensitivity]` settings.
    pub fn new(model: &Model, sensitivity: &Sensitivity) -> Result<Self, DomainError> {
        ensure_principal(model.principal)?;
        Ok(Self {
            principal: model.principal,
            sensitivity: sensitivity.clone(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        Self::new(&config.model, &config.sensitivity)
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn scenario_one(
        &self,
        market: &MarketParameters,
        opex: &OpexParameters,
    ) -> Result<ScenarioResult, DomainError> {
        compute_scenario_one(
            market.spot_price_per_kg,
            market.monthly_volume_kg,
            opex.scenario1_monthly_overhead,
            self.principal,
        )
    }

    pub fn scenario_two(
        &self,
        market: &MarketParameters,
        opex: &OpexParameters,
    ) -> Result<ScenarioResult, DomainError> {
        compute_scenario_two(
            market.spot_price_per_kg,
            opex.scenario2_cost_per_trade,
            self.principal,
        )
    }

    /// Builds the scenario 1 grid around the current spot price, holding volume and overhead fixed.
    pub fn sensitivity_grid(
        &self,
        market: &MarketParameters,
        opex: &OpexParameters,
    ) -> Result<SensitivityGrid, DomainError> {
        let annual_overhead = checked_product(
            "annual_overhead",
            &[opex.scenario1_monthly_overhead, MONTHS_PER_YEAR],
        )?;
        compute_sensitivity_grid(
            market.spot_price_per_kg,
            market.monthly_volume_kg,
            annual_overhead,
            &self.sensitivity.discount_rates,
            self.sensitivity.price_spread_fraction,
            self.sensitivity.grid_size,
        )
    }

    /// The main entry point: evaluates both scenarios and the sensitivity grid.
    pub fn evaluate(
        &self,
        market: &MarketParameters,
        opex: &OpexParameters,
    ) -> Result<Evaluation, DomainError> {
        let scenario_one = self.scenario_one(market, opex)?;
        let scenario_two = self.scenario_two(market, opex)?;
        let sensitivity = self.sensitivity_grid(market, opex)?;

        Ok(Evaluation {
            principal: self.principal,
            market: *market,
            opex: *opex,
            scenario_one,
            scenario_two,
            sensitivity,
        })
    }
}

impl Default for ScenarioModel {
    fn default() -> Self {
        Self {
            principal: Model::default().principal,
            sensitivity: Sensitivity::default(),
        }
    }
}
