use crate::enums::{Metric, ScenarioId};
use crate::error::DomainError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market inputs for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// LBMA spot price per kilogram.
    pub spot_price_per_kg: Decimal,
    /// Scenario 1 purchase volume per month, in kilograms.
    pub monthly_volume_kg: Decimal,
}

impl MarketParameters {
    pub fn new(spot_price_per_kg: Decimal, monthly_volume_kg: Decimal) -> Result<Self, DomainError> {
        ensure_positive("spot_price_per_kg", spot_price_per_kg)?;
        ensure_positive("monthly_volume_kg", monthly_volume_kg)?;
        Ok(Self {
            spot_price_per_kg,
            monthly_volume_kg,
        })
    }

    /// Builds the parameters from floating-point UI values, rejecting NaN and infinities.
    pub fn from_f64(spot_price_per_kg: f64, monthly_volume_kg: f64) -> Result<Self, DomainError> {
        Self::new(
            decimal_from_f64("spot_price_per_kg", spot_price_per_kg)?,
            decimal_from_f64("monthly_volume_kg", monthly_volume_kg)?,
        )
    }
}

/// Operating-expense inputs for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpexParameters {
    /// Refinery, staff, security and logistics per month (scenario 1).
    pub scenario1_monthly_overhead: Decimal,
    /// Brokerage, legal and insurance per trade (scenario 2).
    pub scenario2_cost_per_trade: Decimal,
}

impl OpexParameters {
    pub fn new(
        scenario1_monthly_overhead: Decimal,
        scenario2_cost_per_trade: Decimal,
    ) -> Result<Self, DomainError> {
        ensure_non_negative("scenario1_monthly_overhead", scenario1_monthly_overhead)?;
        ensure_non_negative("scenario2_cost_per_trade", scenario2_cost_per_trade)?;
        Ok(Self {
            scenario1_monthly_overhead,
            scenario2_cost_per_trade,
        })
    }

    pub fn from_f64(
        scenario1_monthly_overhead: f64,
        scenario2_cost_per_trade: f64,
    ) -> Result<Self, DomainError> {
        Self::new(
            decimal_from_f64("scenario1_monthly_overhead", scenario1_monthly_overhead)?,
            decimal_from_f64("scenario2_cost_per_trade", scenario2_cost_per_trade)?,
        )
    }
}

/// The annualized outcome of one scenario.
///
/// Always satisfies `net_profit == gross_profit - total_opex` and
/// `roi_pct == net_profit / principal * 100`. Losses are reported as negative
/// values and never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: ScenarioId,
    pub gross_profit: Decimal,
    pub total_opex: Decimal,
    pub net_profit: Decimal,
    pub roi_pct: Decimal,
}

impl ScenarioResult {
    /// Returns the value of a single comparison metric.
    pub fn metric(&self, metric: Metric) -> Decimal {
        match metric {
            Metric::GrossProfit => self.gross_profit,
            Metric::TotalOpex => self.total_opex,
            Metric::NetProfit => self.net_profit,
        }
    }
}

/// One (metric, scenario, value) tuple of the gross vs. net comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub scenario: ScenarioId,
    pub value: Decimal,
}

/// Converts a floating-point input, failing on NaN, infinities and values outside the decimal range.
pub fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::invalid_input(field, format!("{value} is not a finite number")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| DomainError::invalid_input(field, format!("{value} is out of range")))
}

/// Fails with `InvalidInput` unless `value > 0`.
pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value <= Decimal::ZERO {
        return Err(DomainError::invalid_input(field, format!("must be greater than zero, got {value}")));
    }
    Ok(())
}

/// Fails with `InvalidInput` if `value < 0`.
pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value < Decimal::ZERO {
        return Err(DomainError::invalid_input(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}
