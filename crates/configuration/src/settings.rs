use crate::error::ConfigError;
use core_types::{MarketParameters, OpexParameters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Fixed capital base used as the ROI denominator for both scenarios.
pub const DEFAULT_PRINCIPAL: Decimal = dec!(870000);

/// Discount rates swept by the sensitivity grid (rows).
pub const DEFAULT_DISCOUNT_RATES: [Decimal; 5] =
    [dec!(0.06), dec!(0.07), dec!(0.08), dec!(0.09), dec!(0.10)];

/// Half-width of the price axis as a fraction of the base price.
pub const DEFAULT_PRICE_SPREAD_FRACTION: Decimal = dec!(0.2);

/// Number of price columns in the sensitivity grid.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: Model,
    pub sensitivity: Sensitivity,
    pub inputs: Inputs,
    pub price_feed: PriceFeed,
    pub logging: Logging,
}

impl Config {
    /// Rejects settings that would make every evaluation fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.principal <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "model.principal must be greater than 0".to_string(),
            ));
        }
        self.sensitivity.validate()?;
        self.inputs.bounds.validate()?;
        if self.price_feed.spot_price_per_kg <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "price_feed.spot_price_per_kg must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the scenario model itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Model {
    /// The capital base both scenarios are measured against.
    pub principal: Decimal,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL,
        }
    }
}

/// Shape of the scenario 1 price/discount-rate sensitivity grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sensitivity {
    /// Row keys, in display order.
    pub discount_rates: Vec<Decimal>,
    /// The price axis spans `base * (1 - f)` to `base * (1 + f)`.
    pub price_spread_fraction: Decimal,
    /// Number of price columns, endpoints included.
    pub grid_size: usize,
}

impl Sensitivity {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.discount_rates.is_empty() {
            return Err(ConfigError::ValidationError(
                "sensitivity.discount_rates must not be empty".to_string(),
            ));
        }
        if let Some(rate) = self.discount_rates.iter().find(|r| **r < Decimal::ZERO) {
            return Err(ConfigError::ValidationError(format!(
                "sensitivity.discount_rates contains a negative rate: {rate}"
            )));
        }
        if self.price_spread_fraction <= Decimal::ZERO || self.price_spread_fraction >= Decimal::ONE {
            return Err(ConfigError::ValidationError(
                "sensitivity.price_spread_fraction must be between 0 and 1".to_string(),
            ));
        }
        if self.grid_size < 2 {
            return Err(ConfigError::ValidationError(
                "sensitivity.grid_size must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            discount_rates: DEFAULT_DISCOUNT_RATES.to_vec(),
            price_spread_fraction: DEFAULT_PRICE_SPREAD_FRACTION,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Default values and accepted ranges for the user-facing inputs.
///
/// The spot price has no default here; it comes from the price feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub monthly_volume_kg: Decimal,
    pub scenario1_monthly_overhead: Decimal,
    pub scenario2_cost_per_trade: Decimal,
    pub bounds: InputBounds,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            monthly_volume_kg: dec!(25),
            scenario1_monthly_overhead: dec!(35000),
            scenario2_cost_per_trade: dec!(7500),
            bounds: InputBounds::default(),
        }
    }
}

/// Slider ranges enforced before the model is invoked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub min_spot_price: Decimal,
    pub max_spot_price: Decimal,
    pub min_monthly_volume_kg: Decimal,
    pub max_monthly_volume_kg: Decimal,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min_spot_price: dec!(120000),
            max_spot_price: dec!(200000),
            min_monthly_volume_kg: dec!(10),
            max_monthly_volume_kg: dec!(50),
        }
    }
}

impl InputBounds {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_spot_price > self.max_spot_price {
            return Err(ConfigError::ValidationError(
                "inputs.bounds.min_spot_price must not exceed max_spot_price".to_string(),
            ));
        }
        if self.min_monthly_volume_kg > self.max_monthly_volume_kg {
            return Err(ConfigError::ValidationError(
                "inputs.bounds.min_monthly_volume_kg must not exceed max_monthly_volume_kg"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Checks market inputs against the slider ranges.
    pub fn check_market(&self, market: &MarketParameters) -> Result<(), ConfigError> {
        check_range(
            "spot_price_per_kg",
            market.spot_price_per_kg,
            self.min_spot_price,
            self.max_spot_price,
        )?;
        check_range(
            "monthly_volume_kg",
            market.monthly_volume_kg,
            self.min_monthly_volume_kg,
            self.max_monthly_volume_kg,
        )
    }

    /// OpEx fields are number inputs with no upper bound.
    pub fn check_opex(&self, opex: &OpexParameters) -> Result<(), ConfigError> {
        check_range(
            "scenario1_monthly_overhead",
            opex.scenario1_monthly_overhead,
            Decimal::ZERO,
            Decimal::MAX,
        )?;
        check_range(
            "scenario2_cost_per_trade",
            opex.scenario2_cost_per_trade,
            Decimal::ZERO,
            Decimal::MAX,
        )
    }
}

fn check_range(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::InputOutOfBounds {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Settings for the stub spot-price feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceFeed {
    /// The constant quoted by the stub source.
    pub spot_price_per_kg: Decimal,
    /// How long a quote is reused before the source is asked again.
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self {
            spot_price_per_kg: dec!(155000),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: LogLevel,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}
