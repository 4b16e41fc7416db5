//! # Aurum Scenario Model
//!
//! This crate computes the annual profitability of the two gold-trading
//! scenarios and the price/discount-rate sensitivity grid for scenario 1.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of price feeds,
//!   terminals or files. It depends only on `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** Every operation is a deterministic function of its inputs.
//!   The `ScenarioModel` only carries the configured principal and grid shape.
//!
//! ## Public API
//!
//! - `compute_scenario_one`, `compute_scenario_two`, `compute_sensitivity_grid`: the raw calculations.
//! - `ScenarioModel`: runs all of them for one set of inputs and returns an `Evaluation`.
//! - `SensitivityGrid`: net profit indexed by (discount rate, price).
//! - `DomainError`: returned for invalid numeric input.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;
pub mod sensitivity;

// Re-export the key components to create a clean, public-facing API.
pub use core_types::DomainError;
pub use engine::{
    compute_scenario_one, compute_scenario_two, ScenarioModel, FIXED_VOLUME_KG,
    MONTHS_PER_YEAR, SCENARIO_ONE_DISCOUNT_RATE, SCENARIO_TWO_MARGIN_RATE, TRADES_PER_YEAR,
};
pub use report::{comparison_rows, Evaluation};
pub use sensitivity::{compute_sensitivity_grid, price_axis, SensitivityGrid};
