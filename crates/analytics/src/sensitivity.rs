use crate::engine::{checked_product, overflow, MONTHS_PER_YEAR};
use core_types::structs::{ensure_non_negative, ensure_positive};
use core_types::DomainError;
use rust_decimal::Decimal;
use serde::Serialize;

/// Net annual profit of scenario 1 across hypothetical prices and discount rates.
///
/// Rows follow `discount_rates`, columns follow `prices`, and
/// `cells[row][col]` is the net profit at that (rate, price) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityGrid {
    discount_rates: Vec<Decimal>,
    prices: Vec<Decimal>,
    cells: Vec<Vec<Decimal>>,
}

impl SensitivityGrid {
    pub fn discount_rates(&self) -> &[Decimal] {
        &self.discount_rates
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    pub fn cells(&self) -> &[Vec<Decimal>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Decimal> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Looks up a cell by its axis keys.
    pub fn value_at(&self, rate: Decimal, price: Decimal) -> Option<Decimal> {
        let row = self.discount_rates.iter().position(|r| *r == rate)?;
        let col = self.prices.iter().position(|p| *p == price)?;
        self.cell(row, col)
    }

    /// Iterates over `(rate, row of cells)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (Decimal, &[Decimal])> {
        self.discount_rates
            .iter()
            .copied()
            .zip(self.cells.iter().map(Vec::as_slice))
    }
}

/// Returns `grid_size` prices evenly spaced over `base * (1 ± spread)`, endpoints included.
///
/// Each point is computed as an offset from `base`, so both endpoints and
/// (for odd sizes) the centre column are exact.
pub fn price_axis(
    base_price: Decimal,
    price_spread_fraction: Decimal,
    grid_size: usize,
) -> Result<Vec<Decimal>, DomainError> {
    ensure_positive("base_price", base_price)?;
    if price_spread_fraction <= Decimal::ZERO || price_spread_fraction >= Decimal::ONE {
        return Err(DomainError::invalid_input(
            "price_spread_fraction",
            format!("must be between 0 and 1, got {price_spread_fraction}"),
        ));
    }
    if grid_size < 2 {
        return Err(DomainError::invalid_input(
            "grid_size",
            format!("must be at least 2, got {grid_size}"),
        ));
    }

    let half_width = base_price
        .checked_mul(price_spread_fraction)
        .ok_or_else(|| overflow("base_price"))?;
    let intervals = (grid_size - 1) as i64;

    (0..grid_size as i64)
        .map(|i| {
            // Ranges from -intervals to +intervals in steps of two.
            let position = Decimal::from(2 * i - intervals);
            half_width
                .checked_mul(position)
                .and_then(|offset| offset.checked_div(Decimal::from(intervals)))
                .and_then(|offset| base_price.checked_add(offset))
                .ok_or_else(|| overflow("price_axis"))
        })
        .collect()
}

/// Builds the scenario 1 net-profit grid.
///
/// # Arguments
///
/// * `base_price` - Centre of the price axis, must be positive.
/// * `monthly_volume_kg` - Held fixed across the grid, must be positive.
/// * `annual_overhead` - Subtracted from every cell, must not be negative.
/// * `discount_rates` - Row keys in display order, non-empty and non-negative.
/// * `price_spread_fraction` - Half-width of the price axis, in `(0, 1)`.
/// * `grid_size` - Number of price columns, at least 2.
///
/// # Returns
///
/// A `SensitivityGrid` whose cell at `(rate, price)` is
/// `price * rate * monthly_volume_kg * 12 - annual_overhead`.
///
/// # Errors
///
/// Besides non-positive `base_price`, `monthly_volume_kg` and negative
/// `annual_overhead`, also rejects an empty or negative rate list, a spread
/// of 0 or at least 1, and fewer than 2 columns.
pub fn compute_sensitivity_grid(
    base_price: Decimal,
    monthly_volume_kg: Decimal,
    annual_overhead: Decimal,
    discount_rates: &[Decimal],
    price_spread_fraction: Decimal,
    grid_size: usize,
) -> Result<SensitivityGrid, DomainError> {
    ensure_positive("monthly_volume_kg", monthly_volume_kg)?;
    ensure_non_negative("annual_overhead", annual_overhead)?;
    if discount_rates.is_empty() {
        return Err(DomainError::invalid_input(
            "discount_rates",
            "at least one discount rate is required",
        ));
    }
    for rate in discount_rates {
        ensure_non_negative("discount_rates", *rate)?;
    }

    let prices = price_axis(base_price, price_spread_fraction, grid_size)?;

    let cells = discount_rates
        .iter()
        .map(|rate| {
            prices
                .iter()
                .map(|price| {
                    checked_product(
                        "sensitivity_cell",
                        &[*price, *rate, monthly_volume_kg, MONTHS_PER_YEAR],
                    )?
                    .checked_sub(annual_overhead)
                    .ok_or_else(|| overflow("sensitivity_cell"))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        rows = discount_rates.len(),
        columns = prices.len(),
        base_price = %base_price,
        "Computed sensitivity grid"
    );

    Ok(SensitivityGrid {
        discount_rates: discount_rates.to_vec(),
        prices,
        cells,
    })
}
