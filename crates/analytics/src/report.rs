use crate::sensitivity::SensitivityGrid;
use core_types::{ComparisonRow, MarketParameters, Metric, OpexParameters, ScenarioResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// The complete output of one `ScenarioModel::evaluate` call.
///
/// This struct is the data transfer object handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub principal: Decimal,
    pub market: MarketParameters,
    pub opex: OpexParameters,
    pub scenario_one: ScenarioResult,
    pub scenario_two: ScenarioResult,
    pub sensitivity: SensitivityGrid,
}

impl Evaluation {
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        comparison_rows(&self.scenario_one, &self.scenario_two)
    }
}

/// Flattens two scenario results into (metric, scenario, value) rows for charting.
///
/// Rows are grouped by metric (gross, opex, net), each listing scenario 1 before scenario 2.
pub fn comparison_rows(first: &ScenarioResult, second: &ScenarioResult) -> Vec<ComparisonRow> {
    [Metric::GrossProfit, Metric::TotalOpex, Metric::NetProfit]
        .into_iter()
        .flat_map(|metric| {
            [first, second].map(|result| ComparisonRow {
                metric,
                scenario: result.scenario,
                value: result.metric(metric),
            })
        })
        .collect()
}
