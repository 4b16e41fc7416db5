use serde::{Deserialize, Serialize};
use std::fmt;

/// The two business scenarios being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Scenario 1: monthly ROFR purchases at a discount to spot.
    Venture,
    /// Scenario 2: two fixed-size trades per year at a thin margin.
    Dubai,
}

impl ScenarioId {
    /// Returns the label used on dashboards and charts.
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioId::Venture => "Venture (S1)",
            ScenarioId::Dubai => "Dubai (S2)",
        }
    }

    /// Returns the short code ("S1" / "S2").
    pub fn code(&self) -> &'static str {
        match self {
            ScenarioId::Venture => "S1",
            ScenarioId::Dubai => "S2",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The metrics exposed in the gross vs. net comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    GrossProfit,
    TotalOpex,
    NetProfit,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::GrossProfit => "Gross Profit",
            Metric::TotalOpex => "OpEx (Annual)",
            Metric::NetProfit => "Net Profit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
