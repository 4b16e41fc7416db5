use analytics::{Evaluation, SensitivityGrid};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::{ComparisonRow, Metric, ScenarioId, ScenarioResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Formats a money value as whole dollars with thousands separators, e.g. `$3,300,000`.
///
/// Losses keep the sign after the dollar mark, as the dashboard shows them: `$-45,000`.
pub fn format_currency(value: Decimal) -> String {
    format!("${}", group_thousands(&value.round_dp(0).trunc().to_string()))
}

/// `379.3% NET ROI`
pub fn format_roi(roi_pct: Decimal) -> String {
    format!("{:.1}% NET ROI", roi_pct.round_dp(1))
}

/// Heatmap column label in thousands, e.g. `$124k`.
pub fn price_label(price: Decimal) -> String {
    let thousands = (price / dec!(1000)).round_dp(0);
    format!("${}k", group_thousands(&thousands.trunc().to_string()))
}

/// Heatmap row label as a whole percentage, e.g. `6%`.
pub fn rate_label(rate: Decimal) -> String {
    format!("{:.0}%", (rate * dec!(100)).round_dp(0))
}

/// Heatmap cell value in millions with two decimals.
pub fn format_millions(value: Decimal) -> String {
    format!("{:.2}", (value / dec!(1000000)).round_dp(2))
}

/// How many times scenario 1's ROI exceeds scenario 2's.
///
/// Display-only narrative figure: a ratio of two percentages. `None` when
/// scenario 2's ROI is zero.
pub fn capital_efficiency_multiple(first: &ScenarioResult, second: &ScenarioResult) -> Option<Decimal> {
    first.roi_pct.checked_div(second.roi_pct)
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn money_cell(value: Decimal) -> Cell {
    let cell = Cell::new(format_currency(value)).set_alignment(CellAlignment::Right);
    if value < Decimal::ZERO {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// The bottom-line cards: net annual profit and ROI per scenario.
pub fn render_cards(evaluation: &Evaluation) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new(format!("{}: Net Annual Profit", ScenarioId::Venture.code())),
        Cell::new(format!("{}: Net Annual Profit", ScenarioId::Dubai.code())),
    ]);
    table.add_row(vec![
        Cell::new("Net Profit"),
        money_cell(evaluation.scenario_one.net_profit),
        money_cell(evaluation.scenario_two.net_profit),
    ]);
    table.add_row(vec![
        Cell::new("Return"),
        Cell::new(format_roi(evaluation.scenario_one.roi_pct)).fg(Color::Green),
        Cell::new(format_roi(evaluation.scenario_two.roi_pct)).fg(Color::Green),
    ]);
    table
}

/// Gross vs. net breakdown, one row per metric and one column per scenario.
pub fn render_comparison(rows: &[ComparisonRow]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Metric"),
        Cell::new(ScenarioId::Venture.label()),
        Cell::new(ScenarioId::Dubai.label()),
    ]);

    for metric in [Metric::GrossProfit, Metric::TotalOpex, Metric::NetProfit] {
        let value_for = |scenario: ScenarioId| {
            rows.iter()
                .find(|r| r.metric == metric && r.scenario == scenario)
                .map(|r| money_cell(r.value))
                .unwrap_or_else(|| Cell::new("-"))
        };
        table.add_row(vec![
            Cell::new(metric.label()),
            value_for(ScenarioId::Venture),
            value_for(ScenarioId::Dubai),
        ]);
    }
    table
}

/// Net profit sensitivity matrix in $M: discount rates down, prices across.
pub fn render_heatmap(grid: &SensitivityGrid) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Rate \\ Price")];
    header.extend(grid.prices().iter().map(|p| Cell::new(price_label(*p))));
    table.set_header(header);

    for (rate, cells) in grid.rows() {
        let mut row = vec![Cell::new(rate_label(rate))];
        row.extend(cells.iter().map(|value| {
            let cell = Cell::new(format_millions(*value)).set_alignment(CellAlignment::Right);
            if *value < Decimal::ZERO {
                cell.fg(Color::Red)
            } else {
                cell
            }
        }));
        table.add_row(row);
    }
    table
}

/// The full terminal report for `evaluate`.
pub fn render_report(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    out.push_str("STRATEGIC GOLD VENTURE: Net Yield Modeling & Operational Sensitivity\n\n");
    out.push_str(&render_cards(evaluation).to_string());
    out.push_str("\n\nGross vs. Net Profit Breakdown\n");
    out.push_str(&render_comparison(&evaluation.comparison()).to_string());
    out.push_str("\n\nScenario 1: Net Profit Sensitivity ($M)\n");
    out.push_str(&render_heatmap(&evaluation.sensitivity).to_string());
    out.push('\n');

    if let Some(multiple) =
        capital_efficiency_multiple(&evaluation.scenario_one, &evaluation.scenario_two)
    {
        out.push_str(&format!(
            "\nScenario 1 returns {:.1}x the ROI of scenario 2 on the same {} principal.\n",
            multiple.round_dp(1),
            format_currency(evaluation.principal)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::ScenarioModel;
    use core_types::{MarketParameters, OpexParameters};

    fn default_evaluation() -> Evaluation {
        let market = MarketParameters::new(dec!(155000), dec!(25)).unwrap();
        let opex = OpexParameters::new(dec!(35000), dec!(7500)).unwrap();
        ScenarioModel::default().evaluate(&market, &opex).unwrap()
    }

    #[test]
    fn currency_uses_thousands_separators() {
        assert_eq!(format_currency(dec!(3300000)), "$3,300,000");
        assert_eq!(format_currency(dec!(140000)), "$140,000");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(-45000)), "$-45,000");
        assert_eq!(format_currency(dec!(-999.4)), "$-999");
        assert_eq!(format_currency(dec!(1234.6)), "$1,235");
    }

    #[test]
    fn roi_has_one_decimal() {
        let evaluation = default_evaluation();
        assert_eq!(format_roi(evaluation.scenario_one.roi_pct), "379.3% NET ROI");
        assert_eq!(format_roi(evaluation.scenario_two.roi_pct), "16.1% NET ROI");
    }

    #[test]
    fn heatmap_labels() {
        assert_eq!(price_label(dec!(124000)), "$124k");
        assert_eq!(price_label(dec!(139500)), "$140k");
        assert_eq!(price_label(dec!(1240000)), "$1,240k");
        assert_eq!(rate_label(dec!(0.06)), "6%");
        assert_eq!(rate_label(dec!(0.10)), "10%");
        assert_eq!(format_millions(dec!(3300000)), "3.30");
        assert_eq!(format_millions(dec!(-450000)), "-0.45");
    }

    #[test]
    fn efficiency_multiple_is_omitted_when_scenario_two_breaks_even() {
        let evaluation = default_evaluation();
        let multiple =
            capital_efficiency_multiple(&evaluation.scenario_one, &evaluation.scenario_two)
                .unwrap();
        assert_eq!(multiple.round_dp(1), dec!(23.6));

        let mut flat = evaluation.scenario_two;
        flat.roi_pct = Decimal::ZERO;
        assert_eq!(capital_efficiency_multiple(&evaluation.scenario_one, &flat), None);
    }

    #[test]
    fn report_contains_every_section() {
        let report = render_report(&default_evaluation());
        assert!(report.contains("$3,300,000"));
        assert!(report.contains("16.1% NET ROI"));
        assert!(report.contains("Venture (S1)"));
        assert!(report.contains("OpEx (Annual)"));
        assert!(report.contains("$186k"));
        assert!(report.contains("10%"));
        assert!(report.contains("23.6x"));
    }
}
