use analytics::{Evaluation, ScenarioModel};
use api_client::{CachedPriceSource, PriceSource, StaticPriceSource};
use clap::{Args, Parser, Subcommand};
use configuration::{load_config, logging::init_tracing, Config, LogLevel};
use core_types::{ComparisonRow, MarketParameters, OpexParameters};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

mod display;

/// The main entry point for the Aurum scenario model.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    // Held until exit so the file appender flushes.
    let _log_guard = init_tracing(&config.logging)?;
    tracing::info!(
        config = %cli.config.display(),
        principal = %config.model.principal,
        "Configuration loaded"
    );

    let price_source = CachedPriceSource::new(
        StaticPriceSource::from_config(&config.price_feed),
        config.price_feed.cache_ttl,
    );

    // Execute the appropriate command
    match cli.command {
        Commands::Evaluate(args) => handle_evaluate(args, &config, &price_source).await,
        Commands::Sensitivity(args) => handle_sensitivity(args, &config, &price_source).await,
        Commands::Price(args) => handle_price(args, &price_source).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Net yield modeling for two gold-trading scenarios.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the configured log level.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare both scenarios and show the scenario 1 sensitivity matrix.
    Evaluate(MarketArgs),
    /// Show only the scenario 1 price/discount-rate sensitivity matrix.
    Sensitivity(MarketArgs),
    /// Show the spot price the model would use by default.
    Price(OutputArgs),
}

#[derive(Args)]
struct MarketArgs {
    /// LBMA spot price per kg. Defaults to the price feed.
    #[arg(long)]
    spot_price: Option<Decimal>,

    /// Scenario 1 monthly volume in kg.
    #[arg(long)]
    volume: Option<Decimal>,

    /// Scenario 1 monthly overhead (refinery, staff, security, logistics).
    #[arg(long)]
    overhead: Option<Decimal>,

    /// Scenario 2 cost per trade (brokerage, legal, insurance).
    #[arg(long)]
    cost_per_trade: Option<Decimal>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Print machine-readable JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    evaluation: &'a Evaluation,
    comparison: Vec<ComparisonRow>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Fills unset inputs from the price feed and config defaults, then enforces the slider bounds.
async fn resolve_inputs(
    args: &MarketArgs,
    config: &Config,
    price_source: &dyn PriceSource,
) -> anyhow::Result<(MarketParameters, OpexParameters)> {
    let spot_price = match args.spot_price {
        Some(price) => price,
        None => price_source.spot_price().await?.price_per_kg,
    };
    let inputs = &config.inputs;

    let market = MarketParameters::new(
        spot_price,
        args.volume.unwrap_or(inputs.monthly_volume_kg),
    )?;
    let opex = OpexParameters::new(
        args.overhead.unwrap_or(inputs.scenario1_monthly_overhead),
        args.cost_per_trade.unwrap_or(inputs.scenario2_cost_per_trade),
    )?;

    if let Err(e) = inputs
        .bounds
        .check_market(&market)
        .and_then(|_| inputs.bounds.check_opex(&opex))
    {
        tracing::warn!(error = %e, "Rejected input outside the accepted range");
        return Err(e.into());
    }

    Ok((market, opex))
}

async fn handle_evaluate(
    args: MarketArgs,
    config: &Config,
    price_source: &dyn PriceSource,
) -> anyhow::Result<()> {
    let (market, opex) = resolve_inputs(&args, config, price_source).await?;
    let model = ScenarioModel::from_config(config)?;
    let evaluation = model.evaluate(&market, &opex)?;

    tracing::info!(
        spot = %market.spot_price_per_kg,
        s1_net = %evaluation.scenario_one.net_profit,
        s2_net = %evaluation.scenario_two.net_profit,
        "Evaluation complete"
    );

    if args.output.json {
        let report = JsonReport {
            evaluation: &evaluation,
            comparison: evaluation.comparison(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::render_report(&evaluation));
    }
    Ok(())
}

async fn handle_sensitivity(
    args: MarketArgs,
    config: &Config,
    price_source: &dyn PriceSource,
) -> anyhow::Result<()> {
    let (market, opex) = resolve_inputs(&args, config, price_source).await?;
    let model = ScenarioModel::from_config(config)?;
    let grid = model.sensitivity_grid(&market, &opex)?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        println!("Scenario 1: Net Profit Sensitivity ($M)");
        println!("{}", display::render_heatmap(&grid));
    }
    Ok(())
}

async fn handle_price(args: OutputArgs, price_source: &dyn PriceSource) -> anyhow::Result<()> {
    let quote = price_source.spot_price().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!(
            "LBMA spot: {}/kg (source: {}, as of {})",
            display::format_currency(quote.price_per_kg),
            quote.source,
            quote.as_of.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::error::ConfigError;
    use rust_decimal_macros::dec;

    fn market_args(spot_price: Option<Decimal>, volume: Option<Decimal>) -> MarketArgs {
        MarketArgs {
            spot_price,
            volume,
            overhead: None,
            cost_per_trade: None,
            output: OutputArgs { json: false },
        }
    }

    #[tokio::test]
    async fn unset_inputs_come_from_price_feed_and_config() {
        let config = Config::default();
        let source = StaticPriceSource::new(dec!(160000));

        let (market, opex) = resolve_inputs(&market_args(None, None), &config, &source)
            .await
            .unwrap();

        assert_eq!(market.spot_price_per_kg, dec!(160000));
        assert_eq!(market.monthly_volume_kg, config.inputs.monthly_volume_kg);
        assert_eq!(opex.scenario1_monthly_overhead, dec!(35000));
        assert_eq!(opex.scenario2_cost_per_trade, dec!(7500));
    }

    #[tokio::test]
    async fn explicit_inputs_override_defaults() {
        let config = Config::default();
        let source = StaticPriceSource::new(dec!(160000));

        let (market, _) = resolve_inputs(
            &market_args(Some(dec!(180000)), Some(dec!(40))),
            &config,
            &source,
        )
        .await
        .unwrap();

        assert_eq!(market.spot_price_per_kg, dec!(180000));
        assert_eq!(market.monthly_volume_kg, dec!(40));
    }

    #[tokio::test]
    async fn out_of_range_spot_price_is_rejected_before_the_model_runs() {
        let config = Config::default();
        let source = StaticPriceSource::new(dec!(155000));

        let err = resolve_inputs(&market_args(Some(dec!(250000)), None), &config, &source)
            .await
            .unwrap_err();

        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::InputOutOfBounds { field, value, .. }) => {
                assert_eq!(*field, "spot_price_per_kg");
                assert_eq!(*value, dec!(250000));
            }
            other => panic!("expected InputOutOfBounds, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn out_of_range_feed_price_is_rejected_too() {
        let config = Config::default();
        let source = StaticPriceSource::new(dec!(90000));

        let err = resolve_inputs(&market_args(None, None), &config, &source)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InputOutOfBounds { field: "spot_price_per_kg", .. })
        ));
    }
}
