use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, InputBounds, Inputs, LogLevel, Logging, Model, PriceFeed, Sensitivity,
    DEFAULT_DISCOUNT_RATES, DEFAULT_GRID_SIZE, DEFAULT_PRICE_SPREAD_FRACTION, DEFAULT_PRINCIPAL,
};

/// The prefix of environment variables that override file settings,
/// e.g. `AURUM_MODEL__PRINCIPAL=900000`.
pub const ENV_PREFIX: &str = "AURUM";

/// Loads the application configuration from a TOML file and the environment.
///
/// The file is optional: every section falls back to the dashboard defaults.
/// The resulting `Config` is validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(
        path = %path.as_ref().display(),
        principal = %config.model.principal,
        grid_size = config.sensitivity.grid_size,
        "Loaded configuration"
    );

    Ok(config)
}
