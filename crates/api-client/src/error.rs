use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceSourceError {
    #[error("The price source is unavailable: {0}")]
    Unavailable(String),

    #[error("The price source returned an invalid quote: {0}")]
    InvalidQuote(Decimal),
}
