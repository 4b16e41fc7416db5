use crate::error::PriceSourceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use configuration::PriceFeed;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub mod error;

/// A spot price observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Price per kilogram.
    pub price_per_kg: Decimal,
    pub as_of: DateTime<Utc>,
    /// Name of the source that produced the quote.
    pub source: String,
}

/// The abstract interface for anything that can quote the current spot price.
/// The model never calls this itself; the input layer resolves a price first
/// and passes plain numbers in.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn spot_price(&self) -> Result<PriceQuote, PriceSourceError>;
}

/// Stand-in for a live feed that always quotes the same configured price.
#[derive(Debug, Clone)]
pub struct StaticPriceSource {
    price_per_kg: Decimal,
}

impl StaticPriceSource {
    pub fn new(price_per_kg: Decimal) -> Self {
        Self { price_per_kg }
    }

    pub fn from_config(feed: &PriceFeed) -> Self {
        Self::new(feed.spot_price_per_kg)
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn spot_price(&self) -> Result<PriceQuote, PriceSourceError> {
        if self.price_per_kg <= Decimal::ZERO {
            return Err(PriceSourceError::InvalidQuote(self.price_per_kg));
        }
        Ok(PriceQuote {
            price_per_kg: self.price_per_kg,
            as_of: Utc::now(),
            source: "static".to_string(),
        })
    }
}

/// Reuses the last quote of an inner source until it is older than `ttl`.
pub struct CachedPriceSource<S> {
    inner: S,
    ttl: Duration,
    cached: Mutex<Option<(Instant, PriceQuote)>>,
}

impl<S: PriceSource> CachedPriceSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Drops the cached quote so the next call reaches the inner source.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for CachedPriceSource<S> {
    async fn spot_price(&self) -> Result<PriceQuote, PriceSourceError> {
        // Held across the fetch so concurrent callers share one refresh.
        let mut cached = self.cached.lock().await;
        if let Some((fetched_at, quote)) = cached.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                tracing::debug!(price = %quote.price_per_kg, "Serving cached spot price");
                return Ok(quote.clone());
            }
        }

        let quote = self.inner.spot_price().await?;
        tracing::info!(price = %quote.price_per_kg, source = %quote.source, "Fetched spot price");
        *cached = Some((Instant::now(), quote.clone()));
        Ok(quote)
    }
}
