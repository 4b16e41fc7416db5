pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Metric, ScenarioId};
pub use error::DomainError;
pub use structs::{ComparisonRow, MarketParameters, OpexParameters, ScenarioResult};
