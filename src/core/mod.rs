//! Core pricing logic: date keys, sparse series, the historical resolver,
//! the estimator chain and the strategy simulation.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod date;
pub mod estimator;
pub mod log;
pub mod resolver;
pub mod series;
pub mod simulate;

// Re-export main types for cleaner imports
pub use catalog::{ModelCatalog, ModelSpec};
pub use dataset::Dataset;
pub use date::DateKey;
pub use resolver::{PriceResolver, Resolution, ResolveError, Resolved};
pub use series::{Observation, PriceSeries, Provenance};
