//! Ordered price-estimation strategies.
//!
//! The original pricing stack fell through a chain of formulas guarded by
//! runtime existence checks. Here the fallback order is an explicit list:
//! each estimator either produces a tagged estimate or declines, and the
//! first success wins.

use crate::core::catalog::ModelCatalog;
use crate::core::date::DateKey;
use crate::core::dataset::Dataset;
use crate::core::resolver::PriceResolver;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub price: f64,
    /// Human-readable description of how the estimate was produced.
    pub method: String,
}

pub trait Estimator {
    fn name(&self) -> &'static str;

    /// Returns an estimate, or `None` when this strategy has nothing to say
    /// for the model/date. Declining is not an error.
    fn estimate(&self, model: &str, date: &DateKey) -> Option<Estimate>;
}

/// Primary strategy: the historical resolver. Unknown models and
/// before-launch dates decline rather than fabricate a number.
pub struct HistoricalEstimator<'a> {
    resolver: &'a PriceResolver,
}

impl<'a> HistoricalEstimator<'a> {
    pub fn new(resolver: &'a PriceResolver) -> Self {
        HistoricalEstimator { resolver }
    }
}

impl Estimator for HistoricalEstimator<'_> {
    fn name(&self) -> &'static str {
        "historical"
    }

    fn estimate(&self, model: &str, date: &DateKey) -> Option<Estimate> {
        match self.resolver.resolve(model, date) {
            Ok(resolved) => Some(Estimate {
                price: resolved.price,
                method: format!("historical ({})", resolved.method),
            }),
            Err(e) => {
                debug!(%model, %date, error = %e, "Historical estimator declined");
                None
            }
        }
    }
}

/// Last-resort heuristic: a per-generation base price per TH/s scaled by the
/// model's rated hashrate. Only applies to cataloged models that had
/// launched by the query date.
pub struct BasePriceEstimator<'a> {
    catalog: &'a ModelCatalog,
}

impl<'a> BasePriceEstimator<'a> {
    pub fn new(catalog: &'a ModelCatalog) -> Self {
        BasePriceEstimator { catalog }
    }

    fn base_per_th(key: &str) -> f64 {
        if key.starts_with("s9") {
            120.0
        } else if key.starts_with("s17") {
            80.0
        } else if key.starts_with("s19") {
            60.0
        } else {
            100.0
        }
    }
}

impl Estimator for BasePriceEstimator<'_> {
    fn name(&self) -> &'static str {
        "base-price"
    }

    fn estimate(&self, model: &str, date: &DateKey) -> Option<Estimate> {
        let spec = self.catalog.get(model)?;
        if date.month_bucket() < spec.launch {
            debug!(%model, %date, "Base-price estimator declined: before launch");
            return None;
        }
        Some(Estimate {
            price: spec.hashrate * Self::base_per_th(model),
            method: "base-price heuristic".to_string(),
        })
    }
}

/// Runs estimators in order and takes the first success.
pub struct EstimatorChain<'a> {
    estimators: Vec<Box<dyn Estimator + 'a>>,
}

impl<'a> EstimatorChain<'a> {
    pub fn new(estimators: Vec<Box<dyn Estimator + 'a>>) -> Self {
        EstimatorChain { estimators }
    }

    /// The standard chain: historical data first, base-price heuristic as
    /// the fallback.
    pub fn standard(dataset: &'a Dataset) -> Self {
        EstimatorChain::new(vec![
            Box::new(HistoricalEstimator::new(&dataset.resolver)),
            Box::new(BasePriceEstimator::new(&dataset.catalog)),
        ])
    }

    pub fn estimate(&self, model: &str, date: &DateKey) -> Option<Estimate> {
        for estimator in &self.estimators {
            if let Some(estimate) = estimator.estimate(model, date) {
                debug!(
                    %model, %date, estimator = estimator.name(), price = estimate.price,
                    "Estimator produced a price"
                );
                return Some(estimate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset;
    use std::collections::BTreeMap;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_historical_wins_when_data_exists() {
        let dataset = Dataset::builtin();
        let chain = EstimatorChain::standard(&dataset);
        let estimate = chain.estimate("s9_135", &key("2018-02")).unwrap();
        assert_eq!(estimate.price, 2420.0);
        assert_eq!(estimate.method, "historical (month-bucket)");
    }

    #[test]
    fn test_base_price_fallback_without_series() {
        // A resolver with no data forces the chain onto the heuristic.
        let resolver = PriceResolver::new(BTreeMap::new());
        let catalog = dataset::builtin_catalog();
        let chain = EstimatorChain::new(vec![
            Box::new(HistoricalEstimator::new(&resolver)),
            Box::new(BasePriceEstimator::new(&catalog)),
        ]);

        let estimate = chain.estimate("s19xp", &key("2022-08")).unwrap();
        assert_eq!(estimate.price, 140.0 * 60.0);
        assert_eq!(estimate.method, "base-price heuristic");

        let s9 = chain.estimate("s9_135", &key("2017-01")).unwrap();
        assert_eq!(s9.price, 13.5 * 120.0);
    }

    #[test]
    fn test_chain_declines_for_unknown_model_and_before_launch() {
        let dataset = Dataset::builtin();
        let chain = EstimatorChain::standard(&dataset);
        assert!(chain.estimate("invalid_model", &key("2018-01")).is_none());
        // No estimator may fabricate a price before the model existed.
        assert!(chain.estimate("s19xp", &key("2021-01")).is_none());
    }
}
