//! Sparse per-model price series.

use crate::core::date::DateKey;
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// Whether an observation is asserted ground truth or an analyst estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Guaranteed,
    Estimated,
}

/// A single resale price observation in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub price: f64,
    pub provenance: Provenance,
}

/// An ordered mapping from date key to price observation for one hardware
/// model. Keys are unique and prices strictly positive by construction.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    observations: BTreeMap<DateKey, Observation>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: DateKey, price: f64, provenance: Provenance) -> Result<()> {
        if !(price > 0.0) {
            bail!("Price for {} must be positive, got {}", date, price);
        }
        if self.observations.contains_key(&date) {
            bail!("Duplicate observation for {}", date);
        }
        self.observations.insert(date, Observation { price, provenance });
        Ok(())
    }

    /// Replaces or adds an observation. Used for user-supplied overrides,
    /// which take precedence over the embedded estimates.
    pub fn upsert(&mut self, date: DateKey, price: f64, provenance: Provenance) -> Result<()> {
        if !(price > 0.0) {
            bail!("Price for {} must be positive, got {}", date, price);
        }
        self.observations.insert(date, Observation { price, provenance });
        Ok(())
    }

    pub fn get(&self, date: &DateKey) -> Option<&Observation> {
        self.observations.get(date)
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Earliest observation key, if any.
    pub fn first_key(&self) -> Option<&DateKey> {
        self.observations.keys().next()
    }

    /// Latest observation key, if any.
    pub fn last_key(&self) -> Option<&DateKey> {
        self.observations.keys().next_back()
    }

    /// Ascending iteration over observations.
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &Observation)> {
        self.observations.iter()
    }

    /// Bracketing scan: the greatest key ≤ `date` and the smallest key >
    /// `date`, found in one ascending pass.
    pub fn bracket(
        &self,
        date: &DateKey,
    ) -> (
        Option<(&DateKey, &Observation)>,
        Option<(&DateKey, &Observation)>,
    ) {
        let mut before = None;
        let mut after = None;
        for (key, obs) in self.observations.iter() {
            if key <= date {
                before = Some((key, obs));
            } else {
                after = Some((key, obs));
                break;
            }
        }
        (before, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, f64)]) -> PriceSeries {
        let mut s = PriceSeries::new();
        for (date, price) in entries {
            s.insert(date.parse().unwrap(), *price, Provenance::Estimated)
                .unwrap();
        }
        s
    }

    #[test]
    fn test_insert_rejects_non_positive_prices() {
        let mut s = PriceSeries::new();
        assert!(s.insert("2018-01".parse().unwrap(), 0.0, Provenance::Estimated).is_err());
        assert!(s.insert("2018-01".parse().unwrap(), -5.0, Provenance::Estimated).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicate_keys() {
        let mut s = series(&[("2018-01", 100.0)]);
        assert!(s.insert("2018-01".parse().unwrap(), 200.0, Provenance::Estimated).is_err());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_upsert_replaces() {
        let mut s = series(&[("2018-01", 100.0)]);
        s.upsert("2018-01".parse().unwrap(), 250.0, Provenance::Estimated)
            .unwrap();
        assert_eq!(s.get(&"2018-01".parse().unwrap()).unwrap().price, 250.0);
    }

    #[test]
    fn test_bracket_scan() {
        let s = series(&[("2017-11-28", 1515.0), ("2017-12-08", 1520.0), ("2018-02", 2420.0)]);

        let q = "2017-12-15".parse().unwrap();
        let (before, after) = s.bracket(&q);
        assert_eq!(before.unwrap().0.to_string(), "2017-12-08");
        assert_eq!(after.unwrap().0.to_string(), "2018-02");

        // Query before the first key.
        let q = "2016-01".parse().unwrap();
        let (before, after) = s.bracket(&q);
        assert!(before.is_none());
        assert_eq!(after.unwrap().0.to_string(), "2017-11-28");

        // Query past the last key.
        let q = "2025-01".parse().unwrap();
        let (before, after) = s.bracket(&q);
        assert_eq!(before.unwrap().0.to_string(), "2018-02");
        assert!(after.is_none());
        assert_eq!(before.unwrap().1.price, 2420.0);
    }
}
