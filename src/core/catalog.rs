//! Static catalog of known hardware models.

use crate::core::date::DateKey;
use std::collections::BTreeMap;

/// Hardware generation families, used for availability windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    S9,
    T9,
    S17,
    S19,
}

impl ModelFamily {
    fn from_key(key: &str) -> ModelFamily {
        if key.starts_with("s19") {
            ModelFamily::S19
        } else if key.starts_with("s17") {
            ModelFamily::S17
        } else if key.starts_with("t9") {
            ModelFamily::T9
        } else {
            ModelFamily::S9
        }
    }

    /// Calendar years in which this generation traded on the secondary
    /// market. Listings outside the window are excluded even when a series
    /// would extrapolate a price.
    fn years(&self) -> std::ops::RangeInclusive<i32> {
        match self {
            ModelFamily::S9 => 2016..=2019,
            ModelFamily::T9 => 2017..=2019,
            ModelFamily::S17 => 2019..=2020,
            ModelFamily::S19 => 2020..=2024,
        }
    }
}

/// Metadata for one hardware model. Informational only; the resolver never
/// reads it.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub key: &'static str,
    pub name: &'static str,
    /// Rated hashrate in TH/s.
    pub hashrate: f64,
    /// Wall power draw in watts.
    pub power: u32,
    /// Launch month.
    pub launch: DateKey,
}

impl ModelSpec {
    pub fn family(&self) -> ModelFamily {
        ModelFamily::from_key(self.key)
    }
}

/// Immutable model-key → metadata mapping, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: BTreeMap<&'static str, ModelSpec>,
}

impl ModelCatalog {
    pub fn new(specs: Vec<ModelSpec>) -> Self {
        let models = specs.into_iter().map(|s| (s.key, s)).collect();
        ModelCatalog { models }
    }

    pub fn get(&self, key: &str) -> Option<&ModelSpec> {
        self.models.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.values()
    }

    /// Models that were on the market at `date`: launched on or before it and
    /// within their family's trading-year window.
    pub fn available_on(&self, date: &DateKey) -> Vec<&ModelSpec> {
        let month = date.month_bucket();
        self.models
            .values()
            .filter(|spec| spec.launch <= month && spec.family().years().contains(&date.year()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset;

    fn catalog() -> ModelCatalog {
        dataset::builtin_catalog()
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let catalog = catalog();
        let s9 = catalog.get("s9_135").unwrap();
        assert_eq!(s9.name, "S9 13.5 TH/s");
        assert_eq!(s9.hashrate, 13.5);
        assert!(catalog.get("invalid_model").is_none());
    }

    #[test]
    fn test_family_assignment() {
        let catalog = catalog();
        assert_eq!(catalog.get("s9j").unwrap().family(), ModelFamily::S9);
        assert_eq!(catalog.get("t9plus").unwrap().family(), ModelFamily::T9);
        assert_eq!(catalog.get("s17pro").unwrap().family(), ModelFamily::S17);
        assert_eq!(catalog.get("s19xp").unwrap().family(), ModelFamily::S19);
    }

    #[test]
    fn test_available_on_respects_launch_date() {
        let catalog = catalog();
        let keys: Vec<_> = catalog
            .available_on(&"2017-01".parse().unwrap())
            .iter()
            .map(|s| s.key)
            .collect();
        assert!(keys.contains(&"s9_135"));
        assert!(keys.contains(&"t9plus"));
        // Launched later in 2017.
        assert!(!keys.contains(&"s9i_135"));
        assert!(!keys.contains(&"s19"));
    }

    #[test]
    fn test_available_on_excludes_retired_families() {
        let catalog = catalog();
        let keys: Vec<_> = catalog
            .available_on(&"2021-04".parse().unwrap())
            .iter()
            .map(|s| s.key)
            .collect();
        // S9 and T9 generations are off the market after 2019, S17 after 2020.
        assert!(!keys.contains(&"s9_135"));
        assert!(!keys.contains(&"t9plus"));
        assert!(!keys.contains(&"s17"));
        assert!(keys.contains(&"s19"));
        assert!(keys.contains(&"s19pro"));
    }

    #[test]
    fn test_available_on_full_date_granularity() {
        let catalog = catalog();
        let month = catalog.available_on(&"2019-06".parse().unwrap());
        let day = catalog.available_on(&"2019-06-15".parse().unwrap());
        let month_keys: Vec<_> = month.iter().map(|s| s.key).collect();
        let day_keys: Vec<_> = day.iter().map(|s| s.key).collect();
        assert_eq!(month_keys, day_keys);
    }
}
