//! Historical price resolution over sparse per-model series.
//!
//! Resolution priority, first match wins:
//! 1. exact full-date key
//! 2. month-bucket key for the query's month
//! 3. bracketing search, then either before-launch, open-ended decay
//!    extrapolation, or piecewise-linear interpolation
//!
//! Day-level observations override month-level ones for the same period, so
//! a guaranteed spot price beats an analyst month estimate.

use crate::core::date::DateKey;
use crate::core::series::{PriceSeries, Provenance};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

/// Compounding monthly decline applied past the last known observation.
pub const DECAY_RATE: f64 = 0.98;

/// Absolute floor in USD for decay extrapolation. Working hardware retains
/// scrap-plus-hashrate value even in the deepest bear market.
pub const FLOOR_PRICE: f64 = 100.0;

/// Which resolution path produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact,
    MonthBucket,
    Interpolated,
    ExtrapolatedDecay,
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Resolution::Exact => "exact",
                Resolution::MonthBucket => "month-bucket",
                Resolution::Interpolated => "interpolated",
                Resolution::ExtrapolatedDecay => "extrapolated-decay",
            }
        )
    }
}

/// A successfully resolved price.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub price: f64,
    pub method: Resolution,
    /// Present when the price is a stored observation rather than a derived
    /// value.
    pub provenance: Option<Provenance>,
}

/// Explicit unavailability outcomes. Callers must be able to tell "invalid
/// model" apart from "no data for this date".
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    UnknownModel(String),
    BeforeLaunch { model: String, earliest: DateKey },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::UnknownModel(model) => {
                write!(f, "No price data exists for model '{model}'")
            }
            ResolveError::BeforeLaunch { model, earliest } => write!(
                f,
                "Date predates the first known price for '{model}' ({earliest})"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Pure read path over an immutable set of price series. Owns its dataset so
/// tests can build independent resolvers over synthetic series.
#[derive(Debug, Clone, Default)]
pub struct PriceResolver {
    series: BTreeMap<String, PriceSeries>,
}

impl PriceResolver {
    pub fn new(series: BTreeMap<String, PriceSeries>) -> Self {
        PriceResolver { series }
    }

    pub fn series(&self, model: &str) -> Option<&PriceSeries> {
        self.series.get(model)
    }

    /// Resolves a price for `model` at `date`.
    pub fn resolve(&self, model: &str, date: &DateKey) -> Result<Resolved, ResolveError> {
        let series = self
            .series
            .get(model)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ResolveError::UnknownModel(model.to_string()))?;

        // 1. Exact day-level observation.
        if matches!(date, DateKey::FullDate(_))
            && let Some(obs) = series.get(date)
        {
            debug!(%model, %date, price = obs.price, "Exact date match");
            return Ok(Resolved {
                price: obs.price,
                method: Resolution::Exact,
                provenance: Some(obs.provenance),
            });
        }

        // 2. Month bucket for the query's month.
        let month = date.month_bucket();
        if let Some(obs) = series.get(&month) {
            debug!(%model, %month, price = obs.price, "Month bucket match");
            return Ok(Resolved {
                price: obs.price,
                method: Resolution::MonthBucket,
                provenance: Some(obs.provenance),
            });
        }

        // 3. Bracket the query between known observations.
        let (before, after) = series.bracket(date);

        let Some((before, before_obs)) = before else {
            // The series is non-empty, so first_key always exists here.
            let earliest = *series
                .first_key()
                .ok_or_else(|| ResolveError::UnknownModel(model.to_string()))?;
            return Err(ResolveError::BeforeLaunch {
                model: model.to_string(),
                earliest,
            });
        };

        let Some((after, after_obs)) = after else {
            // Open-ended: depreciate from the last known price.
            let months = before.months_until(date).max(0);
            let price = FLOOR_PRICE.max(before_obs.price * DECAY_RATE.powi(months));
            debug!(%model, %date, last = %before, months, price, "Decay extrapolation");
            return Ok(Resolved {
                price,
                method: Resolution::ExtrapolatedDecay,
                provenance: None,
            });
        };

        let price = interpolate(before, before_obs.price, after, after_obs.price, date);
        debug!(
            %model, %date, before = %before, after = %after, price,
            "Linear interpolation"
        );
        Ok(Resolved {
            price,
            method: Resolution::Interpolated,
            provenance: None,
        })
    }
}

/// Piecewise-linear interpolation in price space (deliberately not
/// log-space; it under-estimates convexity during bubble transitions).
///
/// Distances are whole calendar months. When both anchors share a month the
/// month distance degenerates to zero and the ratio falls back to day
/// positions within that month, so a query between two spot prices a few
/// days apart still moves between them instead of pinning to the earlier
/// one.
fn interpolate(
    before: &DateKey,
    price_before: f64,
    after: &DateKey,
    price_after: f64,
    date: &DateKey,
) -> f64 {
    let total_months = before.months_until(after);
    let ratio = if total_months > 0 {
        before.months_until(date) as f64 / total_months as f64
    } else {
        let total_days = after.day_position() as i64 - before.day_position() as i64;
        if total_days <= 0 {
            return price_before;
        }
        (date.day_position() as i64 - before.day_position() as i64) as f64 / total_days as f64
    };
    (price_before + (price_after - price_before) * ratio).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset;
    use crate::core::series::Provenance;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn resolver() -> PriceResolver {
        PriceResolver::new(dataset::builtin_series())
    }

    fn synthetic(entries: &[(&str, f64)]) -> PriceResolver {
        let mut series = PriceSeries::new();
        for (date, price) in entries {
            series
                .insert(date.parse().unwrap(), *price, Provenance::Estimated)
                .unwrap();
        }
        let mut map = BTreeMap::new();
        map.insert("test".to_string(), series);
        PriceResolver::new(map)
    }

    #[test]
    fn test_guaranteed_exact_matches() {
        let r = resolver();

        let nov = r.resolve("s9_135", &key("2017-11-28")).unwrap();
        assert_eq!(nov.price, 1515.0);
        assert_eq!(nov.method, Resolution::Exact);
        assert_eq!(nov.provenance, Some(Provenance::Guaranteed));

        let dec = r.resolve("s9_135", &key("2017-12-08")).unwrap();
        assert_eq!(dec.price, 1520.0);
        assert_eq!(dec.method, Resolution::Exact);
    }

    #[test]
    fn test_month_bucket_match() {
        let r = resolver();
        let feb = r.resolve("s9_135", &key("2018-02")).unwrap();
        assert_eq!(feb.price, 2420.0);
        assert_eq!(feb.method, Resolution::MonthBucket);

        // A day inside a bucketed month resolves to the month value.
        let mid_feb = r.resolve("s9_135", &key("2018-02-14")).unwrap();
        assert_eq!(mid_feb.price, 2420.0);
        assert_eq!(mid_feb.method, Resolution::MonthBucket);
    }

    #[test]
    fn test_day_key_overrides_month_key() {
        // Both a month estimate and a day observation exist for 2018-03; the
        // exact day wins when queried verbatim.
        let r = synthetic(&[("2018-03", 1900.0), ("2018-03-15", 2000.0), ("2018-05", 1400.0)]);
        let day = r.resolve("test", &key("2018-03-15")).unwrap();
        assert_eq!(day.price, 2000.0);
        assert_eq!(day.method, Resolution::Exact);

        // Any other day of that month falls back to the month bucket.
        let other = r.resolve("test", &key("2018-03-20")).unwrap();
        assert_eq!(other.price, 1900.0);
        assert_eq!(other.method, Resolution::MonthBucket);
    }

    #[test]
    fn test_interpolation_between_same_month_anchors() {
        // Dec 2017: $1,520 on the 8th, $4,500 on the 20th. Mid-month lands
        // strictly between on the day-ratio line.
        let r = resolver();
        let mid = r.resolve("s9_135", &key("2017-12-15")).unwrap();
        assert_eq!(mid.method, Resolution::Interpolated);
        assert!(mid.price > 1520.0 && mid.price < 4500.0, "got {}", mid.price);
        // 1520 + (4500 - 1520) * 7/12, rounded.
        assert_eq!(mid.price, 3258.0);
    }

    #[test]
    fn test_interpolation_across_months() {
        let r = synthetic(&[("2018-01", 1000.0), ("2018-04", 400.0)]);
        let feb = r.resolve("test", &key("2018-02")).unwrap();
        assert_eq!(feb.method, Resolution::Interpolated);
        assert_eq!(feb.price, 800.0);
        let mar = r.resolve("test", &key("2018-03-28")).unwrap();
        assert_eq!(mar.price, 600.0);
    }

    #[test]
    fn test_interpolation_boundaries() {
        let r = synthetic(&[("2018-01-10", 1000.0), ("2018-04", 400.0)]);
        // Elapsed 0 months: exactly the before price.
        let jan = r.resolve("test", &key("2018-01-20")).unwrap();
        assert_eq!(jan.price, 1000.0);
        // Elapsed == total: exactly the after price (no 2018-04 bucket here,
        // so force the bracket with a synthetic day query).
        let r = synthetic(&[("2018-01", 1000.0), ("2018-04-20", 400.0)]);
        let apr = r.resolve("test", &key("2018-04-01")).unwrap();
        assert_eq!(apr.price, 400.0);
    }

    #[test]
    fn test_month_query_uses_month_distance() {
        // A month-granular query in a month holding only day keys brackets
        // between the previous observation and the first day key.
        let r = resolver();
        let dec = r.resolve("s9_135", &key("2017-12")).unwrap();
        assert_eq!(dec.method, Resolution::Interpolated);
        assert_eq!(dec.price, 1520.0);
    }

    #[test]
    fn test_before_launch() {
        let r = resolver();
        let err = r.resolve("s9_135", &key("2016-01")).unwrap_err();
        match err {
            ResolveError::BeforeLaunch { model, earliest } => {
                assert_eq!(model, "s9_135");
                assert_eq!(earliest.to_string(), "2016-06");
            }
            other => panic!("expected BeforeLaunch, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_model() {
        let r = resolver();
        let err = r.resolve("invalid_model", &key("2018-01")).unwrap_err();
        assert_eq!(err, ResolveError::UnknownModel("invalid_model".to_string()));
    }

    #[test]
    fn test_decay_extrapolation() {
        let r = resolver();
        // s9_135 last observation: 2019-12 at $700. 2025-01 is 61 months out.
        let future = r.resolve("s9_135", &key("2025-01")).unwrap();
        assert_eq!(future.method, Resolution::ExtrapolatedDecay);
        assert!(future.price > FLOOR_PRICE);
        assert!(future.price < 700.0);
        let expected = 700.0 * DECAY_RATE.powi(61);
        assert!((future.price - expected).abs() < 1e-9);
    }

    #[test]
    fn test_decay_is_monotonic_and_floored() {
        let r = resolver();
        let mut last = f64::INFINITY;
        for year in 2020..2040 {
            let date = format!("{year}-06").parse().unwrap();
            let resolved = r.resolve("s9_135", &date).unwrap();
            assert_eq!(resolved.method, Resolution::ExtrapolatedDecay);
            assert!(resolved.price <= last, "price rose at {year}");
            assert!(resolved.price >= FLOOR_PRICE);
            last = resolved.price;
        }
        // Far enough out the floor holds exactly.
        let distant = r.resolve("s9_135", &key("2099-01")).unwrap();
        assert_eq!(distant.price, FLOOR_PRICE);
    }

    #[test]
    fn test_decay_in_same_month_as_last_observation() {
        let r = synthetic(&[("2019-12-08", 700.0)]);
        let resolved = r.resolve("test", &key("2019-12-20")).unwrap();
        assert_eq!(resolved.method, Resolution::ExtrapolatedDecay);
        assert_eq!(resolved.price, 700.0);
    }

    #[test]
    fn test_idempotence() {
        let r = resolver();
        let first = r.resolve("s9_135", &key("2018-07-14")).unwrap();
        let second = r.resolve("s9_135", &key("2018-07-14")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_builtin_model_resolves_at_launch() {
        let r = resolver();
        let catalog = dataset::builtin_catalog();
        for spec in catalog.iter() {
            let resolved = r.resolve(spec.key, &spec.launch).unwrap();
            assert!(resolved.price > 0.0, "{} launch price", spec.key);
        }
    }
}
