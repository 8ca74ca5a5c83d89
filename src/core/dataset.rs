//! Embedded historical price tables and model catalog.
//!
//! Everything here is literal data compiled into the binary; nothing is
//! loaded from disk or the network. Observations marked guaranteed are
//! documented spot prices; the rest are analyst estimates, so two models may
//! carry differing estimates for the same month and neither is reconciled
//! against the other.

use crate::core::catalog::{ModelCatalog, ModelSpec};
use crate::core::date::DateKey;
use crate::core::resolver::PriceResolver;
use crate::core::series::{PriceSeries, Provenance};
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// `(date key, USD price, guaranteed)`
type Row = (&'static str, f64, bool);

const S9_135: &[Row] = &[
    ("2016-06", 2100.0, false), // launch price
    ("2017-01", 1400.0, false),
    ("2017-06", 2300.0, false),
    ("2017-11-28", 1515.0, true),
    ("2017-12-08", 1520.0, true),
    ("2017-12-20", 4500.0, true), // peak bubble, BTC hit $19k on Dec 17
    ("2018-01-03", 2830.0, true),
    ("2018-02", 2420.0, true),
    ("2018-03", 1900.0, false),
    ("2018-04", 1600.0, false),
    ("2018-05", 1400.0, false),
    ("2018-06", 1000.0, false),
    ("2018-07", 850.0, false),
    ("2018-08", 950.0, false),
    ("2018-09", 850.0, false),
    ("2018-10", 750.0, false),
    ("2018-11", 700.0, false),
    ("2018-12", 650.0, false), // bear market bottom
    ("2019-01", 680.0, false),
    ("2019-03", 750.0, false),
    ("2019-06", 850.0, false),
    ("2019-09", 800.0, false),
    ("2019-12", 700.0, false),
];

const S9_14: &[Row] = &[
    ("2016-09", 2200.0, false),
    ("2017-01", 1450.0, false),
    ("2017-06", 2400.0, false),
    ("2017-11-28", 1515.0, true),
    ("2017-12-08", 1520.0, true),
    ("2017-12-20", 4500.0, true),
    ("2018-01-03", 2830.0, true),
    ("2018-02", 2420.0, true),
    ("2018-03", 1900.0, false),
    ("2018-04", 1600.0, false),
    ("2018-05", 1400.0, false),
    ("2018-06", 1000.0, false),
    ("2018-07", 850.0, false),
    ("2018-08", 950.0, false),
    ("2018-09", 850.0, false),
    ("2018-10", 750.0, false),
    ("2018-11", 700.0, false),
    ("2018-12", 650.0, false),
    ("2019-01", 680.0, false),
    ("2019-03", 750.0, false),
    ("2019-06", 850.0, false),
    ("2019-09", 800.0, false),
    ("2019-12", 700.0, false),
];

const S9I_135: &[Row] = &[
    ("2017-06", 2250.0, false),
    ("2017-11", 1420.0, false),
    ("2017-12-08", 1490.0, false),
    ("2017-12-20", 4400.0, false),
    ("2018-01-03", 2780.0, false),
    ("2018-02", 2380.0, false),
    ("2018-03", 1850.0, false),
    ("2018-04", 2200.0, false),
    ("2018-05", 1350.0, false),
    ("2018-06", 950.0, false),
    ("2018-07", 800.0, false),
    ("2018-08", 920.0, false),
    ("2018-09", 820.0, false),
    ("2018-10", 720.0, false),
    ("2018-11", 680.0, false),
    ("2018-12", 650.0, false),
    ("2019-01", 670.0, false),
    ("2019-03", 730.0, false),
    ("2019-06", 820.0, false),
    ("2019-09", 780.0, false),
    ("2019-12", 680.0, false),
];

const S9J: &[Row] = &[
    ("2017-12", 4300.0, false),
    ("2018-01", 3000.0, false),
    ("2018-02", 2350.0, false),
    ("2018-03", 2750.0, false),
    ("2018-04", 2150.0, false),
    ("2018-05", 1300.0, false),
    ("2018-06", 900.0, false),
    ("2018-07", 750.0, false),
    ("2018-08", 880.0, false),
    ("2018-09", 800.0, false),
    ("2018-10", 700.0, false),
    ("2018-11", 660.0, false),
    ("2018-12", 650.0, false),
    ("2019-01", 660.0, false),
    ("2019-03", 710.0, false),
    ("2019-06", 800.0, false),
    ("2019-09", 760.0, false),
    ("2019-12", 660.0, false),
];

const S9I_14: &[Row] = &[
    ("2018-05", 1450.0, false), // launch
    ("2018-06", 950.0, false),
    ("2018-07", 800.0, false),
    ("2018-08", 920.0, false),
    ("2018-09", 820.0, false),
    ("2018-10", 720.0, false),
    ("2018-11", 680.0, false),
    ("2018-12", 650.0, false),
    ("2019-01", 670.0, false),
    ("2019-03", 730.0, false),
    ("2019-06", 820.0, false),
    ("2019-09", 780.0, false),
    ("2019-12", 680.0, false),
];

const T9PLUS: &[Row] = &[
    ("2017-01", 1100.0, false),
    ("2017-06", 1900.0, false),
    ("2017-11", 2300.0, false),
    ("2017-12", 3800.0, false), // peak
    ("2018-01", 2700.0, false),
    ("2018-02", 2100.0, false),
    ("2018-03", 1850.0, false),
    ("2018-04", 1500.0, false),
    ("2018-05", 1150.0, false),
    ("2018-06", 850.0, false),
    ("2018-07", 700.0, false),
    ("2018-08", 750.0, false),
    ("2018-09", 700.0, false),
    ("2018-10", 650.0, false),
    ("2018-11", 650.0, false),
    ("2018-12", 650.0, false),
    ("2019-01", 650.0, false),
    ("2019-03", 680.0, false),
    ("2019-06", 720.0, false),
    ("2019-09", 680.0, false),
    ("2019-12", 650.0, false),
];

const S17: &[Row] = &[
    ("2019-04", 2500.0, false), // launch
    ("2019-07", 2800.0, false),
    ("2019-12", 1800.0, false),
    ("2020-01", 1700.0, false),
    ("2020-03", 1500.0, false), // COVID crash
    ("2020-05", 1600.0, false),
    ("2020-12", 2200.0, false),
    ("2021-04", 5500.0, false),
    ("2021-12", 4000.0, false),
];

const S17PRO: &[Row] = &[
    ("2019-04", 2400.0, false),
    ("2019-07", 2700.0, false),
    ("2019-12", 1550.0, false),
    ("2020-01", 1450.0, false),
    ("2020-05", 1150.0, false),
    ("2020-12", 2100.0, false),
    ("2021-04", 5300.0, false),
    ("2021-12", 3900.0, false),
];

const S19: &[Row] = &[
    ("2020-05", 2400.0, false), // launch
    ("2020-12", 4500.0, false),
    ("2021-04", 11000.0, false), // bull run
    ("2021-11", 12000.0, false), // peak
    ("2022-01", 10000.0, false),
    ("2022-06", 4500.0, false),
    ("2022-11", 3000.0, false), // FTX crash
    ("2023-01", 3200.0, false),
    ("2023-06", 2800.0, false),
    ("2024-01", 4000.0, false),
];

const S19PRO: &[Row] = &[
    ("2020-06", 2600.0, false),
    ("2020-12", 4800.0, false),
    ("2021-04", 11500.0, false),
    ("2021-11", 12500.0, false),
    ("2022-01", 10500.0, false),
    ("2022-06", 3700.0, false),
    ("2022-11", 2100.0, false),
    ("2023-01", 2300.0, false),
    ("2023-06", 2900.0, false),
    ("2024-01", 4200.0, false),
];

const S19XP: &[Row] = &[
    ("2022-07", 8000.0, false),
    ("2022-11", 5000.0, false),
    ("2023-01", 4200.0, false),
    ("2023-06", 3800.0, false),
    ("2023-10", 3500.0, false),
    ("2024-01", 4500.0, false),
    ("2024-03", 5600.0, false),
];

const TABLES: &[(&str, &[Row])] = &[
    ("s9_135", S9_135),
    ("s9_14", S9_14),
    ("s9i_135", S9I_135),
    ("s9i_14", S9I_14),
    ("s9j", S9J),
    ("t9plus", T9PLUS),
    ("s17", S17),
    ("s17pro", S17PRO),
    ("s19", S19),
    ("s19pro", S19PRO),
    ("s19xp", S19XP),
];

/// `(key, display name, TH/s, watts, launch month)`
const SPECS: &[(&str, &str, f64, u32, &str)] = &[
    ("s9_135", "S9 13.5 TH/s", 13.5, 1323, "2016-06"),
    ("s9_14", "S9 14 TH/s", 14.0, 1372, "2016-09"),
    ("s9i_135", "S9i 13.5 TH/s", 13.5, 1320, "2017-06"),
    ("s9i_14", "S9i 14 TH/s", 14.0, 1320, "2018-05"),
    ("s9j", "S9j 14.5 TH/s", 14.5, 1350, "2017-12"),
    ("t9plus", "T9+ 10.5 TH/s", 10.5, 1432, "2017-01"),
    ("s17", "S17 56 TH/s", 56.0, 2520, "2019-04"),
    ("s17pro", "S17 Pro 53 TH/s", 53.0, 2094, "2019-04"),
    ("s19", "S19 95 TH/s", 95.0, 3250, "2020-05"),
    ("s19pro", "S19 Pro 110 TH/s", 110.0, 3250, "2020-06"),
    ("s19xp", "S19 XP 140 TH/s", 140.0, 3010, "2022-07"),
];

fn parse_key(s: &str) -> DateKey {
    // All literals above are zero-padded ISO strings; a failure here is a
    // compile-time data error surfaced on first use.
    s.parse().unwrap_or_else(|e| panic!("bad embedded date '{s}': {e}"))
}

/// Builds the per-model price series map from the embedded tables.
pub fn builtin_series() -> BTreeMap<String, PriceSeries> {
    let mut map = BTreeMap::new();
    for (model, rows) in TABLES {
        let mut series = PriceSeries::new();
        for (date, price, guaranteed) in *rows {
            let provenance = if *guaranteed {
                Provenance::Guaranteed
            } else {
                Provenance::Estimated
            };
            series
                .insert(parse_key(date), *price, provenance)
                .unwrap_or_else(|e| panic!("bad embedded row for {model}: {e}"));
        }
        map.insert(model.to_string(), series);
    }
    map
}

/// Builds the static model catalog.
pub fn builtin_catalog() -> ModelCatalog {
    let specs = SPECS
        .iter()
        .map(|(key, name, hashrate, power, launch)| ModelSpec {
            key,
            name,
            hashrate: *hashrate,
            power: *power,
            launch: parse_key(launch),
        })
        .collect();
    ModelCatalog::new(specs)
}

/// The read-only data the application works against: catalog plus resolver,
/// constructed once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: ModelCatalog,
    pub resolver: PriceResolver,
}

impl Dataset {
    pub fn builtin() -> Self {
        Dataset {
            catalog: builtin_catalog(),
            resolver: PriceResolver::new(builtin_series()),
        }
    }

    /// Builds the dataset with user-supplied price points layered on top of
    /// the embedded tables. Overrides are treated as analyst estimates.
    pub fn with_overrides(overrides: &BTreeMap<String, BTreeMap<String, f64>>) -> Result<Self> {
        let mut series = builtin_series();
        for (model, points) in overrides {
            let entry = series.entry(model.clone()).or_default();
            for (date, price) in points {
                let key: DateKey = date
                    .parse()
                    .with_context(|| format!("Invalid override date '{date}' for {model}"))?;
                entry
                    .upsert(key, *price, Provenance::Estimated)
                    .with_context(|| format!("Invalid override price for {model} at {date}"))?;
            }
        }
        Ok(Dataset {
            catalog: builtin_catalog(),
            resolver: PriceResolver::new(series),
        })
    }
}
