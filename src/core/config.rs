use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Defaults for the mining-strategy comparison. Every field can be
/// overridden per-invocation from the command line.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompareDefaults {
    #[serde(default = "default_electricity_rate")]
    pub electricity_rate: f64,
    #[serde(default = "default_pool_fee_pct")]
    pub pool_fee_pct: f64,
    #[serde(default = "default_difficulty_growth_pct")]
    pub difficulty_growth_pct: f64,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_residual_pct")]
    pub residual_pct: f64,
}

fn default_electricity_rate() -> f64 {
    0.04
}

fn default_pool_fee_pct() -> f64 {
    2.0
}

fn default_difficulty_growth_pct() -> f64 {
    30.0
}

fn default_days() -> u32 {
    1095
}

fn default_residual_pct() -> f64 {
    20.0
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CompareDefaults {
    fn default() -> Self {
        CompareDefaults {
            electricity_rate: default_electricity_rate(),
            pool_fee_pct: default_pool_fee_pct(),
            difficulty_growth_pct: default_difficulty_growth_pct(),
            days: default_days(),
            residual_pct: default_residual_pct(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Display currency label. Prices are USD; this only affects output.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub compare: CompareDefaults,
    /// User-supplied price points layered over the embedded tables:
    /// model key → date string → USD price.
    #[serde(default)]
    pub overrides: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            compare: CompareDefaults::default(),
            overrides: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "rigprice", "rigprice")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Loads the config from the default location, falling back to defaults
    /// when no file exists. The resolver works without any configuration.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            debug!("No config file found, using defaults");
            Ok(AppConfig::default())
        }
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
