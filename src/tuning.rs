//! Game balance
//!
//! Every number a designer may want to tweak, loadable from a JSON file.
//! Missing fields fall back to the built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::CAR_PRICES;
use crate::economy::{Catalog, UpgradeStats, UpgradeTable};
use crate::error::{DriftError, DriftResult};
use crate::sim::{DriftConfig, NitroConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub drift: DriftConfig,
    pub nitro: NitroConfig,
    pub upgrades: UpgradeTable,
    /// Stat ranges the upgrade levels interpolate over
    pub stats: UpgradeStats,
    /// Paint, wheel and spoiler prices
    pub customization: Catalog,
    /// Car prices by shop index
    pub shop_prices: Vec<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drift: DriftConfig::default(),
            nitro: NitroConfig::default(),
            upgrades: UpgradeTable::default(),
            stats: UpgradeStats::default(),
            customization: Catalog::default(),
            shop_prices: CAR_PRICES.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> DriftResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> DriftResult<Self> {
        let tuning = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> DriftResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default tuning");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> DriftResult<()> {
        self.drift.validate()?;
        self.stats.validate()?;
        self.customization.validate()?;

        let nitro = &self.nitro;
        let nitro_values = [
            ("nitro.duration", nitro.duration),
            ("nitro.recharge_time", nitro.recharge_time),
            ("nitro.torque_multiplier", nitro.torque_multiplier),
            ("nitro.speed_multiplier", nitro.speed_multiplier),
        ];
        for (name, value) in nitro_values {
            if !value.is_finite() || value < 0.0 {
                return Err(DriftError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.shop_prices.is_empty() {
            return Err(DriftError::Config("shop_prices must not be empty".into()));
        }
        Ok(())
    }
}
