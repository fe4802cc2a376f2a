//! Player progress record
//!
//! Everything that survives between levels: coins, drift record, garage,
//! per-car upgrades and customization. Saved through a `ProfileStore`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::CAR_PRICES;
use crate::economy::{CarCustomization, CarUpgrades};
use crate::error::{DriftError, DriftResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub coins: u32,
    /// Best single drift run ever
    pub record_drift_score: u32,
    /// Shop index of the car the player drives
    pub applied_car: usize,
    pub mute_music: bool,
    /// Ownership flag per shop index
    pub owned_cars: Vec<bool>,
    /// Upgrade levels keyed by car model name
    pub upgrades: BTreeMap<String, CarUpgrades>,
    /// Paint, wheels and spoiler keyed by car model name
    pub customization: BTreeMap<String, CarCustomization>,
}

impl Default for Profile {
    fn default() -> Self {
        let mut owned_cars = vec![false; CAR_PRICES.len()];
        owned_cars[0] = true;
        Self {
            coins: 0,
            record_drift_score: 0,
            applied_car: 0,
            mute_music: false,
            owned_cars,
            upgrades: BTreeMap::new(),
            customization: BTreeMap::new(),
        }
    }
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe all progress
    pub fn reset(&mut self) {
        log::warn!("Resetting all saved progress");
        *self = Self::default();
    }

    /// Model name used to key per-car records for a shop index
    pub fn car_key(index: usize) -> String {
        format!("car_{index}")
    }

    pub fn applied_car_key(&self) -> String {
        Self::car_key(self.applied_car)
    }

    pub fn is_owned(&self, index: usize) -> bool {
        self.owned_cars.get(index).copied().unwrap_or(false)
    }

    /// Upgrades for a car (defaults if it was never upgraded)
    pub fn car_upgrades(&self, car: &str) -> CarUpgrades {
        self.upgrades.get(car).cloned().unwrap_or_default()
    }

    pub fn car_upgrades_mut(&mut self, car: &str) -> &mut CarUpgrades {
        self.upgrades.entry(car.to_string()).or_default()
    }

    pub fn car_customization(&self, car: &str) -> CarCustomization {
        self.customization.get(car).cloned().unwrap_or_default()
    }

    pub fn car_customization_mut(&mut self, car: &str) -> &mut CarCustomization {
        self.customization.entry(car.to_string()).or_default()
    }

    /// Upgrade levels of the car the player drives
    pub fn applied_upgrades(&self) -> CarUpgrades {
        self.car_upgrades(&self.applied_car_key())
    }

    /// Debit coins, failing without change when the balance is short
    pub fn spend(&mut self, cost: u32) -> DriftResult<()> {
        if self.coins < cost {
            return Err(DriftError::NotEnoughCoins {
                need: cost,
                have: self.coins,
            });
        }
        self.coins -= cost;
        Ok(())
    }
}
