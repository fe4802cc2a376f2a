//! Car upgrades
//!
//! Four upgrade tracks per car. Each level raises the matching stat
//! linearly from its base value toward its maximum. Profiles store levels
//! only; the stat ranges are tuning.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_UPGRADE_LEVEL;
use crate::error::{DriftError, DriftResult};
use crate::lerp;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Engine,
    Brake,
    Handling,
    Nitro,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Engine,
        UpgradeKind::Brake,
        UpgradeKind::Handling,
        UpgradeKind::Nitro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Engine => "Engine",
            UpgradeKind::Brake => "Brake",
            UpgradeKind::Handling => "Handling",
            UpgradeKind::Nitro => "Nitro",
        }
    }
}

/// Stat value at level 0 and at max level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub base: f32,
    pub max: f32,
}

impl StatRange {
    pub const fn new(base: f32, max: f32) -> Self {
        Self { base, max }
    }

    /// Linear from `base` at level 0 to `max` at `MAX_UPGRADE_LEVEL`
    pub fn at_level(&self, level: u8) -> f32 {
        let progress = level.min(MAX_UPGRADE_LEVEL) as f32 / MAX_UPGRADE_LEVEL as f32;
        lerp(self.base, self.max, progress)
    }
}

/// Stat ranges shared by every car, part of the tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeStats {
    /// Engine torque
    pub engine: StatRange,
    /// Brake torque
    pub brake: StatRange,
    /// Traction helper strength
    pub handling: StatRange,
    /// Nitro strength (fractional boost bonus)
    pub nitro: StatRange,
}

impl Default for UpgradeStats {
    fn default() -> Self {
        Self {
            engine: StatRange::new(400.0, 800.0),
            brake: StatRange::new(2500.0, 4500.0),
            handling: StatRange::new(0.2, 0.6),
            nitro: StatRange::new(0.1, 0.5),
        }
    }
}

impl UpgradeStats {
    pub fn range(&self, kind: UpgradeKind) -> StatRange {
        match kind {
            UpgradeKind::Engine => self.engine,
            UpgradeKind::Brake => self.brake,
            UpgradeKind::Handling => self.handling,
            UpgradeKind::Nitro => self.nitro,
        }
    }

    /// Stat value of `kind` at the car's current level
    pub fn current_value(&self, car: &CarUpgrades, kind: UpgradeKind) -> f32 {
        self.range(kind).at_level(car.level(kind))
    }

    pub fn validate(&self) -> DriftResult<()> {
        for kind in UpgradeKind::ALL {
            let range = self.range(kind);
            if !range.base.is_finite() || !range.max.is_finite() {
                return Err(DriftError::Config(format!(
                    "stats.{} must be finite, got {}..{}",
                    kind.as_str().to_lowercase(),
                    range.base,
                    range.max
                )));
            }
        }
        Ok(())
    }
}

/// Upgrade levels of one car
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarUpgrades {
    pub engine_level: u8,
    pub brake_level: u8,
    pub handling_level: u8,
    pub nitro_level: u8,
}

impl CarUpgrades {
    pub fn level(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Engine => self.engine_level,
            UpgradeKind::Brake => self.brake_level,
            UpgradeKind::Handling => self.handling_level,
            UpgradeKind::Nitro => self.nitro_level,
        }
    }

    /// Set a level, clamped to `0..=MAX_UPGRADE_LEVEL`
    pub fn set_level(&mut self, kind: UpgradeKind, level: u8) {
        let level = level.min(MAX_UPGRADE_LEVEL);
        match kind {
            UpgradeKind::Engine => self.engine_level = level,
            UpgradeKind::Brake => self.brake_level = level,
            UpgradeKind::Handling => self.handling_level = level,
            UpgradeKind::Nitro => self.nitro_level = level,
        }
    }

    pub fn is_max_level(&self, kind: UpgradeKind) -> bool {
        self.level(kind) >= MAX_UPGRADE_LEVEL
    }
}

/// Coin cost of each level, per upgrade track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTable {
    pub engine: Vec<u32>,
    pub brake: Vec<u32>,
    pub handling: Vec<u32>,
    pub nitro: Vec<u32>,
}

impl Default for UpgradeTable {
    fn default() -> Self {
        Self {
            engine: vec![100, 200, 400, 800, 1600],
            brake: vec![80, 160, 320, 640, 1280],
            handling: vec![120, 240, 480, 960, 1920],
            nitro: vec![150, 300, 600, 1200, 2400],
        }
    }
}

impl UpgradeTable {
    fn costs(&self, kind: UpgradeKind) -> &[u32] {
        match kind {
            UpgradeKind::Engine => &self.engine,
            UpgradeKind::Brake => &self.brake,
            UpgradeKind::Handling => &self.handling,
            UpgradeKind::Nitro => &self.nitro,
        }
    }

    /// Cost to go from `level` to `level + 1`; None past the table
    pub fn cost(&self, kind: UpgradeKind, level: u8) -> Option<u32> {
        self.costs(kind).get(level as usize).copied()
    }

    pub fn can_upgrade(&self, profile: &Profile, car: &str, kind: UpgradeKind) -> bool {
        let upgrades = profile.car_upgrades(car);
        if upgrades.is_max_level(kind) {
            return false;
        }
        self.cost(kind, upgrades.level(kind))
            .is_some_and(|cost| profile.coins >= cost)
    }

    /// Buy the next level of `kind` for `car`. Returns the new level.
    pub fn upgrade(&self, profile: &mut Profile, car: &str, kind: UpgradeKind) -> DriftResult<u8> {
        let upgrades = profile.car_upgrades(car);
        let level = upgrades.level(kind);
        let max_level = || DriftError::MaxLevel {
            car: car.to_string(),
            kind,
        };
        if upgrades.is_max_level(kind) {
            return Err(max_level());
        }
        let cost = self.cost(kind, level).ok_or_else(max_level)?;

        profile.spend(cost)?;
        profile.car_upgrades_mut(car).set_level(kind, level + 1);
        log::info!(
            "Upgraded {} {} to level {} for {} coins",
            car,
            kind.as_str(),
            level + 1,
            cost
        );
        Ok(level + 1)
    }

    /// Back to level 0 on every track (no refund)
    pub fn reset_car(profile: &mut Profile, car: &str) {
        if let Some(upgrades) = profile.upgrades.get_mut(car) {
            *upgrades = CarUpgrades::default();
        }
    }
}
