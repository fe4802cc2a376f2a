//! Nitro boost
//!
//! A timed boost followed by a recharge period. The upgrade bonus scales the
//! boost multipliers while it is active.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::economy::{CarUpgrades, StatRange, UpgradeKind, UpgradeStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NitroConfig {
    /// Seconds a boost lasts
    pub duration: f32,
    /// Seconds from depletion until the next boost is available
    pub recharge_time: f32,
    pub torque_multiplier: f32,
    pub speed_multiplier: f32,
}

impl Default for NitroConfig {
    fn default() -> Self {
        Self {
            duration: NITRO_DURATION,
            recharge_time: NITRO_RECHARGE_TIME,
            torque_multiplier: NITRO_TORQUE_MULTIPLIER,
            speed_multiplier: NITRO_SPEED_MULTIPLIER,
        }
    }
}

/// State change reported by `Nitro::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NitroTransition {
    Depleted,
    Recharged,
}

#[derive(Debug, Clone)]
pub struct Nitro {
    config: NitroConfig,
    active: bool,
    ready: bool,
    /// Boost time remaining
    timer: f32,
    /// Recharge progress in seconds
    recharge_timer: f32,
    /// Fractional bonus from the nitro upgrade (0.1 = +10%)
    upgrade_bonus: f32,
    /// Bonus at upgrade level 0 and at max level
    strength: StatRange,
}

impl Default for Nitro {
    fn default() -> Self {
        Self::new(NitroConfig::default())
    }
}

impl Nitro {
    pub fn new(config: NitroConfig) -> Self {
        Self {
            config,
            active: false,
            ready: true,
            timer: 0.0,
            recharge_timer: 0.0,
            upgrade_bonus: 0.0,
            strength: UpgradeStats::default().nitro,
        }
    }

    pub fn with_strength(mut self, strength: StatRange) -> Self {
        self.strength = strength;
        self
    }

    pub fn config(&self) -> &NitroConfig {
        &self.config
    }

    /// Start a boost. Returns false if one is running or still recharging.
    pub fn activate(&mut self) -> bool {
        if !self.ready || self.active {
            return false;
        }
        self.active = true;
        self.timer = self.config.duration;
        log::debug!(
            "Nitro activated (torque x{:.2}, speed x{:.2})",
            self.torque_factor(),
            self.speed_factor()
        );
        true
    }

    pub fn tick(&mut self, dt: f32) -> Option<NitroTransition> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        if self.active {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.deplete();
                return Some(NitroTransition::Depleted);
            }
        } else if !self.ready {
            self.recharge_timer += dt;
            if self.recharge_timer >= self.config.recharge_time {
                self.ready = true;
                self.recharge_timer = 0.0;
                return Some(NitroTransition::Recharged);
            }
        }
        None
    }

    fn deplete(&mut self) {
        self.active = false;
        self.ready = false;
        self.timer = 0.0;
        self.recharge_timer = 0.0;
    }

    /// End a running boost early; recharge starts from zero
    pub fn force_deactivate(&mut self) {
        if self.active {
            self.deplete();
        }
    }

    pub fn instant_recharge(&mut self) {
        if !self.active {
            self.ready = true;
            self.recharge_timer = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// 1.0 when ready, otherwise recharge progress in [0, 1)
    pub fn charge(&self) -> f32 {
        if self.ready {
            1.0
        } else if self.config.recharge_time > 0.0 {
            (self.recharge_timer / self.config.recharge_time).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds of boost left (0 when inactive)
    pub fn remaining(&self) -> f32 {
        if self.active { self.timer.max(0.0) } else { 0.0 }
    }

    pub fn set_upgrade_bonus(&mut self, bonus: f32) {
        self.upgrade_bonus = if bonus.is_finite() { bonus.max(0.0) } else { 0.0 };
    }

    pub fn upgrade_bonus(&self) -> f32 {
        self.upgrade_bonus
    }

    /// Take the upgrade bonus from a car's nitro level
    pub fn apply_upgrades(&mut self, car: &CarUpgrades) {
        self.set_upgrade_bonus(self.strength.at_level(car.level(UpgradeKind::Nitro)));
    }

    /// Engine torque factor to apply this frame
    pub fn torque_factor(&self) -> f32 {
        if self.active {
            self.config.torque_multiplier * (1.0 + self.upgrade_bonus)
        } else {
            1.0
        }
    }

    /// Top speed factor to apply this frame
    pub fn speed_factor(&self) -> f32 {
        if self.active {
            self.config.speed_multiplier * (1.0 + self.upgrade_bonus)
        } else {
            1.0
        }
    }

    /// Back to a full, idle tank
    pub fn reset(&mut self) {
        self.active = false;
        self.ready = true;
        self.timer = 0.0;
        self.recharge_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_cycle() {
        let mut nitro = Nitro::default();
        assert!(nitro.activate());
        assert!(!nitro.activate());
        assert!(nitro.is_active());
        assert_eq!(nitro.torque_factor(), 1.5);

        assert_eq!(nitro.tick(2.0), None);
        assert_eq!(nitro.tick(1.0), Some(NitroTransition::Depleted));
        assert!(!nitro.is_active());
        assert!(!nitro.is_ready());
        assert_eq!(nitro.charge(), 0.0);
        assert_eq!(nitro.torque_factor(), 1.0);

        // Cannot boost while recharging
        assert!(!nitro.activate());
        assert_eq!(nitro.tick(5.0), None);
        assert_eq!(nitro.charge(), 0.5);
        assert_eq!(nitro.tick(5.0), Some(NitroTransition::Recharged));
        assert_eq!(nitro.charge(), 1.0);
        assert!(nitro.activate());
    }

    #[test]
    fn test_upgrade_bonus_scales_factors() {
        let mut nitro = Nitro::default();
        nitro.set_upgrade_bonus(0.5);
        assert_eq!(nitro.speed_factor(), 1.0);
        nitro.activate();
        assert!((nitro.torque_factor() - 2.25).abs() < 1e-6);
        assert!((nitro.speed_factor() - 1.95).abs() < 1e-6);
    }

    #[test]
    fn test_bonus_follows_nitro_level() {
        let mut nitro = Nitro::default().with_strength(StatRange::new(0.0, 1.0));
        let mut car = CarUpgrades::default();
        nitro.apply_upgrades(&car);
        assert_eq!(nitro.upgrade_bonus(), 0.0);

        car.set_level(UpgradeKind::Nitro, 5);
        nitro.apply_upgrades(&car);
        assert_eq!(nitro.upgrade_bonus(), 1.0);
        nitro.activate();
        assert!((nitro.torque_factor() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_force_deactivate_and_instant_recharge() {
        let mut nitro = Nitro::default();
        nitro.activate();
        nitro.force_deactivate();
        assert!(!nitro.is_active());
        assert!(!nitro.is_ready());

        nitro.instant_recharge();
        assert!(nitro.is_ready());
        assert_eq!(nitro.charge(), 1.0);
    }
}
