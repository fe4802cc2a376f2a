//! Drift Score - gameplay core of a casual drift-racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drift scoring, nitro, tick loop)
//! - `economy`: Level ledger, upgrades, customization and car shop
//! - `profile`: Player progress record
//! - `persistence`: Profile stores (memory, versioned JSON file)
//! - `session`: Wires the above together for one play session
//! - `tuning`: Data-driven game balance

pub mod economy;
pub mod error;
pub mod module;
pub mod persistence;
pub mod profile;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{DriftError, DriftResult};
pub use module::GameModule;
pub use profile::Profile;
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Minimum heading/velocity angle (degrees) that counts as drifting
    pub const DRIFT_ANGLE_THRESHOLD: f32 = 10.0;
    /// Minimum speed that counts as drifting
    pub const DRIFT_MIN_SPEED: f32 = 10.0;
    /// Seconds the drift condition may lapse before the run closes
    pub const DRIFT_GRACE_SECONDS: f32 = 1.0;
    /// Score thresholds that raise the multiplier
    pub const DRIFT_MILESTONES: [f32; 5] = [500.0, 1000.0, 1500.0, 2000.0, 2500.0];
    /// Multiplier unlocked at each milestone
    pub const DRIFT_MULTIPLIERS: [f32; 5] = [2.0, 3.0, 4.0, 5.0, 6.0];
    /// Coins per point of final drift score
    pub const REWARD_RATE: f32 = 0.5;

    /// Nitro defaults
    pub const NITRO_DURATION: f32 = 3.0;
    pub const NITRO_RECHARGE_TIME: f32 = 10.0;
    pub const NITRO_TORQUE_MULTIPLIER: f32 = 1.5;
    pub const NITRO_SPEED_MULTIPLIER: f32 = 1.3;

    /// Upgrade levels per track
    pub const MAX_UPGRADE_LEVEL: u8 = 5;

    /// Car prices by shop index (first car is free and owned from the start)
    pub const CAR_PRICES: [u32; 5] = [0, 10, 20, 30, 40];
}

/// Angle between two directions in degrees, in [0, 180].
///
/// Degenerate (zero-length or non-finite) vectors give 0, which never counts
/// as drifting.
#[inline]
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }
    if a.length_squared() * b.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}

/// Linear interpolation, `t` clamped to [0, 1]
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_between() {
        assert!((angle_between_deg(Vec3::Z, Vec3::X) - 90.0).abs() < 1e-4);
        assert!(angle_between_deg(Vec3::Z, Vec3::Z * 5.0).abs() < 1e-3);
        assert!((angle_between_deg(Vec3::Z, -Vec3::Z) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_degenerate_vectors() {
        assert_eq!(angle_between_deg(Vec3::ZERO, Vec3::X), 0.0);
        assert_eq!(angle_between_deg(Vec3::X, Vec3::ZERO), 0.0);
        assert_eq!(angle_between_deg(Vec3::new(f32::NAN, 0.0, 1.0), Vec3::X), 0.0);
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(400.0, 800.0, 0.5), 600.0);
        assert_eq!(lerp(400.0, 800.0, 2.0), 800.0);
        assert_eq!(lerp(400.0, 800.0, -1.0), 400.0);
    }
}
