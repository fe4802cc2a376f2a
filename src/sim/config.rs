//! Drift scoring configuration
//!
//! Immutable once handed to a `DriftEngine`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{DriftError, DriftResult};

/// Thresholds, milestone table and reward rate for drift scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Minimum heading/velocity angle in degrees
    pub angle_threshold_deg: f32,
    /// Minimum speed
    pub min_speed: f32,
    /// Seconds the condition may lapse before the run is closed
    pub grace_seconds: f32,
    /// Score thresholds, strictly increasing
    pub milestones: Vec<f32>,
    /// Multiplier unlocked at the milestone with the same index
    pub multipliers: Vec<f32>,
    /// Coins per point of final score
    pub reward_rate: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            angle_threshold_deg: DRIFT_ANGLE_THRESHOLD,
            min_speed: DRIFT_MIN_SPEED,
            grace_seconds: DRIFT_GRACE_SECONDS,
            milestones: DRIFT_MILESTONES.to_vec(),
            multipliers: DRIFT_MULTIPLIERS.to_vec(),
            reward_rate: REWARD_RATE,
        }
    }
}

impl DriftConfig {
    /// Check the table shapes and numeric ranges
    pub fn validate(&self) -> DriftResult<()> {
        let non_negative = [
            ("angle_threshold_deg", self.angle_threshold_deg),
            ("min_speed", self.min_speed),
            ("grace_seconds", self.grace_seconds),
            ("reward_rate", self.reward_rate),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DriftError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.milestones.is_empty() {
            return Err(DriftError::Config("milestones must not be empty".into()));
        }
        if self.milestones.len() != self.multipliers.len() {
            return Err(DriftError::Config(format!(
                "{} milestones but {} multipliers",
                self.milestones.len(),
                self.multipliers.len()
            )));
        }
        if self.milestones.iter().any(|m| !m.is_finite()) {
            return Err(DriftError::Config("milestones must be finite".into()));
        }
        if self.milestones.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DriftError::Config(
                "milestones must be strictly increasing".into(),
            ));
        }
        if self.multipliers.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(DriftError::Config(
                "multipliers must be finite and positive".into(),
            ));
        }
        Ok(())
    }

    /// Number of milestones (the highest reachable multiplier index)
    pub fn milestone_count(&self) -> usize {
        self.milestones.len()
    }
}
