//! Drift rewards bookkeeping
//!
//! The drift engine only reports a `ClosedRun`; whoever receives it credits
//! coins, tracks level totals and keeps the all-time record.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::sim::ClosedRun;

/// Receiver of finished drift runs
pub trait RewardSink {
    /// Credit a run. Returns true if it set a new record.
    fn credit(&mut self, run: &ClosedRun) -> bool;
}

/// Totals earned during the current level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLedger {
    pub score: u64,
    pub coins: u64,
    pub runs: u32,
    /// Best run of this level
    pub best_run: u32,
}

impl LevelLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new level
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl RewardSink for LevelLedger {
    fn credit(&mut self, run: &ClosedRun) -> bool {
        self.score += u64::from(run.final_score);
        self.coins += u64::from(run.coins);
        self.runs += 1;
        if run.final_score > self.best_run {
            self.best_run = run.final_score;
            true
        } else {
            false
        }
    }
}

impl RewardSink for Profile {
    fn credit(&mut self, run: &ClosedRun) -> bool {
        self.coins = self.coins.saturating_add(run.coins);
        if run.final_score > self.record_drift_score {
            self.record_drift_score = run.final_score;
            true
        } else {
            false
        }
    }
}
