//! Drift run state
//!
//! Owned by the engine and mutated only by its tick.

use serde::{Deserialize, Serialize};

/// Where the drift state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftPhase {
    /// No run open
    Idle,
    /// Run open and the drift condition held on the last tick
    Active,
    /// Run open but the condition has lapsed; grace timer running
    Grace,
}

/// Mutable state of the current drift run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftRunState {
    pub is_drifting: bool,
    /// Score accrued in the open run (0 when idle)
    pub accumulated_score: f32,
    /// Milestones crossed in the open run
    pub multiplier_index: usize,
    /// Seconds since the drift condition last held
    pub grace_elapsed: f32,
}

impl DriftRunState {
    /// True once the multiplier has escalated in this run
    pub fn multiplier_engaged(&self) -> bool {
        self.multiplier_index > 0
    }

    pub fn phase(&self) -> DriftPhase {
        if !self.is_drifting {
            DriftPhase::Idle
        } else if self.grace_elapsed > 0.0 {
            DriftPhase::Grace
        } else {
            DriftPhase::Active
        }
    }

    /// Zero everything (run close or abandon)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
