//! Drift scoring engine
//!
//! Detects drift runs from per-tick motion samples, accrues score under an
//! escalating multiplier and finalizes the reward when a run ends.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::DriftConfig;
use super::state::{DriftPhase, DriftRunState};
use crate::angle_between_deg;
use crate::error::DriftResult;

/// Reward for a finished drift run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRun {
    /// Run score rounded half away from zero
    pub final_score: u32,
    /// `round(score * reward_rate)`
    pub coins: u32,
}

/// The drift state machine: Idle -> Active <-> Grace -> Idle
#[derive(Debug, Clone)]
pub struct DriftEngine {
    config: DriftConfig,
    state: DriftRunState,
}

impl Default for DriftEngine {
    fn default() -> Self {
        Self {
            config: DriftConfig::default(),
            state: DriftRunState::default(),
        }
    }
}

impl DriftEngine {
    pub fn new(config: DriftConfig) -> DriftResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: DriftRunState::default(),
        })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn state(&self) -> &DriftRunState {
        &self.state
    }

    /// Advance one tick from heading and velocity directions
    pub fn tick(&mut self, heading: Vec3, velocity: Vec3, speed: f32, dt: f32) -> Option<ClosedRun> {
        self.tick_angle(angle_between_deg(heading, velocity), speed, dt)
    }

    /// Advance one tick from a precomputed slip angle in degrees
    pub fn tick_angle(&mut self, angle_deg: f32, speed: f32, dt: f32) -> Option<ClosedRun> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let angle = if angle_deg.is_finite() {
            angle_deg.clamp(0.0, 180.0)
        } else {
            0.0
        };

        if self.is_drift_condition(angle, speed) {
            if !self.state.is_drifting {
                self.state.is_drifting = true;
            }
            self.state.accumulated_score += angle * dt * self.current_multiplier();
            self.check_milestones();
            self.state.grace_elapsed = 0.0;
            None
        } else {
            self.state.grace_elapsed += dt;
            if self.state.is_drifting && self.state.grace_elapsed > self.config.grace_seconds {
                Some(self.close_run())
            } else {
                None
            }
        }
    }

    fn is_drift_condition(&self, angle: f32, speed: f32) -> bool {
        angle > self.config.angle_threshold_deg && speed > self.config.min_speed
    }

    /// Escalate by at most one milestone per accumulating tick
    fn check_milestones(&mut self) {
        let index = self.state.multiplier_index;
        if index < self.config.milestone_count()
            && self.state.accumulated_score >= self.config.milestones[index]
        {
            self.state.multiplier_index += 1;
            log::debug!(
                "Drift multiplier x{} at score {:.0}",
                self.current_multiplier(),
                self.state.accumulated_score
            );
        }
    }

    fn close_run(&mut self) -> ClosedRun {
        let score = self.state.accumulated_score;
        let run = ClosedRun {
            final_score: score.round() as u32,
            coins: (score * self.config.reward_rate).round() as u32,
        };
        self.state.clear();
        log::info!("Drift ended: score {} (+{} coins)", run.final_score, run.coins);
        run
    }

    /// Score of the open run (0 when idle)
    pub fn current_score(&self) -> f32 {
        self.state.accumulated_score
    }

    pub fn is_active(&self) -> bool {
        self.state.is_drifting
    }

    /// Multiplier applied to the next accumulating tick
    pub fn current_multiplier(&self) -> f32 {
        match self.state.multiplier_index {
            0 => 1.0,
            i => self.config.multipliers[i - 1],
        }
    }

    pub fn multiplier_index(&self) -> usize {
        self.state.multiplier_index
    }

    pub fn phase(&self) -> DriftPhase {
        self.state.phase()
    }

    /// Abandon the open run without producing a reward
    pub fn reset_run(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(milestones: Vec<f32>, multipliers: Vec<f32>) -> DriftEngine {
        DriftEngine::new(DriftConfig {
            milestones,
            multipliers,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_single_tick_opens_run() {
        let mut engine = DriftEngine::default();
        assert_eq!(engine.phase(), DriftPhase::Idle);

        assert!(engine.tick_angle(15.0, 20.0, 1.0).is_none());
        assert!(engine.is_active());
        assert_eq!(engine.current_score(), 15.0);
        assert_eq!(engine.current_multiplier(), 1.0);
        assert_eq!(engine.phase(), DriftPhase::Active);
    }

    #[test]
    fn test_single_tick_from_vectors() {
        let mut engine = DriftEngine::default();
        let heading = Vec3::Z;
        let rad = 15f32.to_radians();
        let velocity = Vec3::new(rad.sin(), 0.0, rad.cos());

        engine.tick(heading, velocity, 20.0, 1.0);
        assert!(engine.is_active());
        assert!((engine.current_score() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_below_thresholds_does_not_open() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(10.0, 20.0, 1.0); // angle not strictly above threshold
        engine.tick_angle(45.0, 10.0, 1.0); // speed not strictly above minimum
        assert!(!engine.is_active());
        assert_eq!(engine.current_score(), 0.0);
    }

    #[test]
    fn test_milestone_escalation() {
        let mut engine = engine(vec![500.0], vec![2.0]);

        for _ in 0..9 {
            engine.tick_angle(50.0, 20.0, 1.0);
        }
        assert_eq!(engine.multiplier_index(), 0);

        engine.tick_angle(50.0, 20.0, 1.0);
        assert_eq!(engine.current_score(), 500.0);
        assert_eq!(engine.multiplier_index(), 1);
        assert!(engine.state().multiplier_engaged());

        engine.tick_angle(50.0, 20.0, 1.0);
        assert_eq!(engine.current_score(), 600.0);
    }

    #[test]
    fn test_one_escalation_step_per_tick() {
        let mut engine = engine(vec![10.0, 20.0, 30.0], vec![2.0, 3.0, 4.0]);

        // One big tick crosses every milestone but only escalates once
        engine.tick_angle(90.0, 20.0, 1.0);
        assert_eq!(engine.multiplier_index(), 1);
        assert_eq!(engine.current_multiplier(), 2.0);

        engine.tick_angle(90.0, 20.0, 1.0);
        assert_eq!(engine.multiplier_index(), 2);
        engine.tick_angle(90.0, 20.0, 1.0);
        assert_eq!(engine.multiplier_index(), 3);
        assert_eq!(engine.current_multiplier(), 4.0);

        // Top of the table
        engine.tick_angle(90.0, 20.0, 1.0);
        assert_eq!(engine.multiplier_index(), 3);
    }

    #[test]
    fn test_grace_expiry_closes_run() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(50.0, 20.0, 2.0);
        assert_eq!(engine.current_score(), 100.0);

        assert!(engine.tick_angle(0.0, 20.0, 0.6).is_none());
        assert_eq!(engine.phase(), DriftPhase::Grace);

        let run = engine.tick_angle(0.0, 20.0, 0.6).expect("run should close");
        assert_eq!(
            run,
            ClosedRun {
                final_score: 100,
                coins: 50
            }
        );
        assert!(!engine.is_active());
        assert_eq!(engine.current_score(), 0.0);
        assert_eq!(engine.multiplier_index(), 0);
    }

    #[test]
    fn test_grace_exactly_elapsed_keeps_run() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(50.0, 20.0, 1.0);
        assert!(engine.tick_angle(0.0, 0.0, 1.0).is_none());
        assert!(engine.is_active());

        // Condition resumes and the score continues
        engine.tick_angle(50.0, 20.0, 1.0);
        assert_eq!(engine.current_score(), 100.0);
        assert_eq!(engine.phase(), DriftPhase::Active);
    }

    #[test]
    fn test_reset_run_drops_reward() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(100.0, 20.0, 3.0);
        assert_eq!(engine.current_score(), 300.0);

        engine.reset_run();
        assert_eq!(engine.current_score(), 0.0);
        assert!(!engine.is_active());

        for _ in 0..10 {
            assert!(engine.tick_angle(0.0, 0.0, 1.0).is_none());
        }
    }

    #[test]
    fn test_coins_round_half_away_from_zero() {
        let mut engine = DriftEngine::default();
        // 25 * 0.5 = 12.5 -> 13
        engine.tick_angle(25.0, 20.0, 1.0);
        let run = engine.tick_angle(0.0, 0.0, 2.0).unwrap();
        assert_eq!(run.final_score, 25);
        assert_eq!(run.coins, 13);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(50.0, 20.0, -1.0);
        engine.tick_angle(50.0, 20.0, f32::NAN);
        assert!(engine.is_active());
        assert_eq!(engine.current_score(), 0.0);

        // Negative dt never advances the grace timer
        engine.tick_angle(0.0, 0.0, -5.0);
        assert_eq!(engine.state().grace_elapsed, 0.0);
    }

    #[test]
    fn test_non_finite_speed_and_angle_do_not_drift() {
        let mut engine = DriftEngine::default();
        engine.tick_angle(50.0, f32::NAN, 1.0);
        engine.tick_angle(f32::INFINITY, 20.0, 1.0);
        engine.tick_angle(f32::NAN, 20.0, 1.0);
        engine.tick_angle(f32::NEG_INFINITY, f32::INFINITY, 1.0);
        assert!(!engine.is_active());
        assert_eq!(engine.current_score(), 0.0);
    }

    #[test]
    fn test_zero_vectors_do_not_drift() {
        let mut engine = DriftEngine::default();
        engine.tick(Vec3::ZERO, Vec3::X, 50.0, 1.0);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DriftEngine::new(DriftConfig {
            milestones: vec![],
            multipliers: vec![],
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
