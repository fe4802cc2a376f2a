//! Fixed timestep simulation tick
//!
//! Steps every simulation component once and reports what happened.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::drift::{ClosedRun, DriftEngine};
use super::nitro::{Nitro, NitroTransition};
use crate::module::GameModule;
use crate::profile::Profile;

/// Motion sample and commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction the car body points
    pub heading: Vec3,
    /// Direction of travel
    pub velocity: Vec3,
    /// Speed magnitude
    pub speed: f32,
    /// Nitro button pressed this tick
    pub nitro: bool,
}

/// Something observable that happened during a tick, in occurrence order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NitroActivated,
    NitroDepleted,
    NitroRecharged,
    DriftStarted,
    MultiplierRaised { index: usize, multiplier: f32 },
    DriftEnded(ClosedRun),
    /// Emitted by the session when a closed run beats the stored record
    NewRecord { score: u32 },
}

/// All per-level simulation state
#[derive(Debug, Clone, Default)]
pub struct SimState {
    pub drift: DriftEngine,
    pub nitro: Nitro,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(drift: DriftEngine, nitro: Nitro) -> Self {
        Self {
            drift,
            nitro,
            time_ticks: 0,
        }
    }

    fn modules(&mut self) -> [&mut dyn GameModule; 2] {
        [&mut self.nitro, &mut self.drift]
    }

    pub fn init(&mut self, profile: &Profile) {
        for module in self.modules() {
            module.init(profile);
            log::debug!("{} module initialized", module.name());
        }
    }

    pub fn shutdown(&mut self) {
        for module in self.modules() {
            module.shutdown();
        }
    }
}

/// Advance the simulation by one timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;
    for module in state.modules() {
        module.update(input, dt, &mut events);
    }
    events
}

impl GameModule for DriftEngine {
    fn name(&self) -> &'static str {
        "Drift"
    }

    fn init(&mut self, _profile: &Profile) {
        self.reset_run();
    }

    fn update(&mut self, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
        let was_active = self.is_active();
        let index_before = self.multiplier_index();

        let closed = self.tick(input.heading, input.velocity, input.speed, dt);

        if !was_active && self.is_active() {
            events.push(GameEvent::DriftStarted);
        }
        if self.multiplier_index() > index_before {
            events.push(GameEvent::MultiplierRaised {
                index: self.multiplier_index(),
                multiplier: self.current_multiplier(),
            });
        }
        if let Some(run) = closed {
            events.push(GameEvent::DriftEnded(run));
        }
    }

    fn shutdown(&mut self) {
        self.reset_run();
    }
}

impl GameModule for Nitro {
    fn name(&self) -> &'static str {
        "Nitro"
    }

    fn init(&mut self, profile: &Profile) {
        self.reset();
        self.apply_upgrades(&profile.applied_upgrades());
    }

    fn update(&mut self, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
        if input.nitro && self.activate() {
            events.push(GameEvent::NitroActivated);
        }
        match self.tick(dt) {
            Some(NitroTransition::Depleted) => events.push(GameEvent::NitroDepleted),
            Some(NitroTransition::Recharged) => events.push(GameEvent::NitroRecharged),
            None => {}
        }
    }

    fn shutdown(&mut self) {
        self.force_deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drifting(angle_deg: f32) -> TickInput {
        let rad = angle_deg.to_radians();
        TickInput {
            heading: Vec3::Z,
            velocity: Vec3::new(rad.sin(), 0.0, rad.cos()),
            speed: 30.0,
            nitro: false,
        }
    }

    fn straight() -> TickInput {
        TickInput {
            heading: Vec3::Z,
            velocity: Vec3::Z,
            speed: 30.0,
            nitro: false,
        }
    }

    #[test]
    fn test_tick_reports_drift_lifecycle() {
        let mut state = SimState::default();

        let events = tick(&mut state, &drifting(40.0), 1.0);
        assert_eq!(events, vec![GameEvent::DriftStarted]);

        let events = tick(&mut state, &drifting(40.0), 0.5);
        assert!(events.is_empty());

        assert!(tick(&mut state, &straight(), 0.6).is_empty());
        let events = tick(&mut state, &straight(), 0.6);
        assert_eq!(events.len(), 1);
        match events[0] {
            GameEvent::DriftEnded(run) => {
                assert_eq!(run.final_score, 60); // 40 + 20
                assert_eq!(run.coins, 30);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(state.time_ticks, 4);
    }

    #[test]
    fn test_tick_reports_multiplier() {
        let mut state = SimState::default();
        let mut raised = Vec::new();
        for _ in 0..20 {
            for event in tick(&mut state, &drifting(60.0), 1.0) {
                if let GameEvent::MultiplierRaised { index, multiplier } = event {
                    raised.push((index, multiplier));
                }
            }
        }
        assert_eq!(raised.first(), Some(&(1, 2.0)));
        let indexes: Vec<usize> = raised.iter().map(|(i, _)| *i).collect();
        assert!(indexes.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_nitro_events_precede_drift_events() {
        let mut state = SimState::default();
        let input = TickInput {
            nitro: true,
            ..drifting(30.0)
        };
        let events = tick(&mut state, &input, 0.1);
        assert_eq!(events, vec![GameEvent::NitroActivated, GameEvent::DriftStarted]);
    }

    #[test]
    fn test_shutdown_abandons_run() {
        let mut state = SimState::default();
        tick(&mut state, &drifting(45.0), 1.0);
        state.shutdown();
        assert!(!state.drift.is_active());
        assert!(tick(&mut state, &straight(), 5.0).is_empty());
    }
}
