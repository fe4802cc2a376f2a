//! Deterministic simulation module
//!
//! All per-tick gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable event order
//! - No persistence or platform dependencies

pub mod config;
pub mod drift;
pub mod drive;
pub mod nitro;
pub mod state;
pub mod tick;

pub use config::DriftConfig;
pub use drift::{ClosedRun, DriftEngine};
pub use drive::DriveScript;
pub use nitro::{Nitro, NitroConfig, NitroTransition};
pub use state::{DriftPhase, DriftRunState};
pub use tick::{GameEvent, SimState, TickInput, tick};
