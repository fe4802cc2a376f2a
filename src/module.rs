//! Lifecycle shared by the per-tick game components
//!
//! Each component keeps its own state; the trait only fixes the call order
//! (`init` once, `update` every tick, `shutdown` once).

use crate::profile::Profile;
use crate::sim::{GameEvent, TickInput};

pub trait GameModule {
    fn name(&self) -> &'static str;

    /// Prepare for a level using the player's saved progress
    fn init(&mut self, profile: &Profile);

    /// Advance one tick, appending anything observable to `events`
    fn update(&mut self, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>);

    /// Drop transient state; open runs are abandoned without reward
    fn shutdown(&mut self);
}
