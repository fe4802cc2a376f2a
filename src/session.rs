//! One play session
//!
//! Owns the simulation, the level ledger and the player profile, and routes
//! each finished drift run into both. Shop, upgrade and customization
//! purchases go through here too. The profile is saved after every
//! change; a failed save is logged and play continues.

use crate::economy::{
    Catalog, Direction, LevelLedger, RewardSink, Shop, Slot, UpgradeKind, UpgradeTable,
};
use crate::error::DriftResult;
use crate::persistence::ProfileStore;
use crate::profile::Profile;
use crate::sim::{self, DriftEngine, GameEvent, Nitro, SimState, TickInput};
use crate::tuning::Tuning;

pub struct Session<S: ProfileStore> {
    sim: SimState,
    ledger: LevelLedger,
    profile: Profile,
    shop: Shop,
    upgrades: UpgradeTable,
    catalog: Catalog,
    store: S,
}

impl<S: ProfileStore> Session<S> {
    /// Validate tuning, load the profile and initialize every module
    pub fn new(tuning: Tuning, mut store: S) -> DriftResult<Self> {
        tuning.validate()?;
        let profile = store.load()?;

        let mut sim = SimState::new(
            DriftEngine::new(tuning.drift)?,
            Nitro::new(tuning.nitro).with_strength(tuning.stats.nitro),
        );
        sim.init(&profile);

        let mut shop = Shop::new(tuning.shop_prices);
        shop.sync(&profile);

        Ok(Self {
            sim,
            ledger: LevelLedger::new(),
            profile,
            shop,
            upgrades: tuning.upgrades,
            catalog: tuning.customization,
            store,
        })
    }

    /// Advance one frame and settle any finished drift run
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let mut events = sim::tick(&mut self.sim, input, dt);

        let closed: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::DriftEnded(run) => Some(*run),
                _ => None,
            })
            .collect();

        for run in &closed {
            self.ledger.credit(run);
            if self.profile.credit(run) {
                log::info!("New drift record: {}", run.final_score);
                events.push(GameEvent::NewRecord {
                    score: run.final_score,
                });
            }
        }
        if !closed.is_empty() {
            self.persist();
        }
        events
    }

    /// Begin a new level: clear level totals and abandon any open run
    pub fn start_level(&mut self) {
        self.ledger.reset();
        self.sim.init(&self.profile);
    }

    pub fn can_upgrade(&self, kind: UpgradeKind) -> bool {
        self.upgrades
            .can_upgrade(&self.profile, &self.profile.applied_car_key(), kind)
    }

    /// Buy the next level of `kind` for the applied car
    pub fn upgrade(&mut self, kind: UpgradeKind) -> DriftResult<u8> {
        let car = self.profile.applied_car_key();
        let result = self.upgrades.upgrade(&mut self.profile, &car, kind);
        match &result {
            Ok(_) => {
                self.refresh_nitro_bonus();
                self.persist();
            }
            Err(err) => log::warn!("Upgrade rejected: {err}"),
        }
        result
    }

    pub fn buy_car(&mut self, index: usize) -> DriftResult<()> {
        let result = self.shop.buy(&mut self.profile, index);
        match &result {
            Ok(()) => self.persist(),
            Err(err) => log::warn!("Purchase rejected: {err}"),
        }
        result
    }

    pub fn select_car(&mut self, index: usize) -> DriftResult<()> {
        let result = self.shop.select(&mut self.profile, index);
        match &result {
            Ok(()) => {
                self.refresh_nitro_bonus();
                self.persist();
            }
            Err(err) => log::warn!("Selection rejected: {err}"),
        }
        result
    }

    /// Buy a paint, wheel or spoiler for the applied car
    pub fn unlock_customization(&mut self, slot: Slot, index: usize) -> DriftResult<()> {
        let car = self.profile.applied_car_key();
        let result = self.catalog.unlock(&mut self.profile, &car, slot, index);
        match &result {
            Ok(()) => self.persist(),
            Err(err) => log::warn!("Unlock rejected: {err}"),
        }
        result
    }

    /// Fit an unlocked paint, wheel or spoiler to the applied car
    pub fn apply_customization(&mut self, slot: Slot, index: usize) -> DriftResult<()> {
        let car = self.profile.applied_car_key();
        let result = self.catalog.apply(&mut self.profile, &car, slot, index);
        match &result {
            Ok(()) => self.persist(),
            Err(err) => log::warn!("Customization rejected: {err}"),
        }
        result
    }

    /// Browse the garage; returns the shop index now shown
    pub fn cycle_car(&mut self, direction: Direction) -> usize {
        self.shop.cycle(direction)
    }

    pub fn set_mute_music(&mut self, mute: bool) {
        self.profile.mute_music = mute;
        self.persist();
    }

    /// Wipe the saved profile back to a fresh start
    pub fn reset_progress(&mut self) {
        self.profile.reset();
        self.shop.sync(&self.profile);
        self.start_level();
        self.persist();
    }

    /// Abandon the open run and flush the profile
    pub fn shutdown(&mut self) {
        self.sim.shutdown();
        self.persist();
    }

    fn refresh_nitro_bonus(&mut self) {
        self.sim
            .nitro
            .apply_upgrades(&self.profile.applied_upgrades());
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.profile) {
            log::warn!("Failed to save profile: {err}");
        }
    }

    pub fn drift(&self) -> &DriftEngine {
        &self.sim.drift
    }

    pub fn nitro(&self) -> &Nitro {
        &self.sim.nitro
    }

    pub fn ledger(&self) -> &LevelLedger {
        &self.ledger
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn time_ticks(&self) -> u64 {
        self.sim.time_ticks
    }
}
