use thiserror::Error;

use crate::economy::{Slot, UpgradeKind};

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Not enough coins: need {need}, have {have}")]
    NotEnoughCoins { need: u32, have: u32 },

    #[error("{car} {kind:?} is already at max level")]
    MaxLevel { car: String, kind: UpgradeKind },

    #[error("Unknown car index {0}")]
    UnknownCar(usize),

    #[error("Car {0} is already owned")]
    AlreadyOwned(usize),

    #[error("Car {0} is not owned")]
    NotOwned(usize),

    #[error("No {slot:?} with index {index}")]
    UnknownItem { slot: Slot, index: usize },

    #[error("{car} {slot:?} {index} is already unlocked")]
    AlreadyUnlocked { car: String, slot: Slot, index: usize },

    #[error("{car} {slot:?} {index} is not unlocked")]
    NotUnlocked { car: String, slot: Slot, index: usize },

    #[error("Unsupported save version {0}")]
    SaveVersion(u32),
}

pub type DriftResult<T> = Result<T, DriftError>;
