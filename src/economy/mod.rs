//! Game economy: drift rewards, car upgrades, customization and the car shop

pub mod customization;
pub mod ledger;
pub mod shop;
pub mod upgrades;

pub use customization::{CarCustomization, Catalog, CatalogItem, PaintColor, Slot};
pub use ledger::{LevelLedger, RewardSink};
pub use shop::{Direction, Shop};
pub use upgrades::{CarUpgrades, StatRange, UpgradeKind, UpgradeStats, UpgradeTable};
