//! Car customization
//!
//! Paint, wheels and spoilers. Every slot has a priced catalog whose first
//! entry is free and unlocked on every car. Other entries are bought per car
//! and can only be applied once unlocked there.

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, DriftResult};
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Color,
    Wheel,
    Spoiler,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Color, Slot::Wheel, Slot::Spoiler];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Color => "Color",
            Slot::Wheel => "Wheel",
            Slot::Spoiler => "Spoiler",
        }
    }
}

/// Paint with its display color (RGBA, 0..1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintColor {
    pub name: String,
    pub rgba: [f32; 4],
    pub price: u32,
}

impl PaintColor {
    fn new(name: &str, rgba: [f32; 4], price: u32) -> Self {
        Self {
            name: name.to_string(),
            rgba,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: u32,
}

impl CatalogItem {
    fn new(name: &str, price: u32) -> Self {
        Self {
            name: name.to_string(),
            price,
        }
    }
}

/// Customization state of one car
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarCustomization {
    pub color: usize,
    pub wheel: usize,
    pub spoiler: usize,
    /// Unlock flags by catalog index; index 0 counts as unlocked regardless
    pub unlocked_colors: Vec<bool>,
    pub unlocked_wheels: Vec<bool>,
    pub unlocked_spoilers: Vec<bool>,
}

impl CarCustomization {
    /// Catalog index currently applied in `slot`
    pub fn selected(&self, slot: Slot) -> usize {
        match slot {
            Slot::Color => self.color,
            Slot::Wheel => self.wheel,
            Slot::Spoiler => self.spoiler,
        }
    }

    fn flags(&self, slot: Slot) -> &[bool] {
        match slot {
            Slot::Color => &self.unlocked_colors,
            Slot::Wheel => &self.unlocked_wheels,
            Slot::Spoiler => &self.unlocked_spoilers,
        }
    }

    fn flags_mut(&mut self, slot: Slot) -> &mut Vec<bool> {
        match slot {
            Slot::Color => &mut self.unlocked_colors,
            Slot::Wheel => &mut self.unlocked_wheels,
            Slot::Spoiler => &mut self.unlocked_spoilers,
        }
    }

    pub fn is_unlocked(&self, slot: Slot, index: usize) -> bool {
        index == 0 || self.flags(slot).get(index).copied().unwrap_or(false)
    }

    fn mark_unlocked(&mut self, slot: Slot, index: usize) {
        let flags = self.flags_mut(slot);
        if flags.len() <= index {
            flags.resize(index + 1, false);
        }
        flags[index] = true;
    }

    fn select(&mut self, slot: Slot, index: usize) {
        match slot {
            Slot::Color => self.color = index,
            Slot::Wheel => self.wheel = index,
            Slot::Spoiler => self.spoiler = index,
        }
    }
}

/// Everything a car can be fitted with, and what it costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub colors: Vec<PaintColor>,
    pub wheels: Vec<CatalogItem>,
    pub spoilers: Vec<CatalogItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            colors: vec![
                PaintColor::new("White", [1.0, 1.0, 1.0, 1.0], 0),
                PaintColor::new("Black", [0.0, 0.0, 0.0, 1.0], 500),
                PaintColor::new("Red", [1.0, 0.0, 0.0, 1.0], 300),
                PaintColor::new("Blue", [0.0, 0.0, 1.0, 1.0], 400),
                PaintColor::new("Green", [0.0, 1.0, 0.0, 1.0], 350),
                PaintColor::new("Yellow", [1.0, 0.92, 0.016, 1.0], 600),
                PaintColor::new("Cyan", [0.0, 1.0, 1.0, 1.0], 450),
                PaintColor::new("Magenta", [1.0, 0.0, 1.0, 1.0], 700),
            ],
            wheels: vec![
                CatalogItem::new("Stock", 0),
                CatalogItem::new("Sport", 600),
                CatalogItem::new("Offroad", 900),
                CatalogItem::new("Racing", 1500),
                CatalogItem::new("Chrome", 2500),
            ],
            spoilers: vec![
                CatalogItem::new("None", 0),
                CatalogItem::new("Sport", 1500),
                CatalogItem::new("GT", 3000),
                CatalogItem::new("Racing", 5000),
                CatalogItem::new("Carbon", 8000),
                CatalogItem::new("Wing", 12000),
            ],
        }
    }
}

impl Catalog {
    pub fn len(&self, slot: Slot) -> usize {
        match slot {
            Slot::Color => self.colors.len(),
            Slot::Wheel => self.wheels.len(),
            Slot::Spoiler => self.spoilers.len(),
        }
    }

    pub fn price(&self, slot: Slot, index: usize) -> Option<u32> {
        match slot {
            Slot::Color => self.colors.get(index).map(|c| c.price),
            Slot::Wheel => self.wheels.get(index).map(|w| w.price),
            Slot::Spoiler => self.spoilers.get(index).map(|s| s.price),
        }
    }

    pub fn name(&self, slot: Slot, index: usize) -> Option<&str> {
        match slot {
            Slot::Color => self.colors.get(index).map(|c| c.name.as_str()),
            Slot::Wheel => self.wheels.get(index).map(|w| w.name.as_str()),
            Slot::Spoiler => self.spoilers.get(index).map(|s| s.name.as_str()),
        }
    }

    /// Every slot needs a free first entry to fall back on
    pub fn validate(&self) -> DriftResult<()> {
        for slot in Slot::ALL {
            match self.price(slot, 0) {
                None => {
                    return Err(DriftError::Config(format!(
                        "customization {} catalog must not be empty",
                        slot.as_str()
                    )));
                }
                Some(price) if price != 0 => {
                    return Err(DriftError::Config(format!(
                        "first customization {} must be free, costs {price}",
                        slot.as_str()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_index(&self, slot: Slot, index: usize) -> DriftResult<u32> {
        self.price(slot, index)
            .ok_or(DriftError::UnknownItem { slot, index })
    }

    pub fn is_unlocked(&self, profile: &Profile, car: &str, slot: Slot, index: usize) -> bool {
        index < self.len(slot) && profile.car_customization(car).is_unlocked(slot, index)
    }

    pub fn can_unlock(&self, profile: &Profile, car: &str, slot: Slot, index: usize) -> bool {
        match self.price(slot, index) {
            Some(price) => !self.is_unlocked(profile, car, slot, index) && profile.coins >= price,
            None => false,
        }
    }

    /// Buy `index` in `slot` for `car`
    pub fn unlock(
        &self,
        profile: &mut Profile,
        car: &str,
        slot: Slot,
        index: usize,
    ) -> DriftResult<()> {
        let price = self.check_index(slot, index)?;
        if self.is_unlocked(profile, car, slot, index) {
            return Err(DriftError::AlreadyUnlocked {
                car: car.to_string(),
                slot,
                index,
            });
        }
        profile.spend(price)?;
        profile
            .car_customization_mut(car)
            .mark_unlocked(slot, index);
        log::info!(
            "Unlocked {} {} for {} ({} coins)",
            slot.as_str(),
            self.name(slot, index).unwrap_or_default(),
            car,
            price
        );
        Ok(())
    }

    /// Fit an unlocked item to `car`
    pub fn apply(
        &self,
        profile: &mut Profile,
        car: &str,
        slot: Slot,
        index: usize,
    ) -> DriftResult<()> {
        self.check_index(slot, index)?;
        if !self.is_unlocked(profile, car, slot, index) {
            return Err(DriftError::NotUnlocked {
                car: car.to_string(),
                slot,
                index,
            });
        }
        profile.car_customization_mut(car).select(slot, index);
        log::debug!("{} {} set to {}", car, slot.as_str(), index);
        Ok(())
    }

    pub fn unlock_color(&self, profile: &mut Profile, car: &str, index: usize) -> DriftResult<()> {
        self.unlock(profile, car, Slot::Color, index)
    }

    pub fn unlock_wheel(&self, profile: &mut Profile, car: &str, index: usize) -> DriftResult<()> {
        self.unlock(profile, car, Slot::Wheel, index)
    }

    pub fn unlock_spoiler(
        &self,
        profile: &mut Profile,
        car: &str,
        index: usize,
    ) -> DriftResult<()> {
        self.unlock(profile, car, Slot::Spoiler, index)
    }

    pub fn apply_color(&self, profile: &mut Profile, car: &str, index: usize) -> DriftResult<()> {
        self.apply(profile, car, Slot::Color, index)
    }

    pub fn apply_wheel(&self, profile: &mut Profile, car: &str, index: usize) -> DriftResult<()> {
        self.apply(profile, car, Slot::Wheel, index)
    }

    pub fn apply_spoiler(&self, profile: &mut Profile, car: &str, index: usize) -> DriftResult<()> {
        self.apply(profile, car, Slot::Spoiler, index)
    }

    /// Paint color currently on `car`
    pub fn applied_color(&self, profile: &Profile, car: &str) -> Option<&PaintColor> {
        self.colors.get(profile.car_customization(car).color)
    }
}
