//! Car shop
//!
//! Buying and selecting cars by shop index.

use serde::{Deserialize, Serialize};

use crate::consts::CAR_PRICES;
use crate::error::{DriftError, DriftResult};
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Shop {
    prices: Vec<u32>,
    /// Car currently shown in the garage
    browsing: usize,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new(CAR_PRICES.to_vec())
    }
}

impl Shop {
    pub fn new(prices: Vec<u32>) -> Self {
        Self {
            prices,
            browsing: 0,
        }
    }

    pub fn car_count(&self) -> usize {
        self.prices.len()
    }

    pub fn price(&self, index: usize) -> Option<u32> {
        self.prices.get(index).copied()
    }

    pub fn browsing(&self) -> usize {
        self.browsing
    }

    /// Start browsing from the applied car
    pub fn sync(&mut self, profile: &Profile) {
        self.browsing = profile.applied_car.min(self.car_count().saturating_sub(1));
    }

    pub fn can_buy(&self, profile: &Profile, index: usize) -> bool {
        match self.price(index) {
            Some(price) => !profile.is_owned(index) && profile.coins >= price,
            None => false,
        }
    }

    pub fn buy(&self, profile: &mut Profile, index: usize) -> DriftResult<()> {
        let price = self.price(index).ok_or(DriftError::UnknownCar(index))?;
        if profile.is_owned(index) {
            return Err(DriftError::AlreadyOwned(index));
        }
        profile.spend(price)?;
        if profile.owned_cars.len() <= index {
            profile.owned_cars.resize(index + 1, false);
        }
        profile.owned_cars[index] = true;
        log::info!("Bought car {} for {} coins", index, price);
        Ok(())
    }

    /// Make an owned car the one the player drives
    pub fn select(&mut self, profile: &mut Profile, index: usize) -> DriftResult<()> {
        if index >= self.car_count() {
            return Err(DriftError::UnknownCar(index));
        }
        if !profile.is_owned(index) {
            return Err(DriftError::NotOwned(index));
        }
        profile.applied_car = index;
        self.browsing = index;
        Ok(())
    }

    /// Move the garage view one car left or right, wrapping around
    pub fn cycle(&mut self, direction: Direction) -> usize {
        let count = self.car_count();
        if count == 0 {
            return 0;
        }
        self.browsing = match direction {
            Direction::Left => (self.browsing + count - 1) % count,
            Direction::Right => (self.browsing + 1) % count,
        };
        self.browsing
    }
}
