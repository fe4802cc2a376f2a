//! Scripted drive
//!
//! Seeded generator of motion samples standing in for vehicle physics:
//! alternates straights and drift slides of random length and angle.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::tick::TickInput;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Straight,
    Slide { angle_deg: f32 },
}

#[derive(Debug, Clone)]
pub struct DriveScript {
    rng: Pcg32,
    segment: Segment,
    /// Seconds left in the current segment
    remaining: f32,
    /// Car yaw in radians
    yaw: f32,
    speed: f32,
}

impl DriveScript {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            segment: Segment::Straight,
            remaining: 0.0,
            yaw: 0.0,
            speed: 0.0,
        }
    }

    fn next_segment(&mut self) {
        self.segment = match self.segment {
            Segment::Straight => Segment::Slide {
                angle_deg: self.rng.random_range(12.0..55.0),
            },
            Segment::Slide { .. } => Segment::Straight,
        };
        self.remaining = match self.segment {
            Segment::Straight => self.rng.random_range(1.2..3.0),
            Segment::Slide { .. } => self.rng.random_range(1.5..6.0),
        };
        self.speed = self.rng.random_range(18.0..40.0);
    }

    /// Produce the sample for the next `dt` seconds
    pub fn next_input(&mut self, dt: f32) -> TickInput {
        if self.remaining <= 0.0 {
            self.next_segment();
        }
        self.remaining -= dt;

        let slip = match self.segment {
            Segment::Straight => 0.0,
            Segment::Slide { angle_deg } => {
                // Slight wobble so the angle is not perfectly flat
                angle_deg + self.rng.random_range(-3.0..3.0)
            }
        };
        self.yaw += slip.to_radians() * 0.5 * dt;

        let heading = Quat::from_rotation_y(self.yaw) * Vec3::Z;
        let velocity = Quat::from_rotation_y(self.yaw - slip.to_radians()) * Vec3::Z;

        TickInput {
            heading,
            velocity,
            speed: self.speed,
            // Occasional boost on straights
            nitro: matches!(self.segment, Segment::Straight) && self.rng.random_bool(0.01),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_between_deg;

    #[test]
    fn test_same_seed_same_drive() {
        let mut a = DriveScript::new(7);
        let mut b = DriveScript::new(7);
        for _ in 0..500 {
            let (ia, ib) = (a.next_input(1.0 / 60.0), b.next_input(1.0 / 60.0));
            assert_eq!(ia.heading, ib.heading);
            assert_eq!(ia.velocity, ib.velocity);
            assert_eq!(ia.speed, ib.speed);
            assert_eq!(ia.nitro, ib.nitro);
        }
    }

    #[test]
    fn test_drive_contains_slides() {
        let mut drive = DriveScript::new(42);
        let slides = (0..1200)
            .map(|_| drive.next_input(1.0 / 60.0))
            .filter(|input| angle_between_deg(input.heading, input.velocity) > 10.0)
            .count();
        assert!(slides > 0);
    }
}
