//! Mosquito motion
//!
//! The target drifts in a straight line, reflects off the arena band and
//! occasionally picks a new heading on its own. Randomness is passed in so
//! the session decides which RNG drives it.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::{clamp_to_arena, heading};

/// The mosquito
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Length of `vel` at the next heading pick
    pub speed: f32,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(50.0),
            vel: Vec2::ZERO,
            speed: BASE_SPEED,
        }
    }
}

impl Target {
    /// Speed for a given score
    #[inline]
    pub fn speed_for_score(score: u32) -> f32 {
        BASE_SPEED + score as f32 * SPEED_PER_HIT
    }

    /// Place at a random spot away from the edges with a fresh heading
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = Vec2::new(
            rng.random_range(SPAWN_MIN..SPAWN_MAX),
            rng.random_range(SPAWN_MIN..SPAWN_MAX),
        );
        self.pick_heading(rng);
    }

    /// Random direction at the current speed
    pub fn pick_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let theta = rng.random_range(0.0..TAU);
        self.vel = heading(theta) * self.speed;
    }

    /// Advance one tick
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos += self.vel;

        // Reflect per axis, then pull back onto the band
        if self.pos.x <= ARENA_MIN || self.pos.x >= ARENA_MAX {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= ARENA_MIN || self.pos.y >= ARENA_MAX {
            self.vel.y = -self.vel.y;
        }
        self.pos = clamp_to_arena(self.pos);

        if rng.random_bool(WANDER_CHANCE) {
            self.pick_heading(rng);
        }
    }

    /// Set speed from score; applies at the next heading pick
    pub fn accelerate(&mut self, score: u32) {
        self.speed = Self::speed_for_score(score);
    }

    /// Back to base speed, heading unchanged
    pub fn reset_speed(&mut self) {
        self.speed = BASE_SPEED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_inside_band_at_speed() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut target = Target::default();
        for score in 0..50 {
            target.accelerate(score);
            target.spawn(&mut rng);
            assert!((SPAWN_MIN..SPAWN_MAX).contains(&target.pos.x));
            assert!((SPAWN_MIN..SPAWN_MAX).contains(&target.pos.y));
            assert!((target.vel.length() - target.speed).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bounce_reflects_and_clamps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut target = Target {
            pos: Vec2::new(94.8, 50.0),
            vel: Vec2::new(0.5, 0.0),
            speed: 0.5,
        };
        // Wander may resample the heading; only check the bounce when it didn't
        target.advance(&mut rng);
        assert_eq!(target.pos.x, ARENA_MAX);
        if target.vel.y == 0.0 {
            assert_eq!(target.vel.x, -0.5);
        }

        let mut target = Target {
            pos: Vec2::new(50.0, 5.2),
            vel: Vec2::new(0.0, -0.5),
            speed: 0.5,
        };
        target.advance(&mut rng);
        assert_eq!(target.pos.y, ARENA_MIN);
    }

    #[test]
    fn test_accelerate_keeps_velocity_until_next_heading() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut target = Target::default();
        target.spawn(&mut rng);
        let vel = target.vel;

        target.accelerate(3);
        assert_eq!(target.vel, vel);
        assert_eq!(target.speed, BASE_SPEED + 3.0 * SPEED_PER_HIT);

        target.pick_heading(&mut rng);
        assert!((target.vel.length() - target.speed).abs() < 1e-4);
    }

    #[test]
    fn test_wandering_changes_heading_eventually() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut target = Target::default();
        target.spawn(&mut rng);
        let initial = target.vel;
        let mut changed = false;
        for _ in 0..1000 {
            target.advance(&mut rng);
            if target.vel.x.abs() != initial.x.abs() || target.vel.y.abs() != initial.y.abs() {
                changed = true;
                break;
            }
        }
        assert!(changed);
    }

    proptest! {
        #[test]
        fn prop_stays_in_band(seed in any::<u64>(), score in 0u32..200, ticks in 1usize..2000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut target = Target::default();
            target.accelerate(score);
            target.spawn(&mut rng);
            for _ in 0..ticks {
                target.advance(&mut rng);
                prop_assert!(target.pos.x >= ARENA_MIN && target.pos.x <= ARENA_MAX);
                prop_assert!(target.pos.y >= ARENA_MIN && target.pos.y <= ARENA_MAX);
            }
        }

        #[test]
        fn prop_spawn_velocity_matches_speed(seed in any::<u64>(), speed in 0.01f32..50.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut target = Target { speed, ..Target::default() };
            target.spawn(&mut rng);
            prop_assert!((target.vel.length() - speed).abs() <= speed * 1e-5);
        }
    }
}
