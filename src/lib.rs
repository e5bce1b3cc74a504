//! Mosquito Swat - A hand-tracked reaction game
//!
//! Core modules:
//! - `sim`: Game-state engine (target motion, input mapping, hits, session)
//! - `highscores`: Top-10 leaderboard and player identity generation
//! - `persistence`: Key-value storage backends
//! - `settings`: Player preferences
//! - `platform`: Browser bindings for the UI layer

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{SessionError, StorageError};
pub use highscores::{Leaderboard, LeaderboardEntry, generate_identity};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target is kept inside this band on both axes (arena percent)
    pub const ARENA_MIN: f32 = 5.0;
    pub const ARENA_MAX: f32 = 95.0;

    /// Spawn band, away from the edge-bounce zone
    pub const SPAWN_MIN: f32 = 10.0;
    pub const SPAWN_MAX: f32 = 90.0;

    /// Target speed in arena percent per tick
    pub const BASE_SPEED: f32 = 0.5;
    /// Speed added per point scored
    pub const SPEED_PER_HIT: f32 = 0.1;
    /// Chance per tick of picking a new heading without a bounce
    pub const WANDER_CHANCE: f64 = 0.02;

    /// Squared hit radius (radius 15 arena percent)
    pub const HIT_RADIUS_SQ: f32 = 225.0;
    /// Minimum time between two accepted hits
    pub const HIT_COOLDOWN_MS: u64 = 300;

    /// Session countdown length
    pub const SESSION_SECONDS: u32 = 60;

    /// Landmarks reported per detected hand
    pub const LANDMARKS_PER_HAND: usize = 21;
    /// Index fingertip landmark
    pub const INDEX_FINGER_TIP: usize = 8;
}

/// Clamp both components of a position into the target band
#[inline]
pub fn clamp_to_arena(pos: Vec2) -> Vec2 {
    pos.clamp(
        Vec2::splat(consts::ARENA_MIN),
        Vec2::splat(consts::ARENA_MAX),
    )
}

/// Unit heading for an angle in radians
#[inline]
pub fn heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
