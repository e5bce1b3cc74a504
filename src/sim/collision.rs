//! Swat detection
//!
//! A hit needs a detected cursor, an expired cooldown and the fingertip
//! inside the hit radius of the mosquito. Distance is measured in raw arena
//! percent on both axes, so on a wide screen the hit zone is an ellipse.

use glam::Vec2;

use super::state::{CooldownClock, CursorSample};
use crate::consts::HIT_RADIUS_SQ;

/// Result of a swat check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Hit,
    Miss,
}

impl HitResult {
    pub fn is_hit(self) -> bool {
        self == HitResult::Hit
    }
}

/// Check whether the cursor swats the target at `now_ms`
///
/// Pure: on a hit the caller records it on the clock.
pub fn check_hit(
    cursor: CursorSample,
    target: Vec2,
    now_ms: u64,
    cooldown: &CooldownClock,
) -> HitResult {
    let CursorSample::Detected(hand) = cursor else {
        return HitResult::Miss;
    };
    if cooldown.cooling_down(now_ms) {
        return HitResult::Miss;
    }
    if hand.distance_squared(target) < HIT_RADIUS_SQ {
        HitResult::Hit
    } else {
        HitResult::Miss
    }
}
