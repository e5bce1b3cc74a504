//! Session state and shared value types

use glam::Vec2;

use crate::consts::HIT_COOLDOWN_MS;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// On the menu, nothing moving
    Idle,
    /// Countdown running
    Active { score: u32, time_remaining: u32 },
    /// Countdown expired, waiting for the player to acknowledge
    Ended { final_score: u32 },
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    /// Short name for logging and the UI layer
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active { .. } => "active",
            SessionState::Ended { .. } => "ended",
        }
    }
}

/// Hand cursor for one tick, in arena percent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CursorSample {
    Detected(Vec2),
    #[default]
    NotDetected,
}

impl CursorSample {
    pub fn position(&self) -> Option<Vec2> {
        match self {
            CursorSample::Detected(pos) => Some(*pos),
            CursorSample::NotDetected => None,
        }
    }

    /// True when detected but outside the visible arena
    pub fn out_of_view(&self) -> bool {
        self.position()
            .is_some_and(|p| !(0.0..=100.0).contains(&p.x) || !(0.0..=100.0).contains(&p.y))
    }
}

/// Last accepted hit, in monotonic milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CooldownClock {
    pub last_hit_ms: Option<u64>,
}

impl CooldownClock {
    /// True while `now_ms` is still inside the cooldown window
    pub fn cooling_down(&self, now_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < HIT_COOLDOWN_MS)
    }

    pub fn record_hit(&mut self, now_ms: u64) {
        self.last_hit_ms = Some(now_ms);
    }

    pub fn reset(&mut self) {
        self.last_hit_ms = None;
    }
}

/// Outcome of a completed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub identity: String,
    pub score: u32,
    /// Leaderboard rank (1-indexed), None if it missed the top 10
    pub rank: Option<usize>,
}

/// Things the UI layer reacts to (sounds, flashes, game-over modal)
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Mosquito swatted at this position
    Hit { score: u32, at: Vec2 },
    /// Countdown expired
    Ended(SessionResult),
}
