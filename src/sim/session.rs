//! Session state machine
//!
//! Idle → Active → Ended → Idle. The session owns every piece of mutable
//! game state (score, countdown, mosquito, cooldown, RNG) and is driven by
//! two external schedulers: `tick`/`frame` once per rendered frame and
//! `second_tick` once per wall-clock second.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::check_hit;
use super::input::{HandTracker, InputMapper};
use super::state::{CooldownClock, CursorSample, SessionEvent, SessionResult, SessionState};
use super::target::Target;
use crate::consts::SESSION_SECONDS;
use crate::error::SessionError;
use crate::highscores::{Leaderboard, generate_identity};
use crate::persistence::KeyValueStore;

/// One player's game, from menu through game over
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    state: SessionState,
    target: Target,
    cooldown: CooldownClock,
    cursor: CursorSample,
    mapper: InputMapper,
    rng: Pcg32,
    leaderboard: Leaderboard<S>,
    last_result: Option<SessionResult>,
}

impl<S: KeyValueStore> Session<S> {
    /// Create an idle session
    pub fn new(seed: u64, store: S) -> Self {
        Self {
            state: SessionState::Idle,
            target: Target::default(),
            cooldown: CooldownClock::default(),
            cursor: CursorSample::NotDetected,
            mapper: InputMapper::default(),
            rng: Pcg32::seed_from_u64(seed),
            leaderboard: Leaderboard::new(store),
            last_result: None,
        }
    }

    /// Use a specific landmark mapping (e.g. unmirrored camera)
    pub fn with_mapper(mut self, mapper: InputMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn set_mapper(&mut self, mapper: InputMapper) {
        self.mapper = mapper;
    }

    /// Begin a new round
    ///
    /// Fails with `CaptureUnavailable` if the tracker can't be acquired;
    /// the session then stays where it was.
    pub fn start<T: HandTracker + ?Sized>(&mut self, tracker: &mut T) -> Result<(), SessionError> {
        if self.state.is_active() {
            log::warn!("start() ignored, session already active");
            return Ok(());
        }

        if let Err(e) = tracker.acquire() {
            log::warn!("Cannot start session: {}", e);
            return Err(e);
        }

        self.state = SessionState::Active {
            score: 0,
            time_remaining: SESSION_SECONDS,
        };
        self.target.reset_speed();
        self.target.spawn(&mut self.rng);
        self.cooldown.reset();
        self.cursor = CursorSample::NotDetected;
        self.last_result = None;

        log::info!("Session started ({}s)", SESSION_SECONDS);
        Ok(())
    }

    /// Per-frame update with an already mapped cursor
    pub fn tick(&mut self, cursor: CursorSample, now_ms: u64) -> Option<SessionEvent> {
        let SessionState::Active {
            score,
            time_remaining,
        } = self.state
        else {
            return None;
        };

        self.cursor = cursor;
        self.target.advance(&mut self.rng);

        if !check_hit(cursor, self.target.pos, now_ms, &self.cooldown).is_hit() {
            return None;
        }

        let at = self.target.pos;
        let score = score + 1;
        self.state = SessionState::Active {
            score,
            time_remaining,
        };
        self.cooldown.record_hit(now_ms);
        self.target.accelerate(score);
        self.target.spawn(&mut self.rng);

        log::debug!("Swat! score={} speed={:.2}", score, self.target.speed);
        Some(SessionEvent::Hit { score, at })
    }

    /// Per-frame update pulling the cursor from a tracker
    ///
    /// A tracker with nothing to report is a detection gap.
    pub fn frame<T: HandTracker + ?Sized>(
        &mut self,
        tracker: &mut T,
        now_ms: u64,
    ) -> Option<SessionEvent> {
        if !self.state.is_active() {
            return None;
        }
        let frame = tracker.poll(now_ms);
        let cursor = self.mapper.sample_frame(frame.as_ref());
        self.tick(cursor, now_ms)
    }

    /// Countdown step, once per second
    pub fn second_tick(&mut self) -> Option<SessionEvent> {
        let SessionState::Active {
            score,
            time_remaining,
        } = self.state
        else {
            return None;
        };

        let time_remaining = time_remaining.saturating_sub(1);
        if time_remaining > 0 {
            self.state = SessionState::Active {
                score,
                time_remaining,
            };
            return None;
        }

        self.state = SessionState::Ended { final_score: score };
        self.cursor = CursorSample::NotDetected;

        let identity = generate_identity(&mut self.rng);
        let rank = self.leaderboard.submit(identity.clone(), score);
        log::info!(
            "Session ended: {} scored {} (rank {:?})",
            identity,
            score,
            rank
        );

        let result = SessionResult {
            identity,
            score,
            rank,
        };
        self.last_result = Some(result.clone());
        Some(SessionEvent::Ended(result))
    }

    /// Dismiss the game-over screen
    pub fn acknowledge(&mut self) {
        if let SessionState::Ended { .. } = self.state {
            self.state = SessionState::Idle;
        }
    }

    /// Leave to the menu; an active round is forfeited without a score
    pub fn quit(&mut self) {
        match self.state {
            SessionState::Active { score, .. } => {
                log::info!("Session quit with score {} (not recorded)", score);
                self.state = SessionState::Idle;
                self.cursor = CursorSample::NotDetected;
            }
            SessionState::Ended { .. } => self.state = SessionState::Idle,
            SessionState::Idle => {}
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current score (final score once ended)
    pub fn score(&self) -> u32 {
        match self.state {
            SessionState::Idle => 0,
            SessionState::Active { score, .. } => score,
            SessionState::Ended { final_score } => final_score,
        }
    }

    pub fn time_remaining(&self) -> u32 {
        match self.state {
            SessionState::Active { time_remaining, .. } => time_remaining,
            _ => 0,
        }
    }

    pub fn target_position(&self) -> Vec2 {
        self.target.pos
    }

    pub fn target_speed(&self) -> f32 {
        self.target.speed
    }

    /// The mosquito is only drawn during play
    pub fn target_visible(&self) -> bool {
        self.state.is_active()
    }

    pub fn cursor(&self) -> CursorSample {
        self.cursor
    }

    /// Result of the most recent completed round
    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }
}
