//! Mosquito Swat entry point
//!
//! The browser build is driven from JavaScript through
//! `platform::web::WebSession`. Natively there is no camera, so this runs a
//! few headless rounds against a simulated hand and prints the leaderboard.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use mosquito_swat::consts::*;
    use mosquito_swat::persistence::{KeyValueStore, MemoryStore};
    use mosquito_swat::sim::{HandFrame, HandTracker, Landmark, Session, SessionEvent};
    use mosquito_swat::{SessionError, Settings};

    /// Frames per simulated second
    const FPS: u64 = 60;
    const FRAME_MS: u64 = 1000 / FPS;
    const ROUNDS: usize = 3;

    /// A hand that lags behind the mosquito and sometimes drops out of view
    struct SimulatedHand {
        rng: Pcg32,
        /// Arena-space fingertip
        pos: Vec2,
        /// Where the player is reaching toward
        aim: Vec2,
        /// Fraction of the remaining distance covered per frame
        reach: f32,
        /// Chance per frame the detector misses the hand
        dropout: f64,
    }

    impl SimulatedHand {
        fn new(seed: u64, reach: f32) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                pos: Vec2::splat(50.0),
                aim: Vec2::splat(50.0),
                reach,
                dropout: 0.1,
            }
        }
    }

    impl HandTracker for SimulatedHand {
        fn acquire(&mut self) -> Result<(), SessionError> {
            Ok(())
        }

        fn poll(&mut self, _now_ms: u64) -> Option<HandFrame> {
            let jitter = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(-2.0..2.0),
            );
            self.pos += (self.aim - self.pos) * self.reach + jitter;

            if self.rng.random_bool(self.dropout) {
                return Some(HandFrame::default());
            }

            // Back to a mirrored, normalized camera landmark
            let mut hand = vec![Landmark::default(); LANDMARKS_PER_HAND];
            hand[INDEX_FINGER_TIP] = Landmark::new(1.0 - self.pos.x / 100.0, self.pos.y / 100.0);
            Some(HandFrame { hands: vec![hand] })
        }
    }

    fn seed_from_env() -> u64 {
        std::env::var("MOSQUITO_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            })
    }

    fn play_round<S: KeyValueStore>(session: &mut Session<S>, hand: &mut SimulatedHand) {
        if let Err(e) = session.start(hand) {
            log::error!("Could not start round: {}", e);
            return;
        }

        let mut now_ms = 0;
        loop {
            for _ in 0..FPS {
                hand.aim = session.target_position();
                if let Some(SessionEvent::Hit { score, at }) = session.frame(hand, now_ms) {
                    log::debug!("Hit #{} at ({:.1}, {:.1})", score, at.x, at.y);
                }
                now_ms += FRAME_MS;
            }

            if let Some(SessionEvent::Ended(result)) = session.second_tick() {
                println!(
                    "{} swatted {} mosquitoes{}",
                    result.identity,
                    result.score,
                    result
                        .rank
                        .map(|r| format!(" (rank #{r})"))
                        .unwrap_or_default()
                );
                break;
            }
        }
        session.acknowledge();
    }

    pub fn run() {
        let seed = seed_from_env();
        log::info!("Headless demo with seed: {}", seed);

        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        let mut session = Session::new(seed, store).with_mapper(settings.input_mapper());

        for round in 0..ROUNDS {
            // Each round the player gets a little quicker
            let reach = 0.05 + 0.05 * round as f32;
            let mut hand = SimulatedHand::new(seed.wrapping_add(round as u64), reach);
            play_round(&mut session, &mut hand);
        }

        println!("\nLeaderboard");
        for (i, entry) in session.leaderboard().load().iter().enumerate() {
            println!("#{} {} {} pts", i + 1, entry.identity, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mosquito Swat (native) starting...");
    log::info!("Native mode has no camera - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
