//! Game-state engine
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform code:
//! - Time comes in as explicit millisecond timestamps
//! - Randomness comes from the session's seeded RNG
//! - Hand tracking and storage are injected through traits

pub mod collision;
pub mod input;
pub mod session;
pub mod state;
pub mod target;

pub use collision::{HitResult, check_hit};
pub use input::{FrameGuard, HandFrame, HandTracker, InputMapper, Landmark};
pub use session::Session;
pub use state::{CooldownClock, CursorSample, SessionEvent, SessionResult, SessionState};
pub use target::Target;
