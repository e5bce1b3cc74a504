//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only): it exposes the session
//! control surface to the JavaScript UI, which owns the camera, the hand
//! landmark model, audio and DOM updates. `PageInput` is the part of that
//! glue with logic in it, kept target-independent.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{INDEX_FINGER_TIP, LANDMARKS_PER_HAND};
use crate::error::SessionError;
use crate::persistence::KeyValueStore;
use crate::sim::{
    CursorSample, FrameGuard, HandFrame, HandTracker, Landmark, Session, SessionEvent,
};

/// Hand detections pushed in by the page, one per animation frame
///
/// The video usually runs slower than the display, so the same video frame
/// is reported several times. Only the first report is run through hit
/// detection; the cursor stays where it was drawn until a new frame lands.
#[derive(Debug, Default)]
pub struct PageInput {
    camera_ready: bool,
    pending: Option<HandFrame>,
    frames: FrameGuard,
    shown_cursor: CursorSample,
}

impl PageInput {
    /// Record camera state and clear per-round input
    pub fn prepare(&mut self, camera_ready: bool) {
        self.camera_ready = camera_ready;
        self.pending = None;
        self.frames.reset();
        self.shown_cursor = CursorSample::NotDetected;
    }

    /// Run one animation frame; `tip` is the first hand's index fingertip
    pub fn frame<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        video_time: f64,
        now_ms: u64,
        tip: Option<Landmark>,
    ) -> Option<SessionEvent> {
        let fresh = self.frames.accept(video_time);
        if fresh {
            self.pending = Some(match tip {
                Some(tip) => {
                    let mut hand = vec![Landmark::default(); LANDMARKS_PER_HAND];
                    hand[INDEX_FINGER_TIP] = tip;
                    HandFrame { hands: vec![hand] }
                }
                None => HandFrame::default(),
            });
        }

        let event = session.frame(self, now_ms);
        if fresh {
            self.shown_cursor = session.cursor();
        }
        event
    }

    /// Cursor to draw this frame
    pub fn shown_cursor(&self) -> CursorSample {
        self.shown_cursor
    }

    /// Draw the cursor only during play and while it is on screen
    pub fn cursor_visible<S: KeyValueStore>(&self, session: &Session<S>) -> bool {
        session.state().is_active()
            && self.shown_cursor.position().is_some()
            && !self.shown_cursor.out_of_view()
    }

    pub fn clear_cursor(&mut self) {
        self.shown_cursor = CursorSample::NotDetected;
    }
}

impl HandTracker for PageInput {
    fn acquire(&mut self) -> Result<(), SessionError> {
        if self.camera_ready {
            Ok(())
        } else {
            Err(SessionError::capture_unavailable(
                "camera access is required to play",
            ))
        }
    }

    fn poll(&mut self, _now_ms: u64) -> Option<HandFrame> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::SessionState;

    /// Landmark that maps (mirrored) onto an arena position
    fn tip_at(x: f32, y: f32) -> Landmark {
        Landmark::new(1.0 - x / 100.0, y / 100.0)
    }

    fn started() -> (Session<MemoryStore>, PageInput) {
        let mut session = Session::new(99, MemoryStore::new());
        let mut input = PageInput::default();
        input.prepare(true);
        session.start(&mut input).unwrap();
        (session, input)
    }

    #[test]
    fn test_start_needs_camera() {
        let mut session = Session::new(1, MemoryStore::new());
        let mut input = PageInput::default();
        input.prepare(false);
        assert!(session.start(&mut input).is_err());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_repeated_video_frame_is_not_rescored() {
        let (mut session, mut input) = started();

        let pos = session.target_position();
        let event = input.frame(&mut session, 0.5, 0, Some(tip_at(pos.x, pos.y)));
        assert!(matches!(event, Some(SessionEvent::Hit { score: 1, .. })));

        // Same video frame long after the cooldown, fingertip on the new target
        let pos = session.target_position();
        let event = input.frame(&mut session, 0.5, 1_000, Some(tip_at(pos.x, pos.y)));
        assert_eq!(event, None);
        assert_eq!(session.score(), 1);

        // A fresh frame scores again
        let pos = session.target_position();
        let event = input.frame(&mut session, 0.6, 1_000, Some(tip_at(pos.x, pos.y)));
        assert!(event.is_some());
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_cursor_held_between_video_frames() {
        let (mut session, mut input) = started();

        input.frame(&mut session, 0.1, 0, Some(tip_at(20.0, 30.0)));
        let drawn = input.shown_cursor().position().unwrap();
        assert!((drawn.x - 20.0).abs() < 1e-3);
        assert!((drawn.y - 30.0).abs() < 1e-3);

        // Display refresh with no new video frame
        input.frame(&mut session, 0.1, 16, Some(tip_at(80.0, 80.0)));
        assert_eq!(session.cursor(), CursorSample::NotDetected);
        assert_eq!(input.shown_cursor().position(), Some(drawn));
        assert!(input.cursor_visible(&session));

        // New frame without a hand hides it
        input.frame(&mut session, 0.2, 32, None);
        assert!(!input.cursor_visible(&session));
    }

    #[test]
    fn test_off_screen_cursor_hidden() {
        let (mut session, mut input) = started();
        input.frame(&mut session, 0.1, 0, Some(Landmark::new(1.2, 0.5)));
        assert!(input.shown_cursor().out_of_view());
        assert!(!input.cursor_visible(&session));

        input.frame(&mut session, 0.2, 16, Some(tip_at(50.0, 50.0)));
        assert!(input.cursor_visible(&session));

        session.quit();
        assert!(!input.cursor_visible(&session));
    }
}
