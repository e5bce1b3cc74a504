//! Hand-tracking input
//!
//! A tracker reports normalized landmarks per detected hand. Only the index
//! fingertip of the first hand matters: it is mirrored to match the
//! selfie-view video and scaled into arena percent.

use glam::Vec2;

use super::state::CursorSample;
use crate::consts::{INDEX_FINGER_TIP, LANDMARKS_PER_HAND};
use crate::error::SessionError;

/// Normalized image-space point, nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Detection result for one video frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    /// One landmark list per detected hand, detector order
    pub hands: Vec<Vec<Landmark>>,
}

impl HandFrame {
    /// Index fingertip of the first hand, if that hand is complete
    pub fn index_tip(&self) -> Option<Landmark> {
        let hand = self.hands.first()?;
        if hand.len() < LANDMARKS_PER_HAND {
            return None;
        }
        hand.get(INDEX_FINGER_TIP).copied()
    }
}

/// Hand-pose source polled once per render tick
pub trait HandTracker {
    /// Make sure the camera/detector is running; idempotent
    fn acquire(&mut self) -> Result<(), SessionError>;

    /// Latest detection, never blocking. `None` means nothing new this tick.
    fn poll(&mut self, now_ms: u64) -> Option<HandFrame>;
}

/// Landmark to arena-space conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMapper {
    /// Flip horizontally to match a mirrored video feed
    pub mirrored: bool,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self { mirrored: true }
    }
}

impl InputMapper {
    pub fn new(mirrored: bool) -> Self {
        Self { mirrored }
    }

    /// Map a raw landmark to a cursor; values outside [0, 1] pass through
    pub fn sample(&self, landmark: Option<Landmark>) -> CursorSample {
        match landmark {
            None => CursorSample::NotDetected,
            Some(lm) => {
                let x = if self.mirrored { 1.0 - lm.x } else { lm.x };
                CursorSample::Detected(Vec2::new(x, lm.y) * 100.0)
            }
        }
    }

    /// Map the index fingertip of a detection frame
    pub fn sample_frame(&self, frame: Option<&HandFrame>) -> CursorSample {
        self.sample(frame.and_then(HandFrame::index_tip))
    }
}

/// Skips video frames that were already run through detection
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGuard {
    last_frame_time: Option<f64>,
}

impl FrameGuard {
    /// True the first time a given frame timestamp is seen
    pub fn accept(&mut self, frame_time: f64) -> bool {
        if self.last_frame_time == Some(frame_time) {
            return false;
        }
        self.last_frame_time = Some(frame_time);
        true
    }

    pub fn reset(&mut self) {
        self.last_frame_time = None;
    }
}
