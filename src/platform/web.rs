//! wasm-bindgen session handle for the browser UI
//!
//! The page runs the hand landmark model itself and forwards the first
//! hand's index fingertip each animation frame, plus a 1 s interval for the
//! countdown.

use wasm_bindgen::prelude::*;

use super::PageInput;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::{Landmark, Session, SessionEvent, SessionState};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Mosquito Swat starting...");
}

/// Session handle owned by the page
#[wasm_bindgen]
pub struct WebSession {
    session: Session<LocalStorageStore>,
    input: PageInput,
    settings: Settings,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load(&LocalStorageStore);
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64
            ^ (js_sys::Date::now() as u64);
        log::info!("Session created with seed: {}", seed);

        WebSession {
            session: Session::new(seed, LocalStorageStore).with_mapper(settings.input_mapper()),
            input: PageInput::default(),
            settings,
        }
    }

    /// Start a round; errors if the camera isn't running
    pub fn start(&mut self, camera_ready: bool) -> Result<(), JsValue> {
        self.input.prepare(camera_ready);
        self.session
            .start(&mut self.input)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Animation frame. `video_time` dedupes frames the detector already saw;
    /// `has_hand` false means no hand in this frame. Returns true on a swat.
    pub fn frame(&mut self, video_time: f64, now_ms: f64, has_hand: bool, x: f32, y: f32) -> bool {
        let tip = has_hand.then(|| Landmark::new(x, y));
        let now_ms = now_ms.max(0.0) as u64;
        let event = self.input.frame(&mut self.session, video_time, now_ms, tip);
        matches!(event, Some(SessionEvent::Hit { .. }))
    }

    /// Countdown interval. Returns true when the round just ended.
    pub fn second_tick(&mut self) -> bool {
        matches!(self.session.second_tick(), Some(SessionEvent::Ended(_)))
    }

    pub fn quit(&mut self) {
        self.session.quit();
        self.input.clear_cursor();
    }

    pub fn acknowledge(&mut self) {
        self.session.acknowledge();
    }

    /// "idle", "active" or "ended"
    pub fn state(&self) -> String {
        self.session.state().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining()
    }

    pub fn target_visible(&self) -> bool {
        self.session.target_visible()
    }

    pub fn target_x(&self) -> f32 {
        self.session.target_position().x
    }

    pub fn target_y(&self) -> f32 {
        self.session.target_position().y
    }

    pub fn cursor_visible(&self) -> bool {
        self.input.cursor_visible(&self.session)
    }

    pub fn cursor_x(&self) -> f32 {
        self.input.shown_cursor().position().map_or(-100.0, |p| p.x)
    }

    pub fn cursor_y(&self) -> f32 {
        self.input.shown_cursor().position().map_or(-100.0, |p| p.y)
    }

    /// Generated name for the game-over modal
    pub fn final_identity(&self) -> Option<String> {
        match self.session.state() {
            SessionState::Ended { .. } => self.session.last_result().map(|r| r.identity.clone()),
            _ => None,
        }
    }

    /// Leaderboard as a JSON array of `{identity, score}`
    pub fn leaderboard_json(&self) -> String {
        serde_json::to_string(self.session.leaderboard().load()).unwrap_or_else(|e| {
            log::warn!("Failed to encode leaderboard: {}", e);
            "[]".to_string()
        })
    }

    pub fn swat_volume(&self) -> f32 {
        self.settings.effective_volume(self.settings.swat_volume)
    }

    pub fn music_volume(&self) -> f32 {
        self.settings.effective_volume(self.settings.music_volume)
    }

    pub fn click_volume(&self) -> f32 {
        self.settings.effective_volume(self.settings.click_volume)
    }

    pub fn show_landmarks(&self) -> bool {
        self.settings.show_landmarks
    }

    pub fn set_mirror_camera(&mut self, mirrored: bool) {
        self.settings.mirror_camera = mirrored;
        self.session.set_mapper(self.settings.input_mapper());
        self.save_settings();
    }

    pub fn set_show_landmarks(&mut self, show: bool) {
        self.settings.show_landmarks = show;
        self.save_settings();
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.settings.set_music_volume(volume);
        self.save_settings();
    }

    pub fn set_swat_volume(&mut self, volume: f32) {
        self.settings.set_swat_volume(volume);
        self.save_settings();
    }

    pub fn set_click_volume(&mut self, volume: f32) {
        self.settings.set_click_volume(volume);
        self.save_settings();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.save_settings();
    }
}

impl WebSession {
    fn save_settings(&self) {
        let mut store = LocalStorageStore;
        if let Err(e) = self.settings.save(&mut store) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
