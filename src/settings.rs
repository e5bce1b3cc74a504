//! Player settings and preferences
//!
//! Persisted separately from the leaderboard in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::persistence::KeyValueStore;
use crate::sim::InputMapper;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Camera shows a selfie view, so flip the hand horizontally
    pub mirror_camera: bool,
    /// Draw detected hand landmarks over the video
    pub show_landmarks: bool,

    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Swat sound volume (0.0 - 1.0)
    pub swat_volume: f32,
    /// Menu click volume (0.0 - 1.0)
    pub click_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror_camera: true,
            show_landmarks: false,

            music_volume: 0.5,
            swat_volume: 1.0,
            click_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "mosquito_settings";

    /// Landmark mapping for these preferences
    pub fn input_mapper(&self) -> InputMapper {
        InputMapper::new(self.mirror_camera)
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    pub fn set_swat_volume(&mut self, volume: f32) {
        self.swat_volume = clamp_volume(volume);
    }

    pub fn set_click_volume(&mut self, volume: f32) {
        self.click_volume = clamp_volume(volume);
    }

    /// Volume to actually play at, respecting mute
    pub fn effective_volume(&self, volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            clamp_volume(volume)
        }
    }

    /// Load settings, falling back to defaults on missing or bad data
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Keep a slider value in [0, 1]; garbage input mutes
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
