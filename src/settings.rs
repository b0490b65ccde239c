//! Toy settings and tunables
//!
//! Persisted as JSON in LocalStorage on the web, read from the
//! `DRAW_PATH_SETTINGS` environment variable natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SceneConfig;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "draw_path_settings";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Fading trail drawn behind each ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostSettings {
    /// Number of ghosts per ball (0 disables the trail)
    pub count: usize,
    /// Milliseconds between two ghosts
    pub step_ms: f64,
}

impl Default for GhostSettings {
    fn default() -> Self {
        Self {
            count: GHOST_COUNT,
            step_ms: GHOST_STEP_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Drawing ===
    /// Minimum length of a closed path (open paths need half)
    pub length_min: f64,
    /// Minimum size/length ratio of a path
    pub ratio_min: f64,
    /// Pointer samples closer than this to the before-last point drag the last one
    pub merge_distance: f64,
    /// Stroke ends closer than this make a loop
    pub close_distance: f64,

    // === Display ===
    pub ghosts: GhostSettings,
    /// Time/FPS/UPS/mouse readout in the corner
    pub display_monitoring: bool,
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length_min: LENGTH_MIN,
            ratio_min: RATIO_MIN,
            merge_distance: MERGE_DISTANCE,
            close_distance: CLOSE_DISTANCE,

            ghosts: GhostSettings::default(),
            display_monitoring: true,
            width: 1200,
            height: 800,
            zoom: 1.0,
        }
    }
}

impl Settings {
    /// Thresholds used by the scene
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            length_min: self.length_min,
            ratio_min: self.ratio_min,
            merge_distance: self.merge_distance,
            close_distance: self.close_distance,
        }
    }

    pub fn toggle_monitoring(&mut self) {
        self.display_monitoring = !self.display_monitoring;
    }

    /// Parse stored settings, falling back to defaults when they do not parse
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring stored settings: {e}");
            Self::default()
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
            Some(json) => Self::from_json(&json),
            None => {
                log::info!("No stored settings, using defaults");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        let stored = serde_json::to_string(self)
            .map_err(|e| e.to_string())
            .and_then(|json| storage.set_item(STORAGE_KEY, &json).map_err(|e| format!("{e:?}")));
        if let Err(e) = stored {
            log::warn!("Could not save settings: {e}");
        }
    }

    /// Natively, settings come from the `DRAW_PATH_SETTINGS` JSON variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        std::env::var("DRAW_PATH_SETTINGS")
            .map(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
