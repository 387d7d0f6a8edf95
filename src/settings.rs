//! Game tuning
//!
//! Persisted in LocalStorage so a page can override the feel of a run
//! without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven gameplay and camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    /// Spacing between lanes and rows
    pub lane_width: f32,
    /// Lily pad edge length
    pub platform_size: f32,

    // === Jump ===
    /// Seconds from takeoff to the landing instant
    pub jump_duration: f64,
    /// Peak height of the jump arc
    pub jump_height: f32,

    // === Generation ===
    /// Chance of a pad in each non-guaranteed lane
    pub extra_pad_chance: f64,
    /// Chance of a flower on a pad
    pub flower_chance: f64,
    /// Total spread of the per-pad lightness tint
    pub tint_jitter: f32,
    /// Rows in a fresh world
    pub initial_rows: u32,
    /// Fully populated rows at the start
    pub safe_rows: u32,
    /// Extend the world when the score is a multiple of this
    pub extend_every: u32,
    /// Rows added per extension
    pub extend_count: u32,
    /// Rows kept behind the actor
    pub cull_margin: u32,

    // === Death ===
    /// Sinking speed after a missed landing (units/s)
    pub sink_speed: f32,
    /// Sinking stops here
    pub sink_floor: f32,
    /// Seconds between death and the game-over overlay
    pub game_over_delay: f64,

    // === Camera ===
    /// Offset of the camera from the followed point
    pub camera_offset: [f32; 3],
    /// Per-frame smoothing factor toward the ideal camera position
    pub camera_lerp: f32,
    /// Half height of the orthographic view volume
    pub camera_half_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            platform_size: PLATFORM_SIZE,

            jump_duration: JUMP_DURATION,
            jump_height: JUMP_HEIGHT,

            extra_pad_chance: 0.4,
            flower_chance: 0.2,
            tint_jitter: 0.1,
            initial_rows: INITIAL_ROWS,
            safe_rows: SAFE_START_ROWS,
            extend_every: EXTEND_EVERY,
            extend_count: EXTEND_COUNT,
            cull_margin: CULL_MARGIN,

            sink_speed: SINK_SPEED,
            sink_floor: SINK_FLOOR,
            game_over_delay: 0.5,

            camera_offset: [20.0, 20.0, 20.0],
            camera_lerp: 0.1,
            camera_half_height: 5.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.lane_width > 0.0) {
            self.lane_width = defaults.lane_width;
        }
        if !(self.jump_duration > 0.0) {
            self.jump_duration = defaults.jump_duration;
        }
        self.jump_height = self.jump_height.max(0.0);
        self.extra_pad_chance = clamp_probability(self.extra_pad_chance);
        self.flower_chance = clamp_probability(self.flower_chance);
        self.tint_jitter = self.tint_jitter.clamp(0.0, 1.0);
        self.safe_rows = self.safe_rows.max(1);
        self.initial_rows = self.initial_rows.max(self.safe_rows);
        self.extend_every = self.extend_every.max(1);
        self.extend_count = self.extend_count.max(1);
        self.sink_speed = self.sink_speed.max(0.0);
        self.game_over_delay = self.game_over_delay.max(0.0);
        self.camera_lerp = self.camera_lerp.clamp(0.0, 1.0);
        if !(self.camera_half_height > 0.0) {
            self.camera_half_height = defaults.camera_half_height;
        }
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "lily_hop_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "jump_duration": 0.5 }"#).unwrap();
        assert_eq!(tuning.jump_duration, 0.5);
        assert_eq!(tuning.lane_width, LANE_WIDTH);
        assert_eq!(tuning.extend_count, EXTEND_COUNT);
    }

    #[test]
    fn test_sanitize_clamps() {
        let tuning = Tuning::from_json(
            r#"{ "jump_duration": -1.0, "extra_pad_chance": 3.0, "extend_every": 0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.jump_duration, JUMP_DURATION);
        assert_eq!(tuning.extra_pad_chance, 1.0);
        assert_eq!(tuning.extend_every, 1);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_serialized_defaults_round_trip() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
