//! Game balance values
//!
//! Loaded from JSON so balance can be tweaked without rebuilding. Missing
//! fields fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON tuning file
pub const TUNING_ENV_VAR: &str = "BRICKFALL_TUNING";

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Progress ===
    /// Lives at the start of a game or after a restart
    pub starting_lives: u8,
    /// Score awarded per destroyed brick
    pub points_per_brick: u64,

    // === Paddle ===
    /// Paddle speed in units per second
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch speed on level 1
    pub ball_base_speed: f32,
    /// Fractional launch speed increase per level above 1
    pub level_speed_step: f32,
    /// Multiplicative speedup on every paddle bounce
    pub bounce_speedup: f32,
    /// Largest deflection from vertical, in degrees, for paddle bounces and launches
    pub max_bounce_angle_deg: f32,

    // === Overlay timing ===
    /// How long "Life -1" stays up
    pub life_lost_message_ms: u32,
    /// Pause between "Stage Clear!" and the next level starting
    pub stage_clear_delay_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            points_per_brick: 10,

            paddle_speed: 540.0,

            ball_radius: 7.0,
            ball_base_speed: 300.0,
            level_speed_step: 0.08,
            bounce_speedup: 1.02,
            max_bounce_angle_deg: 60.0,

            life_lost_message_ms: 700,
            stage_clear_delay_ms: 800,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from the file named by `BRICKFALL_TUNING`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }

    /// No filesystem on wasm
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Launch speed for a level (1-based)
    pub fn base_speed(&self, level: u32) -> f32 {
        self.ball_base_speed * (1.0 + self.level_speed_step * level.saturating_sub(1) as f32)
    }

    /// Maximum bounce angle in radians
    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }

    pub fn life_lost_message_secs(&self) -> f64 {
        f64::from(self.life_lost_message_ms) / 1000.0
    }

    pub fn stage_clear_delay_secs(&self) -> f64 {
        f64::from(self.stage_clear_delay_ms) / 1000.0
    }
}
