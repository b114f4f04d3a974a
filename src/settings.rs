//! Game tuning
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Brick field ===
    pub brick_columns: usize,
    pub brick_rows: usize,

    // === Progression ===
    /// Lives at the start of a game
    pub initial_lives: u32,
    /// Speed gained by the ball over a full clear (0.85 = +85%)
    pub max_speed_increase: f32,

    // === Timers (seconds) ===
    /// Two breaks closer than this trigger the Bravo banner
    pub bravo_window: f32,
    /// How long the Bravo banner stays up after its last trigger
    pub bravo_duration: f32,
    /// Blink period after losing a life
    pub invincibility_duration: f32,
    /// Half-period of the invincibility blink
    pub blink_period: f32,
    /// Freeze on "Game Over" before the automatic reset
    pub game_over_delay: f32,
    /// Fireworks show length before the automatic reset
    pub victory_delay: f32,

    // === Fireworks ===
    /// Rockets launched the moment the game is won
    pub initial_rockets: usize,
    /// Chance per tick of launching another rocket while won
    pub rocket_chance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brick_columns: 20,
            brick_rows: 5,

            initial_lives: 3,
            max_speed_increase: 0.85,

            bravo_window: 1.0,
            bravo_duration: 1.5,
            invincibility_duration: 5.0,
            blink_period: 0.15,
            game_over_delay: 2.0,
            victory_delay: 45.0,

            initial_rockets: 5,
            rocket_chance: 0.07,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would make the game unplayable
    pub fn validated(mut self) -> Self {
        self.brick_columns = self.brick_columns.max(1);
        self.brick_rows = self.brick_rows.max(1);
        self.initial_lives = self.initial_lives.max(1);
        self.max_speed_increase = self.max_speed_increase.max(0.0);
        self.bravo_window = self.bravo_window.max(0.0);
        self.bravo_duration = self.bravo_duration.max(0.0);
        self.invincibility_duration = self.invincibility_duration.max(0.0);
        // A zero blink period would divide by zero when drawing
        self.blink_period = self.blink_period.max(0.001);
        self.game_over_delay = self.game_over_delay.max(0.0);
        self.victory_delay = self.victory_delay.max(0.0);
        self.rocket_chance = self.rocket_chance.clamp(0.0, 1.0);
        self
    }

    /// Number of bricks in a full grid
    pub fn total_bricks(&self) -> usize {
        self.brick_columns * self.brick_rows
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
