//! Tunable game parameters.
//!
//! Defaults come from `core::constants`. A JSON file may override any subset
//! of fields; missing fields keep their defaults.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play field size in pixels.
    pub width: u32,
    pub height: u32,

    pub cup_width: f64,
    pub cup_height: f64,
    /// Pixels per input-poll tick.
    pub cup_speed: f64,

    /// Pixels per move tick at the start of a session.
    pub initial_droplet_speed: f64,
    pub droplet_acceleration: f64,
    pub rare_droplet_chance: f64,

    pub spawn_interval_ms: u64,
    pub move_interval_ms: u64,
    pub input_poll_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            cup_width: CUP_WIDTH,
            cup_height: CUP_HEIGHT,
            cup_speed: CUP_SPEED,
            initial_droplet_speed: INITIAL_DROPLET_SPEED,
            droplet_acceleration: DROPLET_ACCELERATION,
            rare_droplet_chance: RARE_DROPLET_CHANCE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            move_interval_ms: MOVE_INTERVAL_MS,
            input_poll_interval_ms: INPUT_POLL_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Check that the parameters describe a playable field.
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 2 * SPAWN_MARGIN {
            return Err(format!(
                "width must be greater than {} (got {})",
                2 * SPAWN_MARGIN,
                self.width
            ));
        }
        if self.cup_width <= 0.0 || self.cup_width > self.width as f64 {
            return Err(format!(
                "cup_width must be in (0, {}] (got {})",
                self.width, self.cup_width
            ));
        }
        if self.cup_height <= 0.0 || self.cup_height >= self.height as f64 {
            return Err(format!(
                "cup_height must be in (0, {}) (got {})",
                self.height, self.cup_height
            ));
        }
        if self.cup_speed <= 0.0 {
            return Err("cup_speed must be positive".to_string());
        }
        if self.initial_droplet_speed <= 0.0 {
            return Err("initial_droplet_speed must be positive".to_string());
        }
        // Below 1.0 the fall speed would shrink over a session
        if self.droplet_acceleration < 1.0 {
            return Err(format!(
                "droplet_acceleration must be at least 1.0 (got {})",
                self.droplet_acceleration
            ));
        }
        if !(0.0..=1.0).contains(&self.rare_droplet_chance) {
            return Err(format!(
                "rare_droplet_chance must be in [0, 1] (got {})",
                self.rare_droplet_chance
            ));
        }
        if self.spawn_interval_ms == 0 || self.move_interval_ms == 0 || self.input_poll_interval_ms == 0
        {
            return Err("timer intervals must be non-zero".to_string());
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config
            .validate()
            .map_err(|msg| io::Error::new(io::ErrorKind::InvalidData, msg))?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Starting x of the cup: centered on the field.
    pub fn cup_start_x(&self) -> f64 {
        self.width as f64 / 2.0 - self.cup_width / 2.0
    }
}
