//! Score, difficulty and game-over state for one play session.

use crate::core::config::GameConfig;

#[derive(Debug, Clone)]
pub struct GameModel {
    pub width: u32,
    pub height: u32,
    pub score: i64,
    /// Best score seen in this process. Survives `reset`.
    pub high_score: i64,
    pub cup_width: f64,
    pub cup_speed: f64,
    pub game_over: bool,
    /// Current fall speed of common droplets, in pixels per move tick.
    pub droplet_speed: f64,
    pub initial_droplet_speed: f64,
    /// Factor applied to `droplet_speed` on every spawn tick.
    pub droplet_acceleration: f64,
}

impl GameModel {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            score: 0,
            high_score: 0,
            cup_width: config.cup_width,
            cup_speed: config.cup_speed,
            game_over: false,
            droplet_speed: config.initial_droplet_speed,
            initial_droplet_speed: config.initial_droplet_speed,
            droplet_acceleration: config.droplet_acceleration,
        }
    }

    pub fn update_score(&mut self, points: i64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Start a fresh session. The high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.droplet_speed = self.initial_droplet_speed;
    }

    pub fn increase_difficulty(&mut self) {
        self.droplet_speed *= self.droplet_acceleration;
    }

    /// Enter the game-over state. Returns false if the game was already over.
    pub fn end_game(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        true
    }
}
