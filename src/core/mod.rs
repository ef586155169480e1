//! Core game state and logic.

pub mod config;
pub mod constants;
pub mod controller;
pub mod geometry;
pub mod model;
pub mod scheduler;

pub use config::GameConfig;
pub use controller::{GameController, GameEvent};
pub use model::GameModel;
