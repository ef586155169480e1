//! Droplet Catch - terminal reflex game library
//!
//! Droplets fall from the top of the field; the player steers a cup along the
//! floor to catch them. Red danger droplets, spawned whenever a droplet is
//! missed, end the game when caught.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod core;
pub mod input;
pub mod sprites;
pub mod surface;
pub mod ui;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::constants::*;
pub use crate::core::controller::{GameController, GameEvent};
pub use crate::core::model::GameModel;
pub use crate::surface::{RenderSurface, ShapeCanvas};
