//! Movable entities: falling droplets and the player's cup.

pub mod cup;
pub mod droplet;

pub use cup::Cup;
pub use droplet::{Droplet, DropletKind};

use crate::core::geometry::Bounds;
use crate::surface::{RenderSurface, ShapeHandle};

/// Horizontal movement intent for the cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDirection {
    Left,
    #[default]
    None,
    Right,
}

impl MoveDirection {
    /// Direction from held arrow keys. Neither or both held means no movement.
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => MoveDirection::Left,
            (false, true) => MoveDirection::Right,
            _ => MoveDirection::None,
        }
    }
}

/// An entity backed by a shape on a render surface.
///
/// `step` moves the shape and then re-reads the entity's position from the
/// surface, so the surface placement stays the only source of truth.
pub trait Sprite {
    fn handle(&self) -> ShapeHandle;

    /// Entity-specific movement for one tick.
    fn do_step(&mut self, surface: &mut dyn RenderSurface);

    /// Adopt the shape's placement after a move.
    fn resync(&mut self, bounds: Bounds);

    fn step(&mut self, surface: &mut dyn RenderSurface) {
        self.do_step(surface);
        if let Some(bounds) = surface.shape_bounds(self.handle()) {
            self.resync(bounds);
        }
    }

    fn delete(&self, surface: &mut dyn RenderSurface) {
        surface.delete_shape(self.handle());
    }
}
