//! The player's cup.

use super::{MoveDirection, Sprite};
use crate::core::geometry::{Bounds, Coords};
use crate::surface::{RenderSurface, ShapeColor, ShapeHandle, ShapeKind};

/// The catcher. Anchored at its bottom-left corner on the floor line.
#[derive(Debug, Clone)]
pub struct Cup {
    pub handle: ShapeHandle,
    /// Bottom-left corner.
    pub coords: Coords,
    pub width: f64,
    pub height: f64,
    /// Pixels per input-poll tick.
    pub speed: f64,
    pub direction: MoveDirection,
}

impl Cup {
    pub fn new(
        surface: &mut dyn RenderSurface,
        coords: Coords,
        width: f64,
        height: f64,
        speed: f64,
    ) -> Self {
        let top_right = Coords::new(coords.x + width, coords.y - height);
        let handle = surface.create_shape(
            ShapeKind::Rectangle,
            Bounds::from_corners(coords, top_right),
            ShapeColor::Blue,
        );
        Self {
            handle,
            coords,
            width,
            height,
            speed,
            direction: MoveDirection::None,
        }
    }

    pub fn set_move_direction(&mut self, direction: MoveDirection) {
        self.direction = direction;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.coords.x,
            top: self.coords.y - self.height,
            right: self.coords.x + self.width,
            bottom: self.coords.y,
        }
    }
}

impl Sprite for Cup {
    fn handle(&self) -> ShapeHandle {
        self.handle
    }

    // A move that would leave the field is refused outright.
    fn do_step(&mut self, surface: &mut dyn RenderSurface) {
        match self.direction {
            MoveDirection::Left if self.coords.x - self.speed >= 0.0 => {
                surface.move_shape(self.handle, -self.speed, 0.0);
            }
            MoveDirection::Right if self.coords.x + self.width + self.speed <= surface.width() => {
                surface.move_shape(self.handle, self.speed, 0.0);
            }
            _ => {}
        }
    }

    fn resync(&mut self, bounds: Bounds) {
        self.coords = bounds.bottom_left();
    }
}
