//! Falling droplets.

use super::Sprite;
use crate::core::constants::*;
use crate::core::geometry::{Bounds, Coords};
use crate::surface::{RenderSurface, ShapeColor, ShapeHandle, ShapeKind};

/// Droplet variants. Common and rare droplets score; danger droplets end the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropletKind {
    Common,
    Rare,
    Danger,
}

impl DropletKind {
    pub fn size(&self) -> f64 {
        match self {
            Self::Common => COMMON_DROPLET_SIZE,
            Self::Rare => RARE_DROPLET_SIZE,
            Self::Danger => DANGER_DROPLET_SIZE,
        }
    }

    pub fn color(&self) -> ShapeColor {
        match self {
            Self::Common => ShapeColor::Blue,
            Self::Rare => ShapeColor::Gold,
            Self::Danger => ShapeColor::Red,
        }
    }

    /// Points awarded on a catch. Danger droplets carry none.
    pub fn points(&self) -> i64 {
        match self {
            Self::Common => COMMON_DROPLET_POINTS,
            Self::Rare => RARE_DROPLET_POINTS,
            Self::Danger => 0,
        }
    }

    /// Multiplier applied to the current fall speed at spawn time.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Rare => RARE_SPEED_MULTIPLIER,
            Self::Danger => DANGER_SPEED_MULTIPLIER,
        }
    }

    pub fn is_collectible(&self) -> bool {
        !matches!(self, Self::Danger)
    }
}

/// A droplet falling at constant speed. x never changes after spawn.
#[derive(Debug, Clone)]
pub struct Droplet {
    pub handle: ShapeHandle,
    /// Top-left corner of the droplet's box.
    pub coords: Coords,
    pub size: f64,
    pub color: ShapeColor,
    /// Pixels per move tick.
    pub speed: f64,
    pub points: i64,
    pub kind: DropletKind,
}

impl Droplet {
    /// Create a droplet of `kind` at `coords`, falling at `base_speed` times the
    /// kind's multiplier.
    pub fn spawn(
        surface: &mut dyn RenderSurface,
        kind: DropletKind,
        coords: Coords,
        base_speed: f64,
    ) -> Self {
        Self::new(
            surface,
            coords,
            kind.size(),
            kind.color(),
            base_speed * kind.speed_multiplier(),
            kind.points(),
            kind,
        )
    }

    pub fn new(
        surface: &mut dyn RenderSurface,
        coords: Coords,
        size: f64,
        color: ShapeColor,
        speed: f64,
        points: i64,
        kind: DropletKind,
    ) -> Self {
        let bounds = Bounds::from_corners(coords, Coords::new(coords.x + size, coords.y + size));
        let handle = surface.create_shape(ShapeKind::Oval, bounds, color);
        Self {
            handle,
            coords,
            size,
            color,
            speed,
            points,
            kind,
        }
    }

    /// Box used for catch tests. Its bottom is the droplet's vertical midpoint,
    /// so a caught droplet is drawn sinking into the cup.
    pub fn hit_box(&self) -> Bounds {
        Bounds {
            left: self.coords.x,
            top: self.coords.y,
            right: self.coords.x + self.size,
            bottom: self.coords.y + self.size / 2.0,
        }
    }

    /// Whether the droplet has fallen past the floor line.
    pub fn is_below(&self, floor: f64) -> bool {
        self.coords.y >= floor
    }
}

impl Sprite for Droplet {
    fn handle(&self) -> ShapeHandle {
        self.handle
    }

    fn do_step(&mut self, surface: &mut dyn RenderSurface) {
        surface.move_shape(self.handle, 0.0, self.speed);
    }

    fn resync(&mut self, bounds: Bounds) {
        self.coords = bounds.top_left();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ShapeCanvas;

    #[test]
    fn test_spawn_uses_kind_parameters() {
        let mut canvas = ShapeCanvas::new(800.0, 600.0);
        let rare = Droplet::spawn(&mut canvas, DropletKind::Rare, Coords::new(100.0, 0.0), 4.0);
        assert_eq!(rare.size, 20.0);
        assert_eq!(rare.points, 50);
        assert_eq!(rare.color, ShapeColor::Gold);
        assert!((rare.speed - 6.0).abs() < 1e-9);

        let danger = Droplet::spawn(&mut canvas, DropletKind::Danger, Coords::new(100.0, 0.0), 4.0);
        assert_eq!(danger.size, 30.0);
        assert!((danger.speed - 8.0).abs() < 1e-9);
        assert!(!danger.kind.is_collectible());
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn test_step_falls_vertically() {
        let mut canvas = ShapeCanvas::new(800.0, 600.0);
        let mut d = Droplet::spawn(&mut canvas, DropletKind::Common, Coords::new(120.0, 0.0), 5.0);

        d.step(&mut canvas);
        d.step(&mut canvas);

        assert_eq!(d.coords, Coords::new(120.0, 10.0));
        let b = canvas.shape_bounds(d.handle).unwrap();
        assert_eq!(b.top_left(), d.coords);
    }

    #[test]
    fn test_hit_box_bottom_is_midpoint() {
        let mut canvas = ShapeCanvas::new(800.0, 600.0);
        let d = Droplet::spawn(&mut canvas, DropletKind::Common, Coords::new(150.0, 580.0), 5.0);
        let hb = d.hit_box();
        assert_eq!(hb.left, 150.0);
        assert_eq!(hb.right, 160.0);
        assert_eq!(hb.bottom, 585.0);
    }

    #[test]
    fn test_is_below_floor() {
        let mut canvas = ShapeCanvas::new(800.0, 600.0);
        let mut d = Droplet::spawn(&mut canvas, DropletKind::Common, Coords::new(0.0, 595.0), 5.0);
        assert!(!d.is_below(600.0));
        d.step(&mut canvas);
        assert!(d.is_below(600.0));
    }

    #[test]
    fn test_delete_removes_shape() {
        let mut canvas = ShapeCanvas::new(800.0, 600.0);
        let d = Droplet::spawn(&mut canvas, DropletKind::Common, Coords::new(0.0, 0.0), 5.0);
        d.delete(&mut canvas);
        assert!(!canvas.contains(d.handle));
    }
}
