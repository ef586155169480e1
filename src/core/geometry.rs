//! Play-field coordinates and axis-aligned boxes.

/// A position on the play field. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

impl Coords {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Build a box from two opposite corners in any order.
    pub fn from_corners(a: Coords, b: Coords) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Coords {
        Coords::new(self.left, self.top)
    }

    pub fn bottom_left(&self) -> Coords {
        Coords::new(self.left, self.bottom)
    }

    pub fn center(&self) -> Coords {
        Coords::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

/// Whether a falling droplet's hit box has reached into the cup's box.
///
/// Only the droplet's bottom is compared vertically: anything below the
/// cup's top edge and horizontally overlapping it counts as a catch.
pub fn hits_cup(droplet: &Bounds, cup: &Bounds) -> bool {
    droplet.bottom > cup.top && droplet.left < cup.right && droplet.right > cup.left
}
