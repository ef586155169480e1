//! Render surface: the shape store sprites draw themselves onto.
//!
//! Sprites never keep authoritative positions of their own. They move their
//! shape here and read the resulting placement back, and the view draws
//! whatever the surface currently holds.

use crate::core::geometry::Bounds;
use std::collections::BTreeMap;

/// Opaque handle to a shape on a surface. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeHandle(u64);

/// Primitive shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Oval,
    Rectangle,
}

/// Fill colours used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeColor {
    Blue,
    Gold,
    Red,
}

/// A placed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub color: ShapeColor,
}

/// Operations the game core needs from a drawing surface.
pub trait RenderSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, color: ShapeColor) -> ShapeHandle;
    /// Move a shape by a delta. Unknown handles are ignored.
    fn move_shape(&mut self, handle: ShapeHandle, dx: f64, dy: f64);
    /// Current placement of a shape, or `None` once it has been deleted.
    fn shape_bounds(&self, handle: ShapeHandle) -> Option<Bounds>;
    /// Delete a shape. Deleting twice is a no-op.
    fn delete_shape(&mut self, handle: ShapeHandle);
    fn clear_all(&mut self);
}

/// In-memory surface backing the terminal view.
#[derive(Debug, Clone)]
pub struct ShapeCanvas {
    width: f64,
    height: f64,
    next_handle: u64,
    shapes: BTreeMap<ShapeHandle, Shape>,
}

impl ShapeCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            next_handle: 1,
            shapes: BTreeMap::new(),
        }
    }

    /// Live shapes in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(&handle)
    }
}

impl RenderSurface for ShapeCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, color: ShapeColor) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.shapes.insert(
            handle,
            Shape {
                kind,
                bounds,
                color,
            },
        );
        handle
    }

    fn move_shape(&mut self, handle: ShapeHandle, dx: f64, dy: f64) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.bounds = shape.bounds.translated(dx, dy);
        }
    }

    fn shape_bounds(&self, handle: ShapeHandle) -> Option<Bounds> {
        self.shapes.get(&handle).map(|s| s.bounds)
    }

    fn delete_shape(&mut self, handle: ShapeHandle) {
        self.shapes.remove(&handle);
    }

    fn clear_all(&mut self) {
        self.shapes.clear();
    }
}
