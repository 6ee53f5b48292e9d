use serde::{Deserialize, Serialize};

use super::types::{Axis, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: i32,
    pub height: i32,
}

impl FieldSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: &Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Inside(i32),
    Collided,
}

/// Maps a coordinate back onto `[0, size)`. Open axes wrap around,
/// sealed axes report a collision for anything outside.
pub fn resolve_boundary(coord: i32, size: i32, sealed: bool) -> Boundary {
    if (0..size).contains(&coord) {
        Boundary::Inside(coord)
    } else if sealed {
        Boundary::Collided
    } else {
        Boundary::Inside(coord.rem_euclid(size))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallPolicy {
    pub x_sealed: bool,
    pub y_sealed: bool,
}

impl WallPolicy {
    pub const OPEN: WallPolicy = WallPolicy {
        x_sealed: false,
        y_sealed: false,
    };

    pub const SEALED: WallPolicy = WallPolicy {
        x_sealed: true,
        y_sealed: true,
    };

    pub fn sealing(axis: Axis) -> Self {
        match axis {
            Axis::X => Self {
                x_sealed: true,
                y_sealed: false,
            },
            Axis::Y => Self {
                x_sealed: false,
                y_sealed: true,
            },
        }
    }

    /// `None` when the candidate leaves the field through a sealed wall.
    pub fn resolve(&self, field: &FieldSize, candidate: Point) -> Option<Point> {
        let x = resolve_boundary(candidate.x, field.width, self.x_sealed);
        let y = resolve_boundary(candidate.y, field.height, self.y_sealed);
        match (x, y) {
            (Boundary::Inside(x), Boundary::Inside(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }
}
