//! 2-D points, cardinal rotations, and the pan viewport.
//!
//! Board space uses screen conventions: `x` grows to the right and `y` grows
//! downward.  A positive rotation therefore turns clockwise on screen.

use std::fmt;
use std::ops::{Add, Sub};

/// A point (or displacement) in board space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// One of the four orientations a tile can take on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Converts a rotation in degrees, normalised modulo 360.
    ///
    /// Returns `None` for anything that is not a multiple of 90°.
    pub fn from_degrees(degrees: i32) -> Option<Rotation> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// The rotation in degrees, always one of `0`, `90`, `180`, `270`.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Rotates a board-space displacement by this rotation.
    pub fn apply(self, p: Point) -> Point {
        match self {
            Rotation::Deg0 => p,
            Rotation::Deg90 => Point::new(-p.y, p.x),
            Rotation::Deg180 => Point::new(-p.x, -p.y),
            Rotation::Deg270 => Point::new(p.y, -p.x),
        }
    }
}

/// Current pan offset of the board on screen.
///
/// Panning itself is driven by the presentation layer; the resolver only
/// needs [`Viewport::to_board`] to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub pan: Point,
}

impl Viewport {
    pub fn new(pan: Point) -> Self {
        Self { pan }
    }

    /// Translates a pointer position on screen into board space.
    pub fn to_board(&self, pointer: Point) -> Point {
        pointer - self.pan
    }

    /// Shifts the board on screen by `(dx, dy)`.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan + Point::new(dx, dy);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
