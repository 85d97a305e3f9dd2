//! Coordinates and bounding boxes over the bitmap's address space

/// An absolute grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Inclusive bounding box
///
/// Callers keep `from <= to` on both axes; the engine never reorders the
/// corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub from: Coord,
    pub to: Coord,
}

impl Bounds {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    pub const fn from_points(from_x: i64, from_y: i64, to_x: i64, to_y: i64) -> Self {
        Self {
            from: Coord::new(from_x, from_y),
            to: Coord::new(to_x, to_y),
        }
    }

    /// Whether `coord` lies inside the box, both ends inclusive
    pub const fn contains(&self, coord: &Coord) -> bool {
        coord.x >= self.from.x && coord.x <= self.to.x && coord.y >= self.from.y && coord.y <= self.to.y
    }
}

impl core::fmt::Display for Bounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}x{}: {} -> {}]",
            self.to.x - self.from.x,
            self.to.y - self.from.y,
            self.from,
            self.to
        )
    }
}
