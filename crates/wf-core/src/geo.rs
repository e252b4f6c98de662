//! Planar coordinate type.
//!
//! Indoor maps use a flat 2-D coordinate space (floor-plan pixels or metres,
//! the engine does not care which).  Distances are plain Euclidean and the
//! frame is y-up: a positive heading change is counter-clockwise.

/// A point on the floor plan.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Polar angle, in degrees, of the vector from `self` to `other`.
    ///
    /// Range is `(-180, 180]`; `0` points along +x, `90` along +y.
    #[inline]
    pub fn heading_deg(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
