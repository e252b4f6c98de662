//! Turn classification at an interior node of a path.
//!
//! Coordinates are y-up: a counter-clockwise change of heading is a left
//! turn.

use std::fmt;

use wf_core::Point;

/// A heading change larger than this (in degrees, either way) is a turn.
pub const TURN_THRESHOLD_DEG: f64 = 45.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Straight,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Left     => "Turn left",
            Direction::Right    => "Turn right",
            Direction::Straight => "Go straight",
        }
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        self == Direction::Straight
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Heading change at `cur`, in degrees within `(-180, 180]`.
///
/// Positive is counter-clockwise (left).
pub fn signed_turn_deg(prev: Point, cur: Point, next: Point) -> f64 {
    let delta = (cur.heading_deg(next) - prev.heading_deg(cur)) % 360.0;
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Classify the turn a walker makes at `cur` when arriving from `prev` and
/// leaving towards `next`.
pub fn turn_direction(prev: Point, cur: Point, next: Point) -> Direction {
    let delta = signed_turn_deg(prev, cur, next);
    if delta > TURN_THRESHOLD_DEG {
        Direction::Left
    } else if delta < -TURN_THRESHOLD_DEG {
        Direction::Right
    } else {
        Direction::Straight
    }
}
