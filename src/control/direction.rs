use std::str::FromStr;

use strum_macros::{Display, EnumIter};

use crate::error::FlightError;
use crate::sensors::orientation::RING_ENGINE_COUNT;

// ---------------------------------------------------------------------------
// Flight directions and their engine power vectors
// ---------------------------------------------------------------------------

/// A direction the drone can move in, commanded while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Engine power levels producing this motion, in ring order
    /// `[front, right, back, left]`.
    ///
    /// Horizontal directions raise one engine above equilibrium so the
    /// airframe tips away from it: forward flight lowers the nose by
    /// elevating the back engine, a left translation elevates the right
    /// engine, and so on. Vertical directions keep the airframe level and
    /// move every engine off equilibrium together.
    pub fn power_vector(self) -> [i32; RING_ENGINE_COUNT] {
        match self {
            Self::Forward => [50, 50, 75, 50],
            Self::Backward => [75, 50, 50, 50],
            Self::Left => [50, 75, 50, 50],
            Self::Right => [50, 50, 50, 75],
            Self::Up => [75, 75, 75, 75],
            Self::Down => [25, 25, 25, 25],
        }
    }
}

impl FromStr for Direction {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(FlightError::UnknownDirection(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
