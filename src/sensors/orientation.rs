use crate::error::FlightError;

// ---------------------------------------------------------------------------
// Engine ring layout
// ---------------------------------------------------------------------------

/// Engine count the pitch/roll derivation is built for.
pub const RING_ENGINE_COUNT: usize = 4;

/// The fixed clockwise engine arrangement the attitude math relies on.
///
/// Power-level vectors are index-aligned with this order; the derivation
/// reads paired opposite positions and is undefined for any other layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPosition {
    Front,
    Right,
    Back,
    Left,
}

impl RingPosition {
    /// Index into a power-level vector ordered front, right, back, left.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Ring position of the engine at `index` (wrapping past the ring).
    pub fn from_index(index: usize) -> Self {
        match index % RING_ENGINE_COUNT {
            0 => RingPosition::Front,
            1 => RingPosition::Right,
            2 => RingPosition::Back,
            _ => RingPosition::Left,
        }
    }

    /// The position two steps around the ring; the emergency landing stops
    /// the engine sitting here.
    pub fn opposite(self) -> Self {
        match self {
            RingPosition::Front => RingPosition::Back,
            RingPosition::Right => RingPosition::Left,
            RingPosition::Back => RingPosition::Front,
            RingPosition::Left => RingPosition::Right,
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation snapshot
// ---------------------------------------------------------------------------

/// Attitude derived from paired engine power levels, in degrees.
///
/// Passed by value between the controller and the sensors; never set
/// directly by a command.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Positive pitch = front sits higher than back.
    pub pitch: f64,
    /// Positive roll = right sits higher than left.
    pub roll: f64,
}

// ---------------------------------------------------------------------------
// Orientation sensor
// ---------------------------------------------------------------------------

/// Derives pitch and roll from the current engine power levels.
///
/// Pitch is the front/back power difference halved, roll the right/left
/// difference halved; the most extreme split (100 against 0) maps to ±50
/// degrees.
#[derive(Debug, Clone, Default)]
pub struct OrientationSensor {
    orientation: Orientation,
}

impl OrientationSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed attitude.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Recompute pitch/roll from a power snapshot in ring order.
    ///
    /// Only the four-engine ring is supported; any other count fails fast
    /// instead of indexing past the layout assumption.
    pub fn update(&mut self, power_levels: &[i32]) -> Result<Orientation, FlightError> {
        if power_levels.len() != RING_ENGINE_COUNT {
            return Err(FlightError::UnsupportedEngineCount {
                expected: RING_ENGINE_COUNT,
                actual: power_levels.len(),
            });
        }
        let front = f64::from(power_levels[RingPosition::Front.index()]);
        let right = f64::from(power_levels[RingPosition::Right.index()]);
        let back = f64::from(power_levels[RingPosition::Back.index()]);
        let left = f64::from(power_levels[RingPosition::Left.index()]);

        self.orientation = Orientation {
            pitch: (front - back) / 2.0,
            roll: (right - left) / 2.0,
        };
        Ok(self.orientation)
    }

    /// Overwrite the attitude directly, as an external perturbation rather
    /// than a power recomputation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
