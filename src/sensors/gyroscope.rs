use log::warn;
use nalgebra::Vector3;

use crate::error::FlightError;
use crate::sensors::orientation::Orientation;

// ---------------------------------------------------------------------------
// Gyroscope sensor: velocity from attitude + mean power
// ---------------------------------------------------------------------------

/// Mean power level at which the drone neither climbs nor descends.
pub const EQUILIBRIUM_POWER: f64 = 50.0;

/// Derives the velocity components from the attitude and the mean engine
/// power.
///
/// Axes: x forward/backward, y vertical, z left/right. Without yaw there is
/// no frame of reference for z, so it stays 0. In the degraded
/// combined-motion case it reads NaN instead.
#[derive(Debug, Clone, Default)]
pub struct GyroscopeSensor {
    velocity: Vector3<f64>,
}

impl GyroscopeSensor {
    pub fn new() -> Self {
        Self { velocity: Vector3::zeros() }
    }

    /// Last computed velocity.
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Speed along a tilt axis: deviation of the mean power from equilibrium,
    /// projected through the tilt angle. Not real aerodynamics, just the
    /// simplified placeholder the whole motion model shares.
    pub fn velocity_magnitude(power_levels: &[i32], angle_deg: f64) -> f64 {
        let sum: i32 = power_levels.iter().sum();
        let mean = f64::from(sum) / power_levels.len() as f64;
        (mean - EQUILIBRIUM_POWER) * angle_deg.to_radians().cos()
    }

    /// Recompute the velocity for the given attitude.
    ///
    /// The motion model admits one tilted axis at a time. Both axes tilted at
    /// once means that invariant was violated upstream: x and y are still
    /// estimated (the larger angle carries x, the 90° complement of the
    /// smaller carries y), z reads NaN, and the anomaly is returned for the
    /// caller to report. Never a panic.
    pub fn update(
        &mut self,
        orientation: Orientation,
        power_levels: &[i32],
    ) -> Result<(), FlightError> {
        let Orientation { pitch, roll } = orientation;
        if pitch == 0.0 && roll == 0.0 {
            // Level: pure vertical motion.
            let vertical = Self::velocity_magnitude(power_levels, 0.0);
            self.velocity = Vector3::new(0.0, vertical, 0.0);
        } else if pitch == 0.0 {
            // Lateral: roll carries the whole motion.
            let lateral = Self::velocity_magnitude(power_levels, roll);
            self.velocity = Vector3::new(lateral, 0.0, 0.0);
        } else if roll == 0.0 {
            // Longitudinal: pitch carries the whole motion.
            let longitudinal = Self::velocity_magnitude(power_levels, pitch);
            self.velocity = Vector3::new(longitudinal, 0.0, 0.0);
        } else {
            // Combined tilt: the drone has "escaped to the Z dimension".
            // The complement rule degenerates smoothly: with the smaller
            // angle at 0 the result matches the single-axis cases above.
            let (larger, smaller) = if pitch.abs() >= roll.abs() {
                (pitch, roll)
            } else {
                (roll, pitch)
            };
            self.velocity = Vector3::new(
                Self::velocity_magnitude(power_levels, larger),
                Self::velocity_magnitude(power_levels, 90.0 - smaller.abs()),
                f64::NAN,
            );
            warn!(
                "attitude anomaly: pitch {:.2} and roll {:.2} both nonzero, z degraded",
                pitch, roll
            );
            return Err(FlightError::AttitudeAnomaly { pitch, roll });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
