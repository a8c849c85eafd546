use log::{debug, info, warn};
use nalgebra::Vector3;

use crate::control::direction::Direction;
use crate::error::FlightError;
use crate::sensors::gyroscope::GyroscopeSensor;
use crate::sensors::orientation::{
    Orientation, OrientationSensor, RingPosition, RING_ENGINE_COUNT,
};
use crate::vehicle::engine::{Engine, EngineStatus, START_POWER};

// ---------------------------------------------------------------------------
// Power policies
// ---------------------------------------------------------------------------

/// Equilibrium level: a level drone at this power holds its altitude.
pub const HOVER_POWER: i32 = 50;

/// Level for a controlled descent, normal or emergency.
pub const DESCENT_POWER: i32 = 25;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the engine fleet and both sensors, and holds the shared snapshot of
/// current power levels the sensors read from.
///
/// Every power-assignment operation ends in [`Controller::refresh`], which
/// rebuilds the snapshot and recomputes orientation then velocity in that
/// order. Readings taken without an intervening power change are therefore
/// always consistent with the engines.
#[derive(Debug, Clone)]
pub struct Controller {
    engines: Vec<Engine>,
    power_levels: Vec<i32>,
    orientation_sensor: OrientationSensor,
    gyroscope: GyroscopeSensor,
}

impl Controller {
    /// Build a fleet of `engine_count` engines, ids assigned from 1, all off.
    ///
    /// Any count is accepted here; the ring math rejects counts other than
    /// four at the first refresh.
    pub fn new(engine_count: u32) -> Self {
        let engines: Vec<Engine> = (1..=engine_count).map(Engine::new).collect();
        let power_levels = vec![0; engines.len()];
        Self {
            engines,
            power_levels,
            orientation_sensor: OrientationSensor::new(),
            gyroscope: GyroscopeSensor::new(),
        }
    }

    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    /// Current power snapshot, ring-ordered.
    pub fn power_levels(&self) -> &[i32] {
        &self.power_levels
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation_sensor.orientation()
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.gyroscope.velocity()
    }

    /// Ring index of the destroyed engine, if any.
    pub fn destroyed_index(&self) -> Option<usize> {
        self.engines
            .iter()
            .position(|engine| engine.status() == EngineStatus::Destroyed)
    }

    // -----------------------------------------------------------------------
    // Power assignment
    // -----------------------------------------------------------------------

    /// Assign one power level per engine, index-aligned, then refresh.
    ///
    /// Values are not range-checked; off-policy levels propagate into the
    /// derived physics as given.
    pub fn set_power_levels(&mut self, levels: &[i32]) -> Result<(), FlightError> {
        if levels.len() != self.engines.len() {
            return Err(FlightError::PowerVectorMismatch {
                given: levels.len(),
                engines: self.engines.len(),
            });
        }
        for (engine, &level) in self.engines.iter_mut().zip(levels) {
            engine.set_power(level);
        }
        self.refresh()
    }

    fn set_uniform_power(&mut self, level: i32) -> Result<(), FlightError> {
        let levels = vec![level; self.engines.len()];
        self.set_power_levels(&levels)
    }

    /// Spin up every engine at the start default.
    pub fn start_engines(&mut self) -> Result<(), FlightError> {
        for engine in &mut self.engines {
            engine.start();
        }
        info!("all engines started at power {}", START_POWER);
        self.refresh()
    }

    /// All engines to equilibrium: level attitude, zero net motion.
    pub fn stabilize_engines(&mut self) -> Result<(), FlightError> {
        debug!("stabilizing at power {}", HOVER_POWER);
        self.set_uniform_power(HOVER_POWER)
    }

    /// All engines to descent power.
    pub fn execute_landing_procedure(&mut self) -> Result<(), FlightError> {
        info!("landing procedure: all engines to power {}", DESCENT_POWER);
        self.set_uniform_power(DESCENT_POWER)
    }

    /// Compensated descent after an engine loss.
    ///
    /// With the destroyed engine at ring index i, the engine two ring steps
    /// away (i+2 mod 4) is fully stopped so the dead corner has no live
    /// counterweight, and the remaining pair descends at [`DESCENT_POWER`].
    /// The resulting attitude is level. Returns the destroyed engine's id.
    pub fn execute_emergency_landing_procedure(&mut self) -> Result<u32, FlightError> {
        if self.engines.len() != RING_ENGINE_COUNT {
            return Err(FlightError::UnsupportedEngineCount {
                expected: RING_ENGINE_COUNT,
                actual: self.engines.len(),
            });
        }
        let destroyed = self.destroyed_index().ok_or(FlightError::NoDestroyedEngine)?;
        let compensating = RingPosition::from_index(destroyed).opposite().index();
        for (index, engine) in self.engines.iter_mut().enumerate() {
            if index == compensating {
                engine.stop();
            } else if engine.is_live() {
                engine.set_power(DESCENT_POWER);
            }
        }
        let destroyed_id = self.engines[destroyed].id();
        warn!(
            "emergency landing: engine {} destroyed, stopping engine {} to compensate",
            destroyed_id,
            self.engines[compensating].id()
        );
        self.refresh()?;
        Ok(destroyed_id)
    }

    /// Apply a direction's fixed power vector.
    pub fn move_drone(&mut self, direction: Direction) -> Result<(), FlightError> {
        let vector = direction.power_vector();
        debug!("moving {}: power vector {:?}", direction, vector);
        self.set_power_levels(&vector)
    }

    // -----------------------------------------------------------------------
    // Sensor pipeline
    // -----------------------------------------------------------------------

    /// Rebuild the power snapshot from the engines, then recompute
    /// orientation and velocity from it.
    ///
    /// Must run after every power change and before readings are reported;
    /// skipping it leaves the sensors consistent with the previous power
    /// state, not the current one.
    pub fn refresh(&mut self) -> Result<(), FlightError> {
        self.power_levels = self.engines.iter().map(Engine::power).collect();
        let orientation = self.orientation_sensor.update(&self.power_levels)?;
        debug!(
            "snapshot {:?}: pitch {:.2} roll {:.2}",
            self.power_levels, orientation.pitch, orientation.roll
        );
        self.gyroscope.update(orientation, &self.power_levels)
    }

    /// Offset the attitude without touching the engines, then rerun only the
    /// gyroscope. A full refresh would recompute the attitude from the power
    /// levels and erase the perturbation.
    pub fn nudge_orientation(
        &mut self,
        pitch_offset: f64,
        roll_offset: f64,
    ) -> Result<(), FlightError> {
        let mut orientation = self.orientation_sensor.orientation();
        orientation.pitch += pitch_offset;
        orientation.roll += roll_offset;
        self.orientation_sensor.set_orientation(orientation);
        warn!(
            "attitude nudged to pitch {:.2} roll {:.2}",
            orientation.pitch, orientation.roll
        );
        self.gyroscope.update(orientation, &self.power_levels)
    }

    /// Destroy the engine at `index`, returning its id. `None` when the
    /// index is outside the fleet.
    pub fn destroy_engine(&mut self, index: usize) -> Option<u32> {
        let engine = self.engines.get_mut(index)?;
        engine.destroy();
        warn!("engine {} destroyed", engine.id());
        Some(engine.id())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn airborne_controller() -> Controller {
        let mut ctrl = Controller::new(RING_ENGINE_COUNT as u32);
        ctrl.start_engines().unwrap();
        ctrl
    }

    #[test]
    fn start_powers_every_engine_at_the_default() {
        let ctrl = airborne_controller();
        assert_eq!(ctrl.power_levels(), &[START_POWER; 4]);
        for engine in ctrl.engines() {
            assert_eq!(engine.status(), EngineStatus::On);
        }
        assert_eq!(ctrl.velocity().y, 25.0, "full power climbs");
    }

    #[test]
    fn stabilize_levels_the_drone() {
        let mut ctrl = airborne_controller();
        ctrl.stabilize_engines().unwrap();
        assert_eq!(ctrl.power_levels(), &[HOVER_POWER; 4]);
        assert_eq!(ctrl.orientation(), Orientation::default());
        assert_eq!(ctrl.velocity(), Vector3::zeros());
    }

    #[test]
    fn landing_descends_level() {
        let mut ctrl = airborne_controller();
        ctrl.execute_landing_procedure().unwrap();
        assert_eq!(ctrl.power_levels(), &[DESCENT_POWER; 4]);
        assert_eq!(ctrl.orientation(), Orientation::default());
        assert_eq!(ctrl.velocity().y, -25.0);
    }

    #[test]
    fn every_direction_applies_its_documented_vector() {
        for direction in Direction::iter() {
            let mut ctrl = airborne_controller();
            ctrl.move_drone(direction).unwrap();
            assert_eq!(
                ctrl.power_levels(),
                &direction.power_vector(),
                "power vector mismatch for {}",
                direction
            );
        }
    }

    #[test]
    fn forward_dips_the_nose() {
        let mut ctrl = airborne_controller();
        ctrl.move_drone(Direction::Forward).unwrap();
        let o = ctrl.orientation();
        assert_eq!(o.pitch, -12.5, "elevated back engine pitches the nose down");
        assert_eq!(o.roll, 0.0);
        assert!(ctrl.velocity().x != 0.0);
        assert_eq!(ctrl.velocity().y, 0.0);
    }

    #[test]
    fn left_raises_the_right_side() {
        let mut ctrl = airborne_controller();
        ctrl.move_drone(Direction::Left).unwrap();
        let o = ctrl.orientation();
        assert_eq!(o.roll, 12.5);
        assert_eq!(o.pitch, 0.0);
    }

    #[test]
    fn emergency_landing_stops_the_opposite_engine() {
        for destroyed in 0..RING_ENGINE_COUNT {
            let mut ctrl = airborne_controller();
            ctrl.stabilize_engines().unwrap();
            ctrl.destroy_engine(destroyed).unwrap();

            let id = ctrl.execute_emergency_landing_procedure().unwrap();
            assert_eq!(id, destroyed as u32 + 1);

            let compensating = (destroyed + 2) % RING_ENGINE_COUNT;
            for (index, engine) in ctrl.engines().iter().enumerate() {
                let (status, power) = if index == destroyed {
                    (EngineStatus::Destroyed, 0)
                } else if index == compensating {
                    (EngineStatus::Off, 0)
                } else {
                    (EngineStatus::On, DESCENT_POWER)
                };
                assert_eq!(engine.status(), status, "engine {} status", index + 1);
                assert_eq!(engine.power(), power, "engine {} power", index + 1);
            }

            // The surviving pair sits on one axis, so the descent is level.
            assert_eq!(ctrl.orientation(), Orientation::default());
            assert_eq!(ctrl.velocity().y, -37.5);
        }
    }

    #[test]
    fn emergency_landing_without_a_fault_is_an_error() {
        let mut ctrl = airborne_controller();
        let err = ctrl.execute_emergency_landing_procedure().unwrap_err();
        assert_eq!(err, FlightError::NoDestroyedEngine);
    }

    #[test]
    fn wrong_length_vector_is_rejected_before_any_assignment() {
        let mut ctrl = airborne_controller();
        let err = ctrl.set_power_levels(&[50, 50, 50]).unwrap_err();
        assert_eq!(err, FlightError::PowerVectorMismatch { given: 3, engines: 4 });
        assert_eq!(ctrl.power_levels(), &[START_POWER; 4], "fleet untouched");
    }

    #[test]
    fn non_ring_fleet_fails_at_first_refresh() {
        let mut ctrl = Controller::new(5);
        let err = ctrl.start_engines().unwrap_err();
        assert_eq!(
            err,
            FlightError::UnsupportedEngineCount { expected: 4, actual: 5 }
        );
    }

    #[test]
    fn nudge_keeps_power_and_moves_attitude() {
        let mut ctrl = airborne_controller();
        ctrl.nudge_orientation(3.0, 0.0).unwrap();

        assert_eq!(ctrl.power_levels(), &[START_POWER; 4], "engines untouched");
        assert_eq!(ctrl.orientation().pitch, 3.0);
        let expected = 25.0 * 3.0_f64.to_radians().cos();
        assert!((ctrl.velocity().x - expected).abs() < 1e-12);
    }

    #[test]
    fn nudge_on_both_axes_degrades_the_reading() {
        let mut ctrl = airborne_controller();
        let err = ctrl.nudge_orientation(2.0, -1.5).unwrap_err();
        assert!(matches!(err, FlightError::AttitudeAnomaly { .. }));
        assert!(ctrl.velocity().z.is_nan());
    }
}
