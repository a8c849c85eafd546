use log::{info, warn};
use nalgebra::Vector3;
use strum_macros::Display;

use crate::control::controller::Controller;
use crate::control::direction::Direction;
use crate::error::FlightError;
use crate::sensors::orientation::{Orientation, RING_ENGINE_COUNT};
use crate::vehicle::engine::{Engine, EngineStatus};

// ---------------------------------------------------------------------------
// Lifecycle status and command outcomes
// ---------------------------------------------------------------------------

/// Drone lifecycle. Off only before the first takeoff; once airborne the
/// model never returns to Off (landing ends in Moving).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DroneStatus {
    Off,
    Moving,
    Hovering,
}

/// What a command actually did. Refusals and diversions are ordinary
/// outcomes: the caller's loop keeps running, nothing here is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The requested action ran.
    Completed,
    /// Takeoff requested while already airborne.
    AlreadyAirborne,
    /// Stabilize requested while already hovering.
    AlreadyHovering,
    /// Flight command requested before takeoff.
    Grounded,
    /// Takeoff hard-refused: the drone is sabotaged.
    TakeoffRefused,
    /// The command was intercepted and turned into an emergency landing.
    EmergencyLanding { destroyed_engine: u32 },
    /// Systems check found nothing wrong.
    Nominal,
    /// Systems check latched a fault; no in-flight response was needed.
    FaultLatched,
}

// ---------------------------------------------------------------------------
// Readings snapshot
// ---------------------------------------------------------------------------

/// One engine's row in a readings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReading {
    pub id: u32,
    pub status: EngineStatus,
    pub power: i32,
}

/// Everything a caller can observe about the drone at one instant.
/// Orientation and velocity are meaningless before takeoff and read `None`.
#[derive(Debug, Clone)]
pub struct Readings {
    pub status: DroneStatus,
    pub orientation: Option<Orientation>,
    pub velocity: Option<Vector3<f64>>,
    pub engines: Vec<EngineReading>,
}

// ---------------------------------------------------------------------------
// Drone
// ---------------------------------------------------------------------------

/// The flight-state machine. Owns one [`Controller`] and routes every public
/// command through a systems check, the sabotage gate, and finally the
/// controller's power policies.
///
/// The sabotage flag is sticky: the first destroyed engine sets it for the
/// rest of the run. A sabotaged drone refuses takeoff on the ground and
/// diverts any in-flight command into an emergency landing.
#[derive(Debug, Clone)]
pub struct Drone {
    controller: Controller,
    status: DroneStatus,
    sabotaged: bool,
}

impl Default for Drone {
    fn default() -> Self {
        Self::new(RING_ENGINE_COUNT as u32)
    }
}

impl Drone {
    /// Build a drone with `engine_count` engines, all off.
    ///
    /// Construction never fails; a fleet the ring math cannot handle is
    /// reported by the first command that refreshes the sensors.
    pub fn new(engine_count: u32) -> Self {
        Self {
            controller: Controller::new(engine_count),
            status: DroneStatus::Off,
            sabotaged: false,
        }
    }

    pub fn status(&self) -> DroneStatus {
        self.status
    }

    pub fn is_sabotaged(&self) -> bool {
        self.sabotaged
    }

    pub fn is_airborne(&self) -> bool {
        self.status != DroneStatus::Off
    }

    pub fn engines(&self) -> &[Engine] {
        self.controller.engines()
    }

    /// Scan the fleet for destroyed engines, latching the sabotage flag.
    /// Runs at the head of every command.
    fn systems_check(&mut self) -> bool {
        if !self.sabotaged && self.controller.destroyed_index().is_some() {
            warn!("systems check: destroyed engine on board, drone is sabotaged");
            self.sabotaged = true;
        }
        self.sabotaged
    }

    fn emergency_landing(&mut self) -> Result<CommandOutcome, FlightError> {
        let destroyed_engine = self.controller.execute_emergency_landing_procedure()?;
        self.status = DroneStatus::Moving;
        Ok(CommandOutcome::EmergencyLanding { destroyed_engine })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Start all engines and climb.
    pub fn take_off(&mut self) -> Result<CommandOutcome, FlightError> {
        if self.systems_check() {
            warn!("takeoff refused: drone is sabotaged");
            return Ok(CommandOutcome::TakeoffRefused);
        }
        if self.is_airborne() {
            return Ok(CommandOutcome::AlreadyAirborne);
        }
        self.controller.start_engines()?;
        self.status = DroneStatus::Moving;
        info!("airborne, climbing at start power");
        Ok(CommandOutcome::Completed)
    }

    /// Move in `direction`. Named around the `move` keyword.
    pub fn move_toward(&mut self, direction: Direction) -> Result<CommandOutcome, FlightError> {
        self.systems_check();
        if !self.is_airborne() {
            return Ok(CommandOutcome::Grounded);
        }
        if self.sabotaged {
            return self.emergency_landing();
        }
        self.controller.move_drone(direction)?;
        self.status = DroneStatus::Moving;
        Ok(CommandOutcome::Completed)
    }

    /// Hold position: all engines to equilibrium.
    pub fn stabilize(&mut self) -> Result<CommandOutcome, FlightError> {
        self.systems_check();
        if !self.is_airborne() {
            return Ok(CommandOutcome::Grounded);
        }
        if self.sabotaged {
            return self.emergency_landing();
        }
        if self.status == DroneStatus::Hovering {
            return Ok(CommandOutcome::AlreadyHovering);
        }
        self.level_out()
    }

    /// Re-level without the already-hovering shortcut. The nudge recovery
    /// path needs the engines and attitude actually recomputed, even when
    /// the status never left Hovering.
    pub(crate) fn force_stabilize(&mut self) -> Result<CommandOutcome, FlightError> {
        self.systems_check();
        if !self.is_airborne() {
            return Ok(CommandOutcome::Grounded);
        }
        if self.sabotaged {
            return self.emergency_landing();
        }
        self.level_out()
    }

    fn level_out(&mut self) -> Result<CommandOutcome, FlightError> {
        self.controller.stabilize_engines()?;
        self.status = DroneStatus::Hovering;
        Ok(CommandOutcome::Completed)
    }

    /// Level out, then descend.
    ///
    /// The descent leaves the status at Moving; the model defines no
    /// transition back to Off once airborne. Kept as-is pending product
    /// clarification.
    pub fn land(&mut self) -> Result<CommandOutcome, FlightError> {
        self.systems_check();
        if !self.is_airborne() {
            return Ok(CommandOutcome::Grounded);
        }
        if self.sabotaged {
            return self.emergency_landing();
        }
        self.controller.stabilize_engines()?;
        self.controller.execute_landing_procedure()?;
        self.status = DroneStatus::Moving;
        info!("descending for landing");
        Ok(CommandOutcome::Completed)
    }

    /// Re-run the systems check and respond to a newly found fault: an
    /// emergency landing when airborne, just the latched flag on the ground
    /// (the next takeoff will be refused).
    pub fn update(&mut self) -> Result<CommandOutcome, FlightError> {
        let was_sabotaged = self.sabotaged;
        if !self.systems_check() {
            return Ok(CommandOutcome::Nominal);
        }
        if !was_sabotaged && self.is_airborne() {
            return self.emergency_landing();
        }
        Ok(CommandOutcome::FaultLatched)
    }

    // -----------------------------------------------------------------------
    // Observation and fault-injection hooks
    // -----------------------------------------------------------------------

    /// Snapshot of everything observable. Orientation and velocity read
    /// `None` before takeoff.
    pub fn readings(&self) -> Readings {
        let airborne = self.is_airborne();
        Readings {
            status: self.status,
            orientation: airborne.then(|| self.controller.orientation()),
            velocity: airborne.then(|| self.controller.velocity()),
            engines: self
                .controller
                .engines()
                .iter()
                .map(|engine| EngineReading {
                    id: engine.id(),
                    status: engine.status(),
                    power: engine.power(),
                })
                .collect(),
        }
    }

    /// Destroy the engine at ring `index`. Fault-injection hook; ordinary
    /// callers go through the injector, which follows up with [`Drone::update`].
    pub(crate) fn destroy_engine(&mut self, index: usize) -> Option<u32> {
        self.controller.destroy_engine(index)
    }

    /// Perturb the attitude without touching the engines. Fault-injection
    /// hook; a degraded reading surfaces as [`FlightError::AttitudeAnomaly`].
    pub(crate) fn nudge_orientation(
        &mut self,
        pitch_offset: f64,
        roll_offset: f64,
    ) -> Result<(), FlightError> {
        self.controller.nudge_orientation(pitch_offset, roll_offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::control::controller::{DESCENT_POWER, HOVER_POWER};
    use crate::vehicle::engine::START_POWER;

    use super::*;

    fn hovering_drone() -> Drone {
        let mut drone = Drone::default();
        drone.take_off().unwrap();
        drone.stabilize().unwrap();
        drone
    }

    fn powers(drone: &Drone) -> Vec<i32> {
        drone.engines().iter().map(|e| e.power()).collect()
    }

    #[test]
    fn full_flight_from_takeoff_to_landing() {
        let mut drone = Drone::new(4);

        assert_eq!(drone.take_off().unwrap(), CommandOutcome::Completed);
        assert_eq!(drone.status(), DroneStatus::Moving);
        assert_eq!(powers(&drone), vec![START_POWER; 4]);

        assert_eq!(drone.stabilize().unwrap(), CommandOutcome::Completed);
        assert_eq!(drone.status(), DroneStatus::Hovering);
        assert_eq!(powers(&drone), vec![HOVER_POWER; 4]);
        let readings = drone.readings();
        assert_eq!(readings.orientation.unwrap(), Orientation::default());
        assert_eq!(readings.velocity.unwrap(), Vector3::zeros());

        assert_eq!(
            drone.move_toward(Direction::Up).unwrap(),
            CommandOutcome::Completed
        );
        assert_eq!(drone.status(), DroneStatus::Moving);
        assert_eq!(powers(&drone), vec![START_POWER; 4]);

        assert_eq!(drone.land().unwrap(), CommandOutcome::Completed);
        assert_eq!(powers(&drone), vec![DESCENT_POWER; 4]);
        assert_eq!(
            drone.status(),
            DroneStatus::Moving,
            "landing does not return the drone to off"
        );
    }

    #[test]
    fn second_takeoff_reports_already_airborne() {
        let mut drone = Drone::default();
        drone.take_off().unwrap();
        assert_eq!(drone.take_off().unwrap(), CommandOutcome::AlreadyAirborne);
    }

    #[test]
    fn stabilize_twice_reports_already_hovering() {
        let mut drone = hovering_drone();
        assert_eq!(drone.stabilize().unwrap(), CommandOutcome::AlreadyHovering);
        assert_eq!(drone.status(), DroneStatus::Hovering);
    }

    #[test]
    fn flight_commands_before_takeoff_are_blocked() {
        let mut drone = Drone::default();
        assert_eq!(
            drone.move_toward(Direction::Forward).unwrap(),
            CommandOutcome::Grounded
        );
        assert_eq!(drone.stabilize().unwrap(), CommandOutcome::Grounded);
        assert_eq!(drone.land().unwrap(), CommandOutcome::Grounded);
        assert_eq!(drone.status(), DroneStatus::Off);
    }

    #[test]
    fn readings_are_not_available_before_takeoff() {
        let drone = Drone::default();
        let readings = drone.readings();
        assert_eq!(readings.status, DroneStatus::Off);
        assert!(readings.orientation.is_none());
        assert!(readings.velocity.is_none());
        assert_eq!(readings.engines.len(), 4);
        for (index, engine) in readings.engines.iter().enumerate() {
            assert_eq!(engine.id, index as u32 + 1);
            assert_eq!(engine.status, EngineStatus::Off);
            assert_eq!(engine.power, 0);
        }
    }

    #[test]
    fn grounded_fault_refuses_takeoff() {
        let mut drone = Drone::default();
        drone.destroy_engine(0).unwrap();

        assert_eq!(drone.update().unwrap(), CommandOutcome::FaultLatched);
        assert_eq!(drone.status(), DroneStatus::Off, "no emergency on the ground");
        assert!(drone.is_sabotaged());

        assert_eq!(drone.take_off().unwrap(), CommandOutcome::TakeoffRefused);
        assert_eq!(drone.status(), DroneStatus::Off);
    }

    #[test]
    fn airborne_fault_diverts_the_next_command() {
        let mut drone = hovering_drone();
        drone.destroy_engine(1).unwrap();

        let outcome = drone.stabilize().unwrap();
        assert_eq!(outcome, CommandOutcome::EmergencyLanding { destroyed_engine: 2 });
        assert_eq!(drone.status(), DroneStatus::Moving);

        let engines = drone.engines();
        assert_eq!(engines[1].status(), EngineStatus::Destroyed);
        assert_eq!(engines[3].status(), EngineStatus::Off, "opposite engine stopped");
        assert_eq!(engines[3].power(), 0);
        assert_eq!(engines[0].power(), DESCENT_POWER);
        assert_eq!(engines[2].power(), DESCENT_POWER);
    }

    #[test]
    fn update_triggers_emergency_landing_in_flight() {
        let mut drone = hovering_drone();
        drone.destroy_engine(2).unwrap();

        let outcome = drone.update().unwrap();
        assert_eq!(outcome, CommandOutcome::EmergencyLanding { destroyed_engine: 3 });
        assert_eq!(drone.status(), DroneStatus::Moving);

        let readings = drone.readings();
        assert_eq!(readings.orientation.unwrap(), Orientation::default());
        assert_eq!(readings.velocity.unwrap().y, -37.5, "controlled descent");
    }

    #[test]
    fn update_without_fault_is_nominal() {
        let mut drone = hovering_drone();
        assert_eq!(drone.update().unwrap(), CommandOutcome::Nominal);
        assert_eq!(drone.status(), DroneStatus::Hovering);
    }

    #[test]
    fn commands_after_emergency_keep_diverting() {
        let mut drone = hovering_drone();
        drone.destroy_engine(0).unwrap();
        drone.update().unwrap();

        let before = powers(&drone);
        let outcome = drone.move_toward(Direction::Up).unwrap();
        assert_eq!(outcome, CommandOutcome::EmergencyLanding { destroyed_engine: 1 });
        assert_eq!(powers(&drone), before, "repeat emergency is stable");

        assert_eq!(drone.take_off().unwrap(), CommandOutcome::TakeoffRefused);
    }
}
