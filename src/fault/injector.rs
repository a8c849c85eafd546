use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FlightError;
use crate::vehicle::drone::{CommandOutcome, Drone, Readings};

// ---------------------------------------------------------------------------
// Fault injection ("God" commands)
// ---------------------------------------------------------------------------

/// Largest attitude offset a nudge can apply, per axis, in degrees.
pub const NUDGE_SPAN_DEG: f64 = 5.0;

/// What an injection did to the drone.
#[derive(Debug, Clone)]
pub enum InjectionOutcome {
    /// An engine was destroyed; `emergency` reports whether the drone was
    /// airborne and had to emergency-land because of it.
    EngineDestroyed { engine_id: u32, emergency: bool },
    /// The drone already took its one fault for this run.
    AlreadyFaulted,
    /// Takeoff sabotage only works before takeoff.
    NotGrounded,
    /// A nudge only works on a flying drone.
    NotAirborne,
    /// Attitude perturbed and recovered. `readings` is the mid-nudge
    /// snapshot; `anomaly` carries the degraded-velocity signal when both
    /// axes ended up tilted.
    Nudged {
        pitch_offset: f64,
        roll_offset: f64,
        readings: Readings,
        anomaly: Option<FlightError>,
    },
}

/// External actor that breaks the drone: destroys engines, sabotages
/// takeoffs, shoves the airframe. Owns its RNG so scripted runs can seed it.
#[derive(Debug)]
pub struct FaultInjector {
    rng: StdRng,
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultInjector {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Deterministic injector for tests and replayable runs.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Destroy one live engine, chosen uniformly at random, then let the
    /// drone respond. Refused once the drone has taken its one fault.
    pub fn destroy_engine(&mut self, drone: &mut Drone) -> Result<InjectionOutcome, FlightError> {
        if drone.is_sabotaged() {
            info!("injection refused: drone already faulted this run");
            return Ok(InjectionOutcome::AlreadyFaulted);
        }
        let live: Vec<usize> = drone
            .engines()
            .iter()
            .enumerate()
            .filter(|(_, engine)| engine.is_live())
            .map(|(index, _)| index)
            .collect();
        if live.is_empty() {
            return Err(FlightError::NoLiveEngine);
        }
        let target = live[self.rng.random_range(0..live.len())];
        let engine_id = drone.destroy_engine(target).ok_or(FlightError::NoLiveEngine)?;

        let outcome = drone.update()?;
        let emergency = matches!(outcome, CommandOutcome::EmergencyLanding { .. });
        warn!(
            "injected fault: engine {} destroyed, emergency landing: {}",
            engine_id, emergency
        );
        Ok(InjectionOutcome::EngineDestroyed { engine_id, emergency })
    }

    /// Destroy an engine while the drone is still on the ground, so the
    /// next takeoff is refused. No-op once airborne.
    pub fn sabotage_take_off(
        &mut self,
        drone: &mut Drone,
    ) -> Result<InjectionOutcome, FlightError> {
        if drone.is_airborne() {
            info!("sabotage refused: drone already took off");
            return Ok(InjectionOutcome::NotGrounded);
        }
        self.destroy_engine(drone)
    }

    /// Shove the airframe: offset pitch and roll by independent uniform
    /// amounts within [`NUDGE_SPAN_DEG`], capture the perturbed readings,
    /// then force a stabilize. Only meaningful in the air.
    pub fn nudge_drone(&mut self, drone: &mut Drone) -> Result<InjectionOutcome, FlightError> {
        if !drone.is_airborne() {
            info!("nudge refused: drone is on the ground");
            return Ok(InjectionOutcome::NotAirborne);
        }
        let pitch_offset = self.rng.random_range(-NUDGE_SPAN_DEG..=NUDGE_SPAN_DEG);
        let roll_offset = self.rng.random_range(-NUDGE_SPAN_DEG..=NUDGE_SPAN_DEG);

        // Both axes almost always end up tilted, so a degraded velocity
        // reading is the expected result here, not a failure of the nudge.
        let anomaly = match drone.nudge_orientation(pitch_offset, roll_offset) {
            Ok(()) => None,
            Err(err @ FlightError::AttitudeAnomaly { .. }) => Some(err),
            Err(other) => return Err(other),
        };
        let readings = drone.readings();

        drone.force_stabilize()?;
        Ok(InjectionOutcome::Nudged { pitch_offset, roll_offset, readings, anomaly })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
