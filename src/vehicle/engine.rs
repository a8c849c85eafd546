use strum_macros::Display;

// ---------------------------------------------------------------------------
// Engine: one rotary-propeller actuator
// ---------------------------------------------------------------------------

/// Power level every engine spins up to on start (net climb).
pub const START_POWER: i32 = 75;

/// Operational status of a single engine. Destroyed is terminal for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EngineStatus {
    Off,
    On,
    Destroyed,
}

/// One engine of the fleet, identified from 1 to n within its drone.
///
/// The drone is assumed calibrated so that a power level above 50 lifts the
/// engine's corner of the airframe, below 50 drops it, and exactly 50 holds
/// it in place.
#[derive(Debug, Clone)]
pub struct Engine {
    id: u32,
    power: i32,
    status: EngineStatus,
}

impl Engine {
    /// New engine: off, power zero.
    pub fn new(id: u32) -> Self {
        Self { id, power: 0, status: EngineStatus::Off }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Destroyed engines are gone for the run; everything else is live.
    pub fn is_live(&self) -> bool {
        self.status != EngineStatus::Destroyed
    }

    /// Spin up at the start default.
    pub fn start(&mut self) {
        self.status = EngineStatus::On;
        self.power = START_POWER;
    }

    /// Full stop: off, power zero.
    pub fn stop(&mut self) {
        self.status = EngineStatus::Off;
        self.power = 0;
    }

    /// Overwrite the power level. Deliberately unguarded: the level can be
    /// set on an off engine, and no caller path depends on a status check
    /// (known latent inconsistency, kept as-is).
    pub fn set_power(&mut self, level: i32) {
        self.power = level;
    }

    /// Mark the engine destroyed, power forced to zero.
    pub fn destroy(&mut self) {
        self.status = EngineStatus::Destroyed;
        self.power = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_is_off_at_zero() {
        let e = Engine::new(1);
        assert_eq!(e.status(), EngineStatus::Off);
        assert_eq!(e.power(), 0);
        assert!(e.is_live());
    }

    #[test]
    fn start_applies_default_power() {
        let mut e = Engine::new(1);
        e.start();
        assert_eq!(e.status(), EngineStatus::On);
        assert_eq!(e.power(), START_POWER);
    }

    #[test]
    fn stop_cuts_power() {
        let mut e = Engine::new(2);
        e.start();
        e.stop();
        assert_eq!(e.status(), EngineStatus::Off);
        assert_eq!(e.power(), 0);
    }

    #[test]
    fn destroy_is_terminal_and_cuts_power() {
        let mut e = Engine::new(3);
        e.start();
        e.destroy();
        assert_eq!(e.status(), EngineStatus::Destroyed);
        assert_eq!(e.power(), 0);
        assert!(!e.is_live());
    }

    #[test]
    fn set_power_has_no_status_guard() {
        let mut e = Engine::new(4);
        e.set_power(25);
        assert_eq!(e.power(), 25, "power applies even while the engine is off");
        assert_eq!(e.status(), EngineStatus::Off);
    }

    #[test]
    fn status_renders_lowercase() {
        assert_eq!(EngineStatus::Off.to_string(), "off");
        assert_eq!(EngineStatus::On.to_string(), "on");
        assert_eq!(EngineStatus::Destroyed.to_string(), "destroyed");
    }
}
