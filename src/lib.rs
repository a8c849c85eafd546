pub mod error;
pub mod vehicle;
pub mod sensors;
pub mod control;
pub mod fault;
pub mod io;

// One-stop imports for binaries and integration tests
pub mod types {
    pub use crate::control::{Controller, Direction, DESCENT_POWER, HOVER_POWER};
    pub use crate::error::FlightError;
    pub use crate::fault::{FaultInjector, InjectionOutcome, NUDGE_SPAN_DEG};
    pub use crate::sensors::{
        GyroscopeSensor, Orientation, OrientationSensor, RingPosition, EQUILIBRIUM_POWER,
        RING_ENGINE_COUNT,
    };
    pub use crate::vehicle::{
        CommandOutcome, Drone, DroneStatus, Engine, EngineReading, EngineStatus, Readings,
        START_POWER,
    };
}
