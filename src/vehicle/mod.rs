pub mod engine;
pub mod drone;

pub use engine::{Engine, EngineStatus, START_POWER};
pub use drone::{CommandOutcome, Drone, DroneStatus, EngineReading, Readings};
