pub mod orientation;
pub mod gyroscope;

pub use orientation::{Orientation, OrientationSensor, RingPosition, RING_ENGINE_COUNT};
pub use gyroscope::{GyroscopeSensor, EQUILIBRIUM_POWER};
