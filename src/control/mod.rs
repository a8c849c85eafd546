pub mod direction;
pub mod controller;

pub use direction::Direction;
pub use controller::{Controller, DESCENT_POWER, HOVER_POWER};
