pub mod report;
pub mod json;

pub use report::write_readings;
pub use json::{write_telemetry, write_telemetry_file};
