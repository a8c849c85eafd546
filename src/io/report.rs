use std::io::{self, Write};

use crate::vehicle::drone::Readings;

/// Write the human-readable readings snapshot.
///
/// Layout: status line, orientation block, gyroscope block, then one block
/// per engine. Orientation and velocity read "N/A" before takeoff. The
/// snapshot is framed by blank lines so it stands out between prompts.
pub fn write_readings<W: Write>(writer: &mut W, readings: &Readings) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Drone Status: {}", readings.status)?;

    writeln!(writer, "Orientation:")?;
    match readings.orientation {
        Some(o) => {
            writeln!(writer, " Pitch: {}", o.pitch)?;
            writeln!(writer, " Roll: {}", o.roll)?;
        }
        None => {
            writeln!(writer, " Pitch: N/A")?;
            writeln!(writer, " Roll: N/A")?;
        }
    }

    writeln!(writer, "Gyroscope Measurements:")?;
    match readings.velocity {
        Some(v) => {
            writeln!(writer, " X Velocity: {}", v.x)?;
            writeln!(writer, " Y Velocity: {}", v.y)?;
            writeln!(writer, " Z Velocity: {}", v.z)?;
        }
        None => {
            writeln!(writer, " X Velocity: N/A")?;
            writeln!(writer, " Y Velocity: N/A")?;
            writeln!(writer, " Z Velocity: N/A")?;
        }
    }

    for engine in &readings.engines {
        writeln!(writer, "Engine {}:", engine.id)?;
        writeln!(writer, " Status: {}", engine.status)?;
        writeln!(writer, " Power: {}", engine.power)?;
    }
    writeln!(writer)?;
    Ok(())
}
