use std::io::{self, Write};

use crate::vehicle::drone::Readings;

/// Render a float as a JSON number, mapping the degraded NaN reading (and
/// any other non-finite value) to `null`.
fn json_number(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "null".into()
    }
}

/// Write a readings snapshot as a JSON telemetry document.
pub fn write_telemetry<W: Write>(writer: &mut W, readings: &Readings) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"status\": \"{}\",", readings.status)?;

    match readings.orientation {
        Some(o) => {
            writeln!(writer, "  \"orientation\": {{")?;
            writeln!(writer, "    \"pitch_deg\": {},", json_number(o.pitch))?;
            writeln!(writer, "    \"roll_deg\": {}", json_number(o.roll))?;
            writeln!(writer, "  }},")?;
        }
        None => writeln!(writer, "  \"orientation\": null,")?,
    }

    match readings.velocity {
        Some(v) => {
            writeln!(writer, "  \"velocity\": {{")?;
            writeln!(writer, "    \"x\": {},", json_number(v.x))?;
            writeln!(writer, "    \"y\": {},", json_number(v.y))?;
            writeln!(writer, "    \"z\": {}", json_number(v.z))?;
            writeln!(writer, "  }},")?;
        }
        None => writeln!(writer, "  \"velocity\": null,")?,
    }

    writeln!(writer, "  \"engines\": [")?;
    let last = readings.engines.len().saturating_sub(1);
    for (index, engine) in readings.engines.iter().enumerate() {
        let comma = if index == last { "" } else { "," };
        writeln!(
            writer,
            "    {{ \"id\": {}, \"status\": \"{}\", \"power\": {} }}{}",
            engine.id, engine.status, engine.power, comma
        )?;
    }
    writeln!(writer, "  ]")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write telemetry JSON to a file at the given path.
pub fn write_telemetry_file(path: &str, readings: &Readings) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_telemetry(&mut file, readings)
}
