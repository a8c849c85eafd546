use std::io::{self, Write};

use env_logger::Env;

use quad_sim::error::FlightError;
use quad_sim::io::{write_readings, write_telemetry};
use quad_sim::types::{CommandOutcome, Direction, Drone, FaultInjector, InjectionOutcome};

fn main() -> io::Result<()> {
    // Library events go to stderr; the command surface prints its own
    // confirmations, so only warnings are shown unless RUST_LOG says more.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    banner(&mut stdout)?;

    let mut drone = Drone::new(4);
    let mut god = FaultInjector::new();

    loop {
        write!(stdout, ">>> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command {
            "quit" | "exit" => break,
            "help" => banner(&mut stdout)?,
            "take_off" => {
                let outcome = drone.take_off();
                finish(&mut stdout, &drone, outcome)?;
            }
            "stabilize" => {
                let outcome = drone.stabilize();
                finish(&mut stdout, &drone, outcome)?;
            }
            "land" => {
                let outcome = drone.land();
                finish(&mut stdout, &drone, outcome)?;
            }
            "status" => writeln!(stdout, "Drone Status: {}", drone.status())?,
            "readings" => write_readings(&mut stdout, &drone.readings())?,
            "telemetry" => write_telemetry(&mut stdout, &drone.readings())?,
            "destroy_engine" => {
                let outcome = god.destroy_engine(&mut drone);
                finish_injection(&mut stdout, &drone, outcome)?;
            }
            "sabotage_take_off" => {
                let outcome = god.sabotage_take_off(&mut drone);
                finish_injection(&mut stdout, &drone, outcome)?;
            }
            "nudge_drone" => {
                let outcome = god.nudge_drone(&mut drone);
                finish_injection(&mut stdout, &drone, outcome)?;
            }
            cmd if cmd.starts_with("move") => match parse_move(cmd) {
                Ok(direction) => {
                    let outcome = drone.move_toward(direction);
                    finish(&mut stdout, &drone, outcome)?;
                }
                Err(err) => writeln!(stdout, "{}", err)?,
            },
            _ => writeln!(stdout, "This command is not supported. Try `help`.")?,
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command plumbing
// ---------------------------------------------------------------------------

/// Accept both `move_<direction>` and `move <direction>`.
fn parse_move(command: &str) -> Result<Direction, FlightError> {
    let token = command
        .strip_prefix("move_")
        .or_else(|| command.strip_prefix("move "))
        .ok_or_else(|| FlightError::UnknownDirection(command.to_string()))?;
    token.parse()
}

/// Report a drone command's outcome, then the refreshed readings.
fn finish(
    stdout: &mut impl Write,
    drone: &Drone,
    outcome: Result<CommandOutcome, FlightError>,
) -> io::Result<()> {
    match outcome {
        Ok(outcome) => {
            writeln!(stdout, "{}", describe(outcome))?;
            write_readings(stdout, &drone.readings())
        }
        Err(err) => writeln!(stdout, "Command failed: {}", err),
    }
}

fn describe(outcome: CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Completed => "Done.".into(),
        CommandOutcome::AlreadyAirborne => "The drone has already taken off.".into(),
        CommandOutcome::AlreadyHovering => "The drone was already hovering.".into(),
        CommandOutcome::Grounded => "The drone is powered off; take off first.".into(),
        CommandOutcome::TakeoffRefused => {
            "Takeoff refused: systems check found a destroyed engine.".into()
        }
        CommandOutcome::EmergencyLanding { destroyed_engine } => format!(
            "Engine {} is destroyed! Executing emergency landing.",
            destroyed_engine
        ),
        CommandOutcome::Nominal => "Systems nominal.".into(),
        CommandOutcome::FaultLatched => {
            "Systems check latched a fault; the drone stays grounded.".into()
        }
    }
}

/// Report what an injection did. A nudge shows the perturbed snapshot first,
/// then the re-stabilized one.
fn finish_injection(
    stdout: &mut impl Write,
    drone: &Drone,
    outcome: Result<InjectionOutcome, FlightError>,
) -> io::Result<()> {
    match outcome {
        Ok(InjectionOutcome::EngineDestroyed { engine_id, emergency }) => {
            writeln!(stdout, "Engine {} destroyed.", engine_id)?;
            if emergency {
                writeln!(stdout, "The drone executed an emergency landing.")?;
            }
            write_readings(stdout, &drone.readings())
        }
        Ok(InjectionOutcome::AlreadyFaulted) => {
            writeln!(stdout, "The drone has already suffered its one fault.")
        }
        Ok(InjectionOutcome::NotGrounded) => {
            writeln!(stdout, "Too late, the drone has already taken off.")
        }
        Ok(InjectionOutcome::NotAirborne) => {
            writeln!(stdout, "The drone is on the ground; nothing to nudge.")
        }
        Ok(InjectionOutcome::Nudged { pitch_offset, roll_offset, readings, anomaly }) => {
            writeln!(
                stdout,
                "A gust shoves the drone: pitch {:+.2} deg, roll {:+.2} deg.",
                pitch_offset, roll_offset
            )?;
            if anomaly.is_some() {
                writeln!(stdout, "Attitude anomaly detected; velocity reading degraded.")?;
            }
            write_readings(stdout, &readings)?;
            writeln!(stdout, "Stabilizing...")?;
            write_readings(stdout, &drone.readings())
        }
        Err(err) => writeln!(stdout, "Injection failed: {}", err),
    }
}

fn banner(stdout: &mut impl Write) -> io::Result<()> {
    writeln!(stdout)?;
    writeln!(stdout, "====================================================")?;
    writeln!(stdout, "  QUADROTOR FLIGHT SIMULATOR")?;
    writeln!(stdout, "====================================================")?;
    writeln!(stdout)?;
    writeln!(stdout, "Drone commands:")?;
    writeln!(stdout, "  take_off, move_forward, move_backward, move_left,")?;
    writeln!(stdout, "  move_right, move_up, move_down, stabilize, land,")?;
    writeln!(stdout, "  status, readings, telemetry")?;
    writeln!(stdout)?;
    writeln!(stdout, "God commands:")?;
    writeln!(stdout, "  destroy_engine, sabotage_take_off, nudge_drone")?;
    writeln!(stdout)?;
    writeln!(stdout, "`help` reprints this banner; `quit` exits.")?;
    writeln!(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_commands_parse_both_spellings() {
        assert_eq!(parse_move("move_forward").unwrap(), Direction::Forward);
        assert_eq!(parse_move("move down").unwrap(), Direction::Down);
    }

    #[test]
    fn bare_move_is_an_unknown_direction() {
        let err = parse_move("move").unwrap_err();
        assert_eq!(err, FlightError::UnknownDirection("move".into()));
    }

    #[test]
    fn every_documented_move_command_maps_to_its_direction() {
        for (command, direction) in [
            ("move_forward", Direction::Forward),
            ("move_backward", Direction::Backward),
            ("move_left", Direction::Left),
            ("move_right", Direction::Right),
            ("move_up", Direction::Up),
            ("move_down", Direction::Down),
        ] {
            assert_eq!(parse_move(command).unwrap(), direction, "{}", command);
        }
    }
}
