/// ----- CONSOLE -----
/// Line commands accepted by the binary on stdin:
///
/// ```text
/// call <floor> <up|down>      external hall call
/// cab <unit> <floor>          in-cab button press
/// maint <unit> <on|off>       take a unit out of / back into service
/// load <unit> <passengers>    report the current load of a unit
/// status                      print a JSON snapshot
/// quit                        stop the scheduler and exit
/// ```

use thiserror::Error;

use shared_resources::direction::Direction;
use shared_resources::error::DispatchError;
use shared_resources::{Floor, UnitId};

use crate::dispatcher::Dispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Call { floor: Floor, direction: Direction },
    Cab { unit_id: UnitId, floor: Floor },
    Maintenance { unit_id: UnitId, on: bool },
    Load { unit_id: UnitId, load: u32 },
    Status,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects: {usage}")]
    Usage { command: String, usage: &'static str },
    #[error("'{0}' is not a valid value")]
    BadValue(String),
}

fn value<T: std::str::FromStr>(word: &str) -> Result<T, ParseCommandError> {
    word.parse::<T>().map_err(|_| ParseCommandError::BadValue(word.to_string()))
}

fn switch(word: &str) -> Result<bool, ParseCommandError> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ParseCommandError::BadValue(word.to_string())),
    }
}

impl ConsoleCommand {
    /// Blank lines and `#` comments parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseCommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(None);
        };
        if command.starts_with('#') {
            return Ok(None);
        }
        let usage = |usage: &'static str| ParseCommandError::Usage {
            command: command.to_string(),
            usage: usage,
        };

        let parsed = match (command.to_ascii_lowercase().as_str(), args) {
            ("call", [floor, direction]) => ConsoleCommand::Call {
                floor: value(floor)?,
                direction: match Direction::parse(direction) {
                    Some(Direction::Idle) | None => return Err(ParseCommandError::BadValue(direction.to_string())),
                    Some(direction) => direction,
                },
            },
            ("call", _) => return Err(usage("call <floor> <up|down>")),
            ("cab", [unit_id, floor]) => ConsoleCommand::Cab {
                unit_id: value(unit_id)?,
                floor: value(floor)?,
            },
            ("cab", _) => return Err(usage("cab <unit> <floor>")),
            ("maint", [unit_id, on]) => ConsoleCommand::Maintenance {
                unit_id: value(unit_id)?,
                on: switch(on)?,
            },
            ("maint", _) => return Err(usage("maint <unit> <on|off>")),
            ("load", [unit_id, load]) => ConsoleCommand::Load {
                unit_id: value(unit_id)?,
                load: value(load)?,
            },
            ("load", _) => return Err(usage("load <unit> <passengers>")),
            ("status", []) => ConsoleCommand::Status,
            ("quit", []) | ("exit", []) => ConsoleCommand::Quit,
            _ => return Err(ParseCommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(parsed))
    }

    /// Applies a mutating command. `Status` and `Quit` are left to the caller.
    pub fn execute(&self, dispatcher: &Dispatcher) -> Result<(), DispatchError> {
        match *self {
            ConsoleCommand::Call { floor, direction } => dispatcher.request_elevator(floor, direction).map(|_| ()),
            ConsoleCommand::Cab { unit_id, floor } => dispatcher.process_internal_request(unit_id, floor),
            ConsoleCommand::Maintenance { unit_id, on } => dispatcher.set_maintenance(unit_id, on),
            ConsoleCommand::Load { unit_id, load } => dispatcher.set_load(unit_id, load),
            ConsoleCommand::Status | ConsoleCommand::Quit => Ok(()),
        }
    }
}
