use std::fmt;

use crate::direction::Direction;
use crate::{Floor, UnitId};

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum OperatingState {
    Idle,
    Moving,
    Stopped,
    Maintenance,
}

impl OperatingState {
    pub fn as_string(&self) -> String {
        match self {
            OperatingState::Idle => String::from("IDLE"),
            OperatingState::Moving => String::from("MOVING"),
            OperatingState::Stopped => String::from("STOPPED"),
            OperatingState::Maintenance => String::from("MAINTENANCE"),
        }
    }
}

impl fmt::Display for OperatingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Read-only snapshot of one unit, taken under that unit's ownership and
/// handed out by value.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnitStatus {
    pub id: UnitId,
    pub current_floor: Floor,
    pub direction: Direction,
    pub state: OperatingState,
    pub load: u32,
    pub capacity: u32,
    pub up_queue: Vec<Floor>,
    pub down_queue: Vec<Floor>,
}

impl UnitStatus {
    pub fn has_requests(&self) -> bool {
        !self.up_queue.is_empty() || !self.down_queue.is_empty()
    }

    pub fn in_maintenance(&self) -> bool {
        self.state == OperatingState::Maintenance
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit {}: Floor {}, Direction: {}, State: {}, Load: {}/{}",
            self.id, self.current_floor, self.direction, self.state, self.load, self.capacity
        )
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub units: Vec<UnitStatus>,
    pub pending_external: usize,
}
