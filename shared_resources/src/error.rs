use thiserror::Error;

use crate::{Floor, UnitId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("floor {floor} is outside the building (1..={total_floors})")]
    InvalidFloor { floor: Floor, total_floors: Floor },

    #[error("no unit with id {unit_id} ({num_units} units installed)")]
    InvalidUnitId { unit_id: UnitId, num_units: usize },

    #[error("every unit is in maintenance")]
    NoAvailableUnit,

    #[error("unit {0} is in maintenance")]
    UnitInMaintenance(UnitId),

    #[error("load {load} exceeds capacity {capacity}")]
    OverCapacity { load: u32, capacity: u32 },

    #[error("unit {0} stopped responding")]
    UnitUnavailable(UnitId),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
