/// ----- DISPATCH COST -----
/// This stateless module ranks units for an external call. It takes unit
/// snapshots and a request and returns which unit should serve it.

use shared_resources::direction::Direction;
use shared_resources::request::Request;
use shared_resources::unit_status::UnitStatus;
use shared_resources::UnitId;

pub const DIRECTION_PENALTY: u32 = 10;
pub const LOAD_WEIGHT: u32 = 2;

pub fn dispatch_cost(unit: &UnitStatus, request: &Request) -> u32 {
    let distance = (unit.current_floor as i32 - request.floor as i32).unsigned_abs();
    let direction_penalty = if unit.direction != Direction::Idle && unit.direction != request.direction {
        DIRECTION_PENALTY
    } else {
        0
    };
    let load_penalty = unit.load.saturating_mul(LOAD_WEIGHT);
    distance + direction_penalty + load_penalty
}

/// Cheapest unit not in maintenance. `units` must be in id order; the first
/// of several equally cheap units wins.
pub fn select_unit(units: &[UnitStatus], request: &Request) -> Option<UnitId> {
    units
        .iter()
        .filter(|unit| !unit.in_maintenance())
        .min_by_key(|unit| dispatch_cost(unit, request))
        .map(|unit| unit.id)
}
