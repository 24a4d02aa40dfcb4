use std::time::Instant;

use crate::direction::Direction;
use crate::Floor;

/// A call for service at `floor`. Hall calls carry the direction the
/// passenger wants to travel, in-cab presses carry `Direction::Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: Floor,
    pub direction: Direction,
    pub created_at: Instant,
}

impl Request {
    pub fn new(floor: Floor, direction: Direction) -> Self {
        Request {
            floor: floor,
            direction: direction,
            created_at: Instant::now(),
        }
    }
}
