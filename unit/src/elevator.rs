/// ----- UNIT STATE MACHINE -----
/// One elevator car: its position, direction of travel and the two scan
/// queues it serves. `step` advances the car by at most one floor and is the
/// only place the motion states change.

use std::cmp::Ordering;

use log::{debug, info};

use shared_resources::direction::Direction;
use shared_resources::error::DispatchError;
use shared_resources::service_queue::ServiceQueue;
use shared_resources::unit_status::{OperatingState, UnitStatus};
use shared_resources::{Floor, UnitId};

pub const GROUND_FLOOR: Floor = 1;

/// Outcome of a single `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Nothing queued, the unit rests.
    Idle,
    /// Moved one floor, target not reached yet.
    Moved(Floor),
    /// Stopped at a queued floor and served it.
    Arrived(Floor),
    /// In maintenance, did not act.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    current_floor: Floor,
    direction: Direction,
    state: OperatingState,
    capacity: u32,
    current_load: u32,
    total_floors: Floor,
    up_queue: ServiceQueue,
    down_queue: ServiceQueue,
}

impl Unit {
    pub fn new(id: UnitId, capacity: u32, total_floors: Floor) -> Self {
        Unit {
            id: id,
            current_floor: GROUND_FLOOR,
            direction: Direction::Idle,
            state: OperatingState::Idle,
            capacity: capacity,
            current_load: 0,
            total_floors: total_floors,
            up_queue: ServiceQueue::ascending(),
            down_queue: ServiceQueue::descending(),
        }
    }

    /// Places the unit at `floor`, clamped into the building.
    pub fn with_floor(mut self, floor: Floor) -> Self {
        self.current_floor = floor.clamp(GROUND_FLOOR, self.total_floors.max(GROUND_FLOOR));
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> OperatingState {
        self.state
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn load(&self) -> u32 {
        self.current_load
    }

    pub fn up_queue(&self) -> &ServiceQueue {
        &self.up_queue
    }

    pub fn down_queue(&self) -> &ServiceQueue {
        &self.down_queue
    }

    pub fn in_maintenance(&self) -> bool {
        self.state == OperatingState::Maintenance
    }

    pub fn valid_floor(&self, floor: Floor) -> bool {
        (GROUND_FLOOR..=self.total_floors).contains(&floor)
    }

    /// Queues `floor`. Floors above the car go to the up queue and floors
    /// below to the down queue whatever `direction` says, so neither queue
    /// ever holds a floor on the wrong side of the car. `direction` only
    /// decides where a call at the current floor goes.
    pub fn add_request(&mut self, floor: Floor, direction: Direction) -> Result<(), DispatchError> {
        if !self.valid_floor(floor) {
            return Err(DispatchError::InvalidFloor {
                floor: floor,
                total_floors: self.total_floors,
            });
        }
        if self.in_maintenance() {
            return Err(DispatchError::UnitInMaintenance(self.id));
        }

        let use_up_queue = match floor.cmp(&self.current_floor) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match direction {
                Direction::Up => true,
                Direction::Down => false,
                Direction::Idle => self.direction != Direction::Down,
            },
        };
        let queue = if use_up_queue { &mut self.up_queue } else { &mut self.down_queue };
        if queue.insert(floor) {
            debug!(
                "unit {} queued floor {} ({})",
                self.id,
                floor,
                if use_up_queue { "up" } else { "down" }
            );
        }
        Ok(())
    }

    pub fn has_requests(&self) -> bool {
        !self.up_queue.is_empty() || !self.down_queue.is_empty()
    }

    pub fn next_floor(&self) -> Floor {
        let (first, second) = match self.direction {
            Direction::Down => (&self.down_queue, &self.up_queue),
            Direction::Up | Direction::Idle => (&self.up_queue, &self.down_queue),
        };
        first.head().or_else(|| second.head()).unwrap_or(self.current_floor)
    }

    pub fn step(&mut self) -> Motion {
        if self.in_maintenance() {
            return Motion::Skipped;
        }
        if !self.has_requests() {
            self.direction = Direction::Idle;
            self.state = OperatingState::Stopped;
            return Motion::Idle;
        }

        let target = self.next_floor();
        if target == self.current_floor {
            return self.arrive();
        }

        self.state = OperatingState::Moving;
        self.direction = Direction::towards(self.current_floor, target);
        match self.direction {
            Direction::Up => self.current_floor += 1,
            Direction::Down => self.current_floor -= 1,
            Direction::Idle => (),
        }

        if self.current_floor == target {
            self.arrive()
        } else {
            debug!("unit {} passing floor {} towards {}", self.id, self.current_floor, target);
            Motion::Moved(self.current_floor)
        }
    }

    fn arrive(&mut self) -> Motion {
        self.state = OperatingState::Stopped;
        self.up_queue.remove(self.current_floor);
        self.down_queue.remove(self.current_floor);
        info!("Unit {} reached floor {}", self.id, self.current_floor);
        Motion::Arrived(self.current_floor)
    }

    /// Entering maintenance drops every queued floor and returns them.
    pub fn set_maintenance(&mut self, on: bool) -> Vec<Floor> {
        if on == self.in_maintenance() {
            return Vec::new();
        }
        if on {
            self.state = OperatingState::Maintenance;
            self.direction = Direction::Idle;
            let mut drained = self.up_queue.clear();
            drained.extend(self.down_queue.clear());
            info!("Unit {} entered maintenance, dropped {} stop(s)", self.id, drained.len());
            drained
        } else {
            self.state = OperatingState::Stopped;
            info!("Unit {} back in service at floor {}", self.id, self.current_floor);
            Vec::new()
        }
    }

    pub fn set_load(&mut self, load: u32) -> Result<(), DispatchError> {
        if load > self.capacity {
            return Err(DispatchError::OverCapacity {
                load: load,
                capacity: self.capacity,
            });
        }
        self.current_load = load;
        Ok(())
    }

    pub fn status(&self) -> UnitStatus {
        UnitStatus {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            state: self.state,
            load: self.current_load,
            capacity: self.capacity,
            up_queue: self.up_queue.to_vec(),
            down_queue: self.down_queue.to_vec(),
        }
    }
}
