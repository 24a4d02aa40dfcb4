/// ----- DISPATCHER -----
/// Owns every unit and the log of external calls. External calls are ranked
/// with the cost function and handed to the cheapest unit, in-cab presses go
/// straight to their unit.
///
/// The request log has its own lock. It is never held while waiting on a
/// unit, so a slow unit can not block a tick. Assignment decisions are
/// serialised by `dispatching` instead: a call is only ever handed out by
/// one thread, and no unit changes maintenance mode in the middle of it.

use std::io;

use log::{debug, info, warn};
use parking_lot::Mutex;

use shared_resources::config::BuildingConfig;
use shared_resources::direction::Direction;
use shared_resources::error::DispatchError;
use shared_resources::request::Request;
use shared_resources::unit_status::{SystemStatus, UnitStatus};
use shared_resources::{Floor, UnitId};
use unit::{Unit, UnitHandle};

use crate::cost;
use crate::request_log::ExternalRequestLog;

pub struct Dispatcher {
    units: Vec<UnitHandle>,
    total_floors: Floor,
    log: Mutex<ExternalRequestLog>,
    dispatching: Mutex<()>,
}

impl Dispatcher {
    pub fn new(config: &BuildingConfig) -> io::Result<Self> {
        let mut units = Vec::with_capacity(config.num_units);
        for id in 0..config.num_units {
            units.push(UnitHandle::spawn(Unit::new(id, config.unit_capacity, config.total_floors))?);
        }
        info!(
            "dispatcher started with {} unit(s) over {} floor(s)",
            config.num_units, config.total_floors
        );
        Ok(Dispatcher {
            units: units,
            total_floors: config.total_floors,
            log: Mutex::new(ExternalRequestLog::new()),
            dispatching: Mutex::new(()),
        })
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    pub fn total_floors(&self) -> Floor {
        self.total_floors
    }

    pub(crate) fn units(&self) -> &[UnitHandle] {
        &self.units
    }

    fn unit(&self, unit_id: UnitId) -> Result<&UnitHandle, DispatchError> {
        self.units.get(unit_id).ok_or(DispatchError::InvalidUnitId {
            unit_id: unit_id,
            num_units: self.units.len(),
        })
    }

    fn check_floor(&self, floor: Floor) -> Result<(), DispatchError> {
        if floor < 1 || floor > self.total_floors {
            return Err(DispatchError::InvalidFloor {
                floor: floor,
                total_floors: self.total_floors,
            });
        }
        Ok(())
    }

    /// Logs an external call and assigns it to the cheapest unit in service.
    /// With every unit in maintenance the call waits in the log and is
    /// handed out once a unit returns to service.
    pub fn request_elevator(&self, floor: Floor, direction: Direction) -> Result<UnitId, DispatchError> {
        self.check_floor(floor)?;
        let request = Request::new(floor, direction);
        let _dispatching = self.dispatching.lock();
        let index = self.log.lock().append(request);
        self.assign(index, request)
    }

    /// Caller must hold `dispatching`.
    fn assign(&self, index: usize, request: Request) -> Result<UnitId, DispatchError> {
        let mut candidates = self.snapshot();
        while let Some(winner) = cost::select_unit(&candidates, &request) {
            // mark first, so an arrival racing with the insert still finds it
            self.log.lock().assign(index, winner);
            match self.units[winner].add_request(request.floor, request.direction) {
                Ok(()) => {
                    info!(
                        "Assigned request (Floor: {}, Direction: {}) to unit {}",
                        request.floor, request.direction, winner
                    );
                    return Ok(winner);
                },
                Err(DispatchError::UnitInMaintenance(_)) | Err(DispatchError::UnitUnavailable(_)) => {
                    self.log.lock().unassign(index);
                    candidates.retain(|unit| unit.id != winner);
                },
                Err(e) => {
                    self.log.lock().unassign(index);
                    return Err(e);
                },
            }
        }
        warn!("no unit available for floor {} ({})", request.floor, request.direction);
        Err(DispatchError::NoAvailableUnit)
    }

    fn snapshot(&self) -> Vec<UnitStatus> {
        let mut statuses = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            match unit.status() {
                Ok(status) => statuses.push(status),
                Err(e) => warn!("{}", e),
            }
        }
        statuses
    }

    /// In-cab button press. Skips cost evaluation entirely.
    pub fn process_internal_request(&self, unit_id: UnitId, floor: Floor) -> Result<(), DispatchError> {
        self.unit(unit_id)?.add_request(floor, Direction::Idle)?;
        info!("Internal request added: unit {} to floor {}", unit_id, floor);
        Ok(())
    }

    pub fn get_status(&self, unit_id: UnitId) -> Result<UnitStatus, DispatchError> {
        self.unit(unit_id)?.status()
    }

    pub fn display_status(&self) -> SystemStatus {
        SystemStatus {
            units: self.snapshot(),
            pending_external: self.pending_external(),
        }
    }

    /// Taking a unit out of service hands its open external calls to the
    /// remaining units. Cab stops it held are dropped. Bringing a unit back
    /// hands out every call that found no unit while it was away.
    pub fn set_maintenance(&self, unit_id: UnitId, on: bool) -> Result<(), DispatchError> {
        let unit = self.unit(unit_id)?;
        let _dispatching = self.dispatching.lock();
        let dropped = unit.set_maintenance(on)?;

        let orphaned = if on {
            debug!("unit {} dropped stops {:?}", unit_id, dropped);
            self.log.lock().release(unit_id)
        } else {
            self.log.lock().unassigned()
        };
        for (index, request) in orphaned {
            match self.assign(index, request) {
                Ok(winner) => info!("re-dispatched floor {} ({}) to unit {}", request.floor, request.direction, winner),
                Err(e) => warn!("could not re-dispatch floor {} ({}): {}", request.floor, request.direction, e),
            }
        }
        Ok(())
    }

    pub fn set_load(&self, unit_id: UnitId, load: u32) -> Result<(), DispatchError> {
        self.unit(unit_id)?.set_load(load)
    }

    pub fn pending_external(&self) -> usize {
        self.log.lock().pending()
    }

    /// External calls still waiting for a unit.
    pub fn waiting_external(&self) -> usize {
        self.log.lock().waiting()
    }

    pub fn record_arrival(&self, unit_id: UnitId, floor: Floor) {
        let served = self.log.lock().mark_served(unit_id, floor);
        if served > 0 {
            debug!("unit {} served {} external call(s) at floor {}", unit_id, served, floor);
        }
    }

    pub fn request_log(&self) -> ExternalRequestLog {
        self.log.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_log::Assignment;

    fn dispatcher(num_units: usize) -> Dispatcher {
        Dispatcher::new(&BuildingConfig {
            num_units: num_units,
            total_floors: 10,
            unit_capacity: 8,
        })
        .unwrap()
    }

    #[test]
    fn invalid_floor_is_not_logged() {
        let dispatcher = dispatcher(2);
        assert_eq!(
            dispatcher.request_elevator(11, Direction::Up),
            Err(DispatchError::InvalidFloor { floor: 11, total_floors: 10 })
        );
        assert!(dispatcher.request_log().is_empty());
    }

    #[test]
    fn loaded_unit_loses_tie() {
        let dispatcher = dispatcher(2);
        dispatcher.set_load(0, 3).unwrap();
        assert_eq!(dispatcher.request_elevator(4, Direction::Up), Ok(1));
        assert_eq!(dispatcher.get_status(1).unwrap().up_queue, vec![4]);
    }

    #[test]
    fn all_units_in_maintenance_leaves_call_unassigned() {
        let dispatcher = dispatcher(2);
        dispatcher.set_maintenance(0, true).unwrap();
        dispatcher.set_maintenance(1, true).unwrap();
        assert_eq!(
            dispatcher.request_elevator(3, Direction::Down),
            Err(DispatchError::NoAvailableUnit)
        );
        let log = dispatcher.request_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].assignment, Assignment::Unassigned);
        assert_eq!(dispatcher.pending_external(), 0);
        assert_eq!(dispatcher.waiting_external(), 1);
        assert!(dispatcher.is_quiescent());
    }

    #[test]
    fn waiting_call_is_served_once_a_unit_returns() {
        let dispatcher = dispatcher(1);
        dispatcher.set_maintenance(0, true).unwrap();
        assert_eq!(
            dispatcher.request_elevator(6, Direction::Up),
            Err(DispatchError::NoAvailableUnit)
        );

        dispatcher.set_maintenance(0, false).unwrap();
        assert_eq!(dispatcher.request_log().entries()[0].assignment, Assignment::Assigned(0));
        assert_eq!(dispatcher.waiting_external(), 0);
        assert!(!dispatcher.is_quiescent());

        assert_eq!(dispatcher.run_until_quiescent(), 5);
        assert_eq!(dispatcher.get_status(0).unwrap().current_floor, 6);
        assert_eq!(dispatcher.request_log().entries()[0].assignment, Assignment::Served(0));
    }

    #[test]
    fn released_call_waits_when_last_unit_leaves_service() {
        let dispatcher = dispatcher(2);
        assert_eq!(dispatcher.request_elevator(8, Direction::Down), Ok(0));
        dispatcher.set_maintenance(1, true).unwrap();
        dispatcher.set_maintenance(0, true).unwrap();
        assert_eq!(dispatcher.request_log().entries()[0].assignment, Assignment::Unassigned);

        dispatcher.set_maintenance(1, false).unwrap();
        assert_eq!(dispatcher.request_log().entries()[0].assignment, Assignment::Assigned(1));
        assert_eq!(dispatcher.get_status(1).unwrap().up_queue, vec![8]);
    }

    #[test]
    fn concurrent_maintenance_never_queues_a_call_twice() {
        let dispatcher = dispatcher(2);
        std::thread::scope(|scope| {
            scope.spawn(|| {
                for round in 0..50 {
                    dispatcher.set_maintenance(0, round % 2 == 0).unwrap();
                }
            });
            scope.spawn(|| {
                for floor in 2..=10 {
                    dispatcher.request_elevator(floor, Direction::Up).unwrap();
                }
            });
        });
        dispatcher.set_maintenance(0, false).unwrap();

        let log = dispatcher.request_log();
        assert_eq!(log.len(), 9);
        for entry in log.entries() {
            let Assignment::Assigned(owner) = entry.assignment else {
                panic!("floor {} is {:?}", entry.request.floor, entry.assignment);
            };
            for unit_id in 0..2 {
                let queued = dispatcher.get_status(unit_id).unwrap().up_queue.contains(&entry.request.floor);
                assert_eq!(queued, unit_id == owner, "floor {} on unit {}", entry.request.floor, unit_id);
            }
        }
    }

    #[test]
    fn maintenance_hands_open_calls_to_other_units() {
        let dispatcher = dispatcher(2);
        assert_eq!(dispatcher.request_elevator(6, Direction::Up), Ok(0));
        dispatcher.set_maintenance(0, true).unwrap();

        let log = dispatcher.request_log();
        assert_eq!(log.entries()[0].assignment, Assignment::Assigned(1));
        assert!(!dispatcher.get_status(0).unwrap().has_requests());
        assert_eq!(dispatcher.get_status(1).unwrap().up_queue, vec![6]);
    }

    #[test]
    fn internal_request_to_unit_in_maintenance_fails() {
        let dispatcher = dispatcher(1);
        dispatcher.set_maintenance(0, true).unwrap();
        assert_eq!(
            dispatcher.process_internal_request(0, 4),
            Err(DispatchError::UnitInMaintenance(0))
        );
        dispatcher.set_maintenance(0, false).unwrap();
        assert_eq!(dispatcher.process_internal_request(0, 4), Ok(()));
    }

    #[test]
    fn over_capacity_load_is_rejected() {
        let dispatcher = dispatcher(1);
        assert_eq!(
            dispatcher.set_load(0, 9),
            Err(DispatchError::OverCapacity { load: 9, capacity: 8 })
        );
        assert_eq!(
            dispatcher.set_load(3, 1),
            Err(DispatchError::InvalidUnitId { unit_id: 3, num_units: 1 })
        );
    }
}
