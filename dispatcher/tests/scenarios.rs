use dispatcher::console::ConsoleCommand;
use dispatcher::request_log::Assignment;
use dispatcher::Dispatcher;
use shared_resources::config::BuildingConfig;
use shared_resources::direction::Direction;
use shared_resources::error::DispatchError;
use shared_resources::unit_status::OperatingState;
use unit::Motion;

fn building(num_units: usize) -> Dispatcher {
    Dispatcher::new(&BuildingConfig {
        num_units: num_units,
        total_floors: 10,
        unit_capacity: 8,
    })
    .unwrap()
}

#[test]
fn equal_cost_call_goes_to_first_unit() {
    let dispatcher = building(3);
    assert_eq!(dispatcher.request_elevator(5, Direction::Up), Ok(0));
    assert_eq!(dispatcher.get_status(0).unwrap().up_queue, vec![5]);
    assert!(!dispatcher.get_status(1).unwrap().has_requests());
    assert!(!dispatcher.get_status(2).unwrap().has_requests());
    assert_eq!(dispatcher.pending_external(), 1);
}

#[test]
fn unit_sweeps_down_one_floor_per_tick() {
    let dispatcher = building(1);
    dispatcher.process_internal_request(0, 10).unwrap();
    dispatcher.run_until_quiescent();
    assert_eq!(dispatcher.get_status(0).unwrap().current_floor, 10);

    dispatcher.process_internal_request(0, 7).unwrap();
    dispatcher.process_internal_request(0, 3).unwrap();
    assert_eq!(dispatcher.get_status(0).unwrap().down_queue, vec![7, 3]);

    assert_eq!(dispatcher.tick(), vec![(0, Motion::Moved(9))]);
    assert_eq!(dispatcher.get_status(0).unwrap().state, OperatingState::Moving);
    assert_eq!(dispatcher.tick(), vec![(0, Motion::Moved(8))]);
    assert_eq!(dispatcher.tick(), vec![(0, Motion::Arrived(7))]);

    let status = dispatcher.get_status(0).unwrap();
    assert_eq!(status.current_floor, 7);
    assert_eq!(status.state, OperatingState::Stopped);
    assert_eq!(status.direction, Direction::Down);
    assert_eq!(status.down_queue, vec![3]);
}

#[test]
fn unknown_unit_leaves_every_queue_alone() {
    let dispatcher = building(3);
    let before = dispatcher.display_status();
    assert_eq!(
        dispatcher.process_internal_request(99, 5),
        Err(DispatchError::InvalidUnitId { unit_id: 99, num_units: 3 })
    );
    assert_eq!(dispatcher.display_status(), before);
}

#[test]
fn mixed_workload_reaches_quiescence() {
    let dispatcher = building(3);
    dispatcher.request_elevator(5, Direction::Up).unwrap();
    dispatcher.request_elevator(9, Direction::Down).unwrap();
    dispatcher.request_elevator(2, Direction::Up).unwrap();
    dispatcher.process_internal_request(1, 8).unwrap();
    dispatcher.process_internal_request(2, 4).unwrap();
    dispatcher.process_internal_request(0, 1).unwrap();

    let ticks = dispatcher.run_until_quiescent();
    // nobody has to travel further than the height of the building twice
    assert!(ticks <= 2 * 10 + 1, "took {} ticks", ticks);
    assert_eq!(dispatcher.pending_external(), 0);
    assert!(dispatcher.is_quiescent());
    for status in dispatcher.display_status().units {
        assert!(!status.has_requests());
    }
    assert!(dispatcher
        .request_log()
        .entries()
        .iter()
        .all(|entry| matches!(entry.assignment, Assignment::Served(_))));
}

#[test]
fn repeated_call_is_queued_once() {
    let dispatcher = building(1);
    dispatcher.request_elevator(6, Direction::Up).unwrap();
    dispatcher.request_elevator(6, Direction::Up).unwrap();
    dispatcher.process_internal_request(0, 6).unwrap();
    assert_eq!(dispatcher.get_status(0).unwrap().up_queue, vec![6]);

    dispatcher.run_until_quiescent();
    assert_eq!(dispatcher.pending_external(), 0);
    assert_eq!(dispatcher.request_log().len(), 2);
}

#[test]
fn scan_finishes_upward_sweep_before_reversing() {
    let dispatcher = building(1);
    dispatcher.process_internal_request(0, 5).unwrap();
    dispatcher.run_until_quiescent();

    dispatcher.process_internal_request(0, 7).unwrap();
    dispatcher.process_internal_request(0, 3).unwrap();
    dispatcher.process_internal_request(0, 9).unwrap();

    let mut stops = Vec::new();
    while !dispatcher.is_quiescent() {
        for (_, motion) in dispatcher.tick() {
            if let Motion::Arrived(floor) = motion {
                stops.push(floor);
            }
        }
    }
    assert_eq!(stops, vec![7, 9, 3]);
}

#[test]
fn maintenance_moves_open_calls_and_blocks_new_ones() {
    let dispatcher = building(2);
    assert_eq!(dispatcher.request_elevator(4, Direction::Up), Ok(0));
    dispatcher.set_maintenance(0, true).unwrap();

    assert_eq!(dispatcher.get_status(0).unwrap().state, OperatingState::Maintenance);
    assert_eq!(dispatcher.get_status(1).unwrap().up_queue, vec![4]);
    assert_eq!(dispatcher.request_elevator(2, Direction::Down), Ok(1));
    assert_eq!(
        dispatcher.process_internal_request(0, 3),
        Err(DispatchError::UnitInMaintenance(0))
    );

    dispatcher.run_until_quiescent();
    assert_eq!(dispatcher.get_status(0).unwrap().current_floor, 1);
    assert_eq!(dispatcher.pending_external(), 0);

    dispatcher.set_maintenance(0, false).unwrap();
    assert_eq!(dispatcher.get_status(0).unwrap().state, OperatingState::Stopped);
}

#[test]
fn console_script_drives_the_building() {
    let dispatcher = building(2);
    let script = "call 6 down\n\
                  cab 1 3\n\
                  # unit 0 is full\n\
                  load 0 8\n\
                  call 2 up\n";
    for line in script.lines() {
        if let Some(command) = ConsoleCommand::parse(line).unwrap() {
            command.execute(&dispatcher).unwrap();
        }
    }
    assert_eq!(dispatcher.get_status(0).unwrap().down_queue, Vec::<u8>::new());
    assert_eq!(dispatcher.get_status(0).unwrap().up_queue, vec![6]);
    assert_eq!(dispatcher.get_status(1).unwrap().up_queue, vec![2, 3]);

    assert_eq!(
        ConsoleCommand::parse("cab 5 3").unwrap().unwrap().execute(&dispatcher),
        Err(DispatchError::InvalidUnitId { unit_id: 5, num_units: 2 })
    );
}
