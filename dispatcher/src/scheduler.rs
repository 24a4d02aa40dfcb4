/// ----- SCHEDULER -----
/// Drives every unit one step per tick. A tick first tells all units to
/// step and only then collects the results, so the units move concurrently
/// on their own threads. Units in maintenance report `Skipped` and a unit
/// that does not answer is left out of the tick; neither stops the others.

use std::time::Duration;

use crossbeam_channel::{select, tick, Receiver};
use log::{debug, info, warn};

use shared_resources::error::DispatchError;
use shared_resources::UnitId;
use unit::Motion;

use crate::dispatcher::Dispatcher;
use crate::report::StatusSink;

impl Dispatcher {
    pub fn tick(&self) -> Vec<(UnitId, Motion)> {
        let in_flight: Vec<_> = self
            .units()
            .iter()
            .map(|unit| (unit.id(), unit.begin_step()))
            .collect();

        let mut motions = Vec::with_capacity(in_flight.len());
        for (id, reply) in in_flight {
            let motion = reply.and_then(|rx| rx.recv().map_err(|_| DispatchError::UnitUnavailable(id)));
            match motion {
                Ok(motion) => {
                    if let Motion::Arrived(floor) = motion {
                        self.record_arrival(id, floor);
                    }
                    motions.push((id, motion));
                },
                Err(e) => warn!("skipping unit {} this tick: {}", id, e),
            }
        }
        debug!("tick: {:?}", motions);
        motions
    }

    /// Nothing queued on any unit and no external call left open. Calls
    /// waiting for a unit only count while some unit is in service, as
    /// otherwise no tick could ever serve them.
    pub fn is_quiescent(&self) -> bool {
        let statuses: Vec<_> = self.units().iter().filter_map(|unit| unit.status().ok()).collect();
        let in_service = statuses.iter().any(|status| !status.in_maintenance());
        self.pending_external() == 0
            && (self.waiting_external() == 0 || !in_service)
            && statuses.iter().all(|status| !status.has_requests())
    }

    /// Ticks as fast as possible until nothing is left to serve. Returns the
    /// number of ticks taken.
    pub fn run_until_quiescent(&self) -> u64 {
        let mut ticks = 0;
        while !self.is_quiescent() {
            self.tick();
            ticks += 1;
        }
        info!("All units are idle after {} tick(s). System ready for new requests.", ticks);
        ticks
    }
}

/// Long-running service loop: one tick every `period` until `stop_rx`
/// fires or disconnects. The stop signal is only looked at between ticks.
pub fn run(
    dispatcher: &Dispatcher,
    period: Duration,
    stop_rx: &Receiver<()>,
    sink: &mut dyn StatusSink,
) -> u64 {
    let timer = tick(period);
    let mut ticks: u64 = 0;
    info!("Starting scheduler, one tick every {:?}", period);

    loop {
        select! {
            recv(stop_rx) -> _ => {
                info!("Scheduler stopped after {} tick(s)", ticks);
                return ticks
            },
            recv(timer) -> _ => {
                dispatcher.tick();
                ticks += 1;
                if let Err(e) = sink.report(&dispatcher.display_status()) {
                    warn!("could not report status: {}", e);
                }
            },
        }
    }
}
