/// ----- UNIT ACTOR -----
/// Every unit runs on its own thread and owns its `Unit` exclusively.
/// Other parts of the system talk to it through `UnitHandle`, which sends a
/// command and waits for the reply on a dedicated channel. A unit never
/// sees another unit.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, warn};

use shared_resources::direction::Direction;
use shared_resources::error::DispatchError;
use shared_resources::unit_status::UnitStatus;
use shared_resources::{Floor, UnitId};

use crate::elevator::{Motion, Unit};

pub enum UnitCommand {
    AddRequest {
        floor: Floor,
        direction: Direction,
        reply: Sender<Result<(), DispatchError>>,
    },
    Step {
        reply: Sender<Motion>,
    },
    Status {
        reply: Sender<UnitStatus>,
    },
    SetMaintenance {
        on: bool,
        reply: Sender<Vec<Floor>>,
    },
    SetLoad {
        load: u32,
        reply: Sender<Result<(), DispatchError>>,
    },
    Shutdown,
}

pub struct UnitHandle {
    id: UnitId,
    command_tx: Sender<UnitCommand>,
    thread: Option<JoinHandle<()>>,
}

impl UnitHandle {
    pub fn spawn(unit: Unit) -> io::Result<Self> {
        let id = unit.id();
        let (command_tx, command_rx) = unbounded::<UnitCommand>();
        let thread = thread::Builder::new()
            .name(format!("unit-{}", id))
            .spawn(move || main(unit, command_rx))?;
        Ok(UnitHandle {
            id: id,
            command_tx: command_tx,
            thread: Some(thread),
        })
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    fn send(&self, command: UnitCommand) -> Result<(), DispatchError> {
        self.command_tx
            .send(command)
            .map_err(|_| DispatchError::UnitUnavailable(self.id))
    }

    fn call<T>(&self, command: impl FnOnce(Sender<T>) -> UnitCommand) -> Result<T, DispatchError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(command(reply_tx))?;
        reply_rx.recv().map_err(|_| DispatchError::UnitUnavailable(self.id))
    }

    pub fn add_request(&self, floor: Floor, direction: Direction) -> Result<(), DispatchError> {
        self.call(|reply| UnitCommand::AddRequest {
            floor: floor,
            direction: direction,
            reply: reply,
        })?
    }

    /// Starts a step without waiting for it, so a tick can set every unit
    /// moving before collecting the results.
    pub fn begin_step(&self) -> Result<Receiver<Motion>, DispatchError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(UnitCommand::Step { reply: reply_tx })?;
        Ok(reply_rx)
    }

    pub fn step(&self) -> Result<Motion, DispatchError> {
        self.begin_step()?
            .recv()
            .map_err(|_| DispatchError::UnitUnavailable(self.id))
    }

    pub fn status(&self) -> Result<UnitStatus, DispatchError> {
        self.call(|reply| UnitCommand::Status { reply: reply })
    }

    pub fn set_maintenance(&self, on: bool) -> Result<Vec<Floor>, DispatchError> {
        self.call(|reply| UnitCommand::SetMaintenance { on: on, reply: reply })
    }

    pub fn set_load(&self, load: u32) -> Result<(), DispatchError> {
        self.call(|reply| UnitCommand::SetLoad { load: load, reply: reply })?
    }
}

impl Drop for UnitHandle {
    fn drop(&mut self) {
        self.command_tx.send(UnitCommand::Shutdown).ok();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("unit {} thread panicked", self.id);
            }
        }
    }
}

fn main(mut unit: Unit, command_rx: Receiver<UnitCommand>) {
    debug!("unit {} started at floor {}", unit.id(), unit.current_floor());
    for command in command_rx.iter() {
        // a dropped reply receiver means the caller gave up, nothing to do
        match command {
            UnitCommand::AddRequest { floor, direction, reply } => {
                reply.send(unit.add_request(floor, direction)).ok();
            },
            UnitCommand::Step { reply } => {
                reply.send(unit.step()).ok();
            },
            UnitCommand::Status { reply } => {
                reply.send(unit.status()).ok();
            },
            UnitCommand::SetMaintenance { on, reply } => {
                reply.send(unit.set_maintenance(on)).ok();
            },
            UnitCommand::SetLoad { load, reply } => {
                reply.send(unit.set_load(load)).ok();
            },
            UnitCommand::Shutdown => break,
        }
    }
    debug!("unit {} stopped", unit.id());
}
