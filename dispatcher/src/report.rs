use std::io;

use log::info;

use shared_resources::unit_status::SystemStatus;

/// Receives a read-only snapshot of the whole system after every tick.
pub trait StatusSink {
    fn report(&mut self, status: &SystemStatus) -> io::Result<()>;
}

/// Writes the snapshot through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn report(&mut self, status: &SystemStatus) -> io::Result<()> {
        info!("--- Elevator System Status ---");
        for unit in &status.units {
            info!("{}", unit);
        }
        info!("Pending External Requests: {}", status.pending_external);
        Ok(())
    }
}

/// Keeps every snapshot.
impl StatusSink for Vec<SystemStatus> {
    fn report(&mut self, status: &SystemStatus) -> io::Result<()> {
        self.push(status.clone());
        Ok(())
    }
}
