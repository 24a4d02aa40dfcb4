use std::io::{self, stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand};

use shared_resources::unit_status::SystemStatus;

use crate::report::StatusSink;

const BORDER: &str = "+------------+------------+------------+-------------+------------+------------------+------------------+";

/// Redraws a status table in place on every report.
pub struct TerminalSink {
    stdout: Stdout,
    lines_drawn: u16,
}

impl TerminalSink {
    pub fn new() -> Self {
        TerminalSink {
            stdout: stdout(),
            lines_drawn: 0,
        }
    }

    pub fn printstatus(&mut self, status: &SystemStatus) -> io::Result<()> {
        if self.lines_drawn > 0 {
            self.stdout.execute(cursor::MoveUp(self.lines_drawn))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let mut lines: u16 = 0;
        writeln!(self.stdout, "{}", BORDER)?;
        writeln!(self.stdout, "| {0:<101} |", "ELEVATOR UNITS")?;
        writeln!(self.stdout, "{}", BORDER)?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<11} | {4:<10} | {5:<16} | {6:<16} |",
            "UNIT", "FLOOR", "DIRECTION", "STATE", "LOAD", "UP QUEUE", "DOWN QUEUE")?;
        writeln!(self.stdout, "{}", BORDER)?;
        lines += 5;
        for unit in &status.units {
            writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<11} | {4:<10} | {5:<16} | {6:<16} |",
                unit.id,
                unit.current_floor,
                unit.direction.as_string(),
                unit.state.as_string(),
                format!("{}/{}", unit.load, unit.capacity),
                format!("{:?}", unit.up_queue),
                format!("{:?}", unit.down_queue))?;
            writeln!(self.stdout, "{}", BORDER)?;
            lines += 2;
        }
        writeln!(self.stdout, "| {0:<101} |", format!("PENDING EXTERNAL REQUESTS: {}", status.pending_external))?;
        writeln!(self.stdout, "{}", BORDER)?;
        lines += 2;

        self.stdout.flush()?;
        self.lines_drawn = lines;
        Ok(())
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        TerminalSink::new()
    }
}

impl StatusSink for TerminalSink {
    fn report(&mut self, status: &SystemStatus) -> io::Result<()> {
        self.printstatus(status)
    }
}
