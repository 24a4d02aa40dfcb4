use shared_resources::request::Request;
use shared_resources::{Floor, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Unassigned,
    Assigned(UnitId),
    Served(UnitId),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub request: Request,
    pub assignment: Assignment,
}

/// Append-only record of every external call. Entries are never removed,
/// only their assignment moves along as units pick them up and serve them.
#[derive(Debug, Clone, Default)]
pub struct ExternalRequestLog {
    entries: Vec<LogEntry>,
}

impl ExternalRequestLog {
    pub fn new() -> Self {
        ExternalRequestLog { entries: Vec::new() }
    }

    pub fn append(&mut self, request: Request) -> usize {
        self.entries.push(LogEntry {
            request: request,
            assignment: Assignment::Unassigned,
        });
        self.entries.len() - 1
    }

    pub fn assign(&mut self, index: usize, unit_id: UnitId) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.assignment = Assignment::Assigned(unit_id);
        }
    }

    pub fn unassign(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.assignment = Assignment::Unassigned;
        }
    }

    /// Marks every call `unit_id` holds at `floor` as served.
    pub fn mark_served(&mut self, unit_id: UnitId, floor: Floor) -> usize {
        let mut served = 0;
        for entry in self.entries.iter_mut() {
            if entry.assignment == Assignment::Assigned(unit_id) && entry.request.floor == floor {
                entry.assignment = Assignment::Served(unit_id);
                served += 1;
            }
        }
        served
    }

    /// Unassigns every open call of `unit_id` and hands them back for
    /// re-dispatch.
    pub fn release(&mut self, unit_id: UnitId) -> Vec<(usize, Request)> {
        let mut released = Vec::new();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.assignment == Assignment::Assigned(unit_id) {
                entry.assignment = Assignment::Unassigned;
                released.push((index, entry.request));
            }
        }
        released
    }

    /// Calls no unit has taken yet, oldest first. They stay `Unassigned`.
    pub fn unassigned(&self) -> Vec<(usize, Request)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.assignment == Assignment::Unassigned)
            .map(|(index, entry)| (index, entry.request))
            .collect()
    }

    pub fn waiting(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.assignment == Assignment::Unassigned)
            .count()
    }

    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.assignment, Assignment::Assigned(_)))
            .count()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
