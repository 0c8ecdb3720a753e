use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::event::Event;
use crate::semester::{Semester, SemesterKey};

/// The student's own events, per semester, in the order they were added.
#[derive(Debug, Default)]
pub struct StudentCalendar {
    events: RwLock<BTreeMap<SemesterKey, Vec<Event>>>,
}

impl StudentCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, semester: &Semester, event: Event) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(semester.key())
            .or_default()
            .push(event);
    }

    /// Replaces every event in `semester` at once.
    pub fn replace(&self, semester: &Semester, events: Vec<Event>) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(semester.key(), events);
    }

    /// Events in `semester`; empty when there are none.
    pub fn list_by_semester(&self, semester: &Semester) -> Vec<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&semester.key())
            .cloned()
            .unwrap_or_default()
    }

    /// Semesters with at least one event, oldest first.
    pub fn semesters(&self) -> Vec<SemesterKey> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, events)| !events.is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Snapshot of the whole calendar.
    pub fn get_all(&self) -> BTreeMap<SemesterKey, Vec<Event>> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
