//! In-memory registries for the scheduling domain.
//!
//! Each registry is an independently constructible store guarded by a
//! `std::sync::RwLock`. Reads hand out owned snapshots, so an iteration
//! never observes a concurrent mutation. One [`Registries`] value owns a
//! full set and is passed by reference to whatever needs it.
//!
//! Lock poisoning is recovered: every critical section leaves its map in
//! a consistent state, so the data behind a poisoned lock is still valid.

mod calendar;
mod catalog;
mod courses;
mod moods;
mod semesters;

pub use calendar::StudentCalendar;
pub use catalog::Catalog;
pub use courses::Courses;
pub use moods::MoodReports;
pub use semesters::Semesters;

/// The five registries of one application context.
#[derive(Debug, Default)]
pub struct Registries {
    pub semesters: Semesters,
    pub catalog: Catalog,
    pub courses: Courses,
    pub calendar: StudentCalendar,
    pub moods: MoodReports,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every registry.
    pub fn clear(&self) {
        self.semesters.clear();
        self.catalog.clear();
        self.courses.clear();
        self.calendar.clear();
        self.moods.clear();
    }

    /// True when no registry holds anything.
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
            && self.catalog.is_empty()
            && self.courses.is_empty()
            && self.calendar.is_empty()
            && self.moods.is_empty()
    }
}
