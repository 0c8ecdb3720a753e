//! Entries on a student's weekly calendar.

use std::fmt;

use crate::category::Category;
use crate::course::CourseInstance;
use crate::datetime::EventSchedule;
use crate::error::ValidationError;
use crate::location::Location;
use crate::registry::Catalog;

/// What an event stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A registered course section, by CRN.
    Course { crn: u32 },
    /// A personal activity.
    Activity { category: Category },
}

/// A recurring weekly calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    title: String,
    schedule: EventSchedule,
    location: Option<Location>,
    observes_holiday: bool,
    kind: EventKind,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        schedule: EventSchedule,
        location: Option<Location>,
        observes_holiday: bool,
        kind: EventKind,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("event title"));
        }
        Ok(Self {
            title,
            schedule,
            location,
            observes_holiday,
            kind,
        })
    }

    pub fn activity(
        title: impl Into<String>,
        schedule: EventSchedule,
        location: Option<Location>,
        observes_holiday: bool,
        category: Category,
    ) -> Result<Self, ValidationError> {
        Self::new(
            title,
            schedule,
            location,
            observes_holiday,
            EventKind::Activity { category },
        )
    }

    /// Builds the calendar event for a registered course section.
    ///
    /// The title comes from the catalog entry the instance points at.
    /// Course events always observe holidays.
    pub fn for_course(instance: &CourseInstance, catalog: &Catalog) -> Result<Self, ValidationError> {
        let unavailable = |reason| ValidationError::CourseEventUnavailable {
            crn: instance.crn(),
            reason,
        };
        let description = catalog
            .get(instance.description_id())
            .ok_or_else(|| unavailable("no catalog entry for its course"))?;
        let schedule = instance
            .schedule()
            .cloned()
            .ok_or_else(|| unavailable("section has no meeting schedule"))?;
        Self::new(
            description.title(),
            schedule,
            instance.place().cloned(),
            true,
            EventKind::Course {
                crn: instance.crn(),
            },
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn observes_holiday(&self) -> bool {
        self.observes_holiday
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn crn(&self) -> Option<u32> {
        match self.kind {
            EventKind::Course { crn } => Some(crn),
            EventKind::Activity { .. } => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            EventKind::Activity { category } => Some(category),
            EventKind::Course { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.schedule)
    }
}
