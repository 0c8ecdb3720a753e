//! Semesters and their academic-calendar dates.
//!
//! A [`Semester`] is identified by its [`SemesterKey`] (type + year). The
//! [`Semesters`](crate::registry::Semesters) registry interns exactly one
//! `Semester` per key, so handles returned for the same key point at the
//! same object and share one calendar-date list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::academic::{AcademicCalendarDate, AcademicYear};
use crate::error::ValidationError;

/// Kind of instructional period.
///
/// Persisted as `"Fall"`, `"Spring"` or `"Summer"`; parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SemesterType {
    Spring,
    Summer,
    Fall,
}

impl SemesterType {
    pub const ALL: [SemesterType; 3] = [SemesterType::Fall, SemesterType::Spring, SemesterType::Summer];

    pub fn name(self) -> &'static str {
        match self {
            SemesterType::Fall => "Fall",
            SemesterType::Spring => "Spring",
            SemesterType::Summer => "Summer",
        }
    }
}

impl fmt::Display for SemesterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for SemesterType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for SemesterType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemesterType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "semester type",
                value: s.to_string(),
            })
    }
}

/// Identity of a semester: its type and calendar year.
///
/// Orders chronologically (Spring, Summer, Fall within a year). Displays
/// as the `"<Type> <year>"` token used for document section keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemesterKey {
    year: u16,
    kind: SemesterType,
}

impl SemesterKey {
    pub fn new(kind: SemesterType, year: u16) -> Self {
        Self { year, kind }
    }

    pub fn kind(&self) -> SemesterType {
        self.kind
    }

    pub fn year(&self) -> u16 {
        self.year
    }
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.year)
    }
}

impl FromStr for SemesterKey {
    type Err = ValidationError;

    /// Parses `"Fall 2024"`; the type is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::UnknownVariant {
            kind: "semester",
            value: s.to_string(),
        };
        let mut parts = s.split(' ');
        let (Some(kind), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let year: u16 = year.parse().map_err(|_| invalid())?;
        Ok(Self::new(kind.parse()?, year))
    }
}

/// One instructional period and the academic-calendar dates inside it.
///
/// Equality and hashing use the key only; the calendar list is ignored.
#[derive(Debug)]
pub struct Semester {
    key: SemesterKey,
    calendar: Mutex<Vec<AcademicCalendarDate>>,
}

impl Semester {
    pub(crate) fn new(key: SemesterKey) -> Self {
        Self {
            key,
            calendar: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> SemesterKey {
        self.key
    }

    pub fn kind(&self) -> SemesterType {
        self.key.kind()
    }

    pub fn year(&self) -> u16 {
        self.key.year()
    }

    pub fn academic_year(&self) -> Result<AcademicYear, ValidationError> {
        AcademicYear::containing(self.key)
    }

    pub fn add_cal_date(&self, date: AcademicCalendarDate) {
        self.calendar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(date);
    }

    /// Parses academic-calendar page text for this semester's year and
    /// adds the resulting date.
    pub fn add_cal_date_text(&self, date_text: &str, description: &str) -> Result<(), ValidationError> {
        let date = AcademicCalendarDate::parse(date_text, self.year(), description)?;
        self.add_cal_date(date);
        Ok(())
    }

    /// Snapshot of the calendar dates, in insertion order.
    pub fn cal_dates(&self) -> Vec<AcademicCalendarDate> {
        self.calendar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn replace_cal_dates(&self, dates: Vec<AcademicCalendarDate>) {
        *self.calendar.lock().unwrap_or_else(PoisonError::into_inner) = dates;
    }

    pub(crate) fn clear_cal_dates(&self) {
        self.replace_cal_dates(Vec::new());
    }
}

impl PartialEq for Semester {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Semester {}

impl Hash for Semester {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}
