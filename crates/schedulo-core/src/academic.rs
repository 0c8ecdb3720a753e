//! Academic years and academic-calendar dates.
//!
//! An academic year spans a Fall semester and the following Spring and
//! Summer. Calendar dates come from the published academic calendar page,
//! whose date column uses one of three shapes:
//!
//! | Shape | Example |
//! |-------|---------|
//! | single day | `Apr 24` |
//! | days in one month | `Apr 25-26` |
//! | days across months | `Apr 29-May 3` |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::datetime::DateRange;
use crate::error::ValidationError;
use crate::registry::Semesters;
use crate::semester::{Semester, SemesterKey, SemesterType};

/// First academic year the university operated.
pub const FIRST_ACADEMIC_YEAR: u16 = 1958;

/// Last allowed start year; the end year must stay a positive 16-bit value.
const LAST_ACADEMIC_YEAR: u16 = i16::MAX as u16 - 1;

/// Description marker that turns a calendar date into a holiday.
const HOLIDAY_MARKER: &str = "(no classes)";

/// An academic year, identified by the year its Fall semester starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AcademicYear {
    start_year: u16,
}

impl AcademicYear {
    pub fn new(start_year: u16) -> Result<Self, ValidationError> {
        if !(FIRST_ACADEMIC_YEAR..=LAST_ACADEMIC_YEAR).contains(&start_year) {
            return Err(ValidationError::AcademicYearOutOfRange(start_year));
        }
        Ok(Self { start_year })
    }

    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    pub fn end_year(&self) -> u16 {
        self.start_year + 1
    }

    /// The semester of the given type inside this academic year.
    ///
    /// Fall belongs to the start year; Spring and Summer to the end year.
    pub fn semester(&self, kind: SemesterType, semesters: &Semesters) -> Arc<Semester> {
        let year = match kind {
            SemesterType::Fall => self.start_year(),
            SemesterType::Spring | SemesterType::Summer => self.end_year(),
        };
        semesters.get_semester(kind, year)
    }

    /// The academic year a semester falls in.
    pub fn containing(semester: SemesterKey) -> Result<Self, ValidationError> {
        match semester.kind() {
            SemesterType::Fall => Self::new(semester.year()),
            SemesterType::Spring | SemesterType::Summer => {
                Self::new(semester.year().saturating_sub(1))
            }
        }
    }
}

impl FromStr for AcademicYear {
    type Err = ValidationError;

    /// Parses the `"2024-2025"` form. Only the start year is read.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::UnknownVariant {
            kind: "academic year",
            value: s.to_string(),
        };
        if s.len() != 9 || !s.is_char_boundary(4) {
            return Err(invalid());
        }
        let start: u16 = s[..4].parse().map_err(|_| invalid())?;
        Self::new(start)
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year(), self.end_year())
    }
}

/// One row of the academic calendar: a date range and what happens then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicCalendarDate {
    range: DateRange,
    description: String,
    holiday: bool,
}

impl AcademicCalendarDate {
    /// Creates a calendar date. `holiday` is derived from the description
    /// here and never recomputed.
    pub fn new(range: DateRange, description: impl Into<String>) -> Self {
        let description = description.into();
        let holiday = is_holiday(&description);
        Self {
            range,
            description,
            holiday,
        }
    }

    /// Rebuilds a calendar date exactly as it was persisted.
    pub(crate) fn restore(range: DateRange, description: String, holiday: bool) -> Self {
        Self {
            range,
            description,
            holiday,
        }
    }

    /// Parses academic-calendar page text (see the module docs) for `year`.
    pub fn parse(
        date_text: &str,
        year: u16,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let range = parse_calendar_range(date_text, year)?;
        Ok(Self::new(range, description))
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday
    }
}

impl fmt::Display for AcademicCalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_like_calendar(&self.range))?;
        if self.has_description() {
            write!(f, " | {}", self.description)?;
        }
        Ok(())
    }
}

/// True if the description marks a day without classes.
pub fn is_holiday(description: &str) -> bool {
    description.to_lowercase().contains(HOLIDAY_MARKER)
}

fn parse_month_day(month: &str, day: &str, year: u16) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{} {} {}", month, day, year), "%b %d %Y").ok()
}

/// Parses the date column of the academic calendar into a range.
pub fn parse_calendar_range(date_text: &str, year: u16) -> Result<DateRange, ValidationError> {
    let invalid = || ValidationError::InvalidCalendarDate(date_text.to_string());
    let text = date_text.trim();
    let parts: Vec<&str> = text.split_whitespace().collect();

    let (start, end) = match parts.as_slice() {
        [month, day] if !day.contains('-') => {
            let date = parse_month_day(month, day, year).ok_or_else(invalid)?;
            (date, date)
        }
        [month, days] => {
            let (first, last) = days.split_once('-').ok_or_else(invalid)?;
            (
                parse_month_day(month, first, year).ok_or_else(invalid)?,
                parse_month_day(month, last, year).ok_or_else(invalid)?,
            )
        }
        [start_month, middle, end_day] => {
            let (start_day, end_month) = middle.split_once('-').ok_or_else(invalid)?;
            (
                parse_month_day(start_month, start_day, year).ok_or_else(invalid)?,
                parse_month_day(end_month, end_day, year).ok_or_else(invalid)?,
            )
        }
        _ => return Err(invalid()),
    };

    DateRange::new(start, end)
}

/// Formats a range the way the academic calendar prints it.
pub fn format_like_calendar(range: &DateRange) -> String {
    let (start, end) = (range.start(), range.end());
    if start.year() != end.year() {
        return range.to_string();
    }
    if start == end {
        start.format("%b %-d").to_string()
    } else if start.month() == end.month() {
        format!("{}-{}", start.format("%b %-d"), end.format("%-d"))
    } else {
        format!("{}-{}", start.format("%b %-d"), end.format("%b %-d"))
    }
}
