//! Date ranges, time-of-day ranges and weekly event schedules.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                kind: "date",
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains_range(&self, other: &DateRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// True if the two ranges share at least one day. Symmetric.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Inclusive range of times within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                kind: "time",
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// True if the two ranges share at least one instant. Symmetric.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Format used by the published class schedule, e.g. `"0900-0950"`.
    pub fn class_schedule_string(&self) -> String {
        format!("{}-{}", self.start.format("%H%M"), self.end.format("%H%M"))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Day of the week, Monday first.
///
/// Persisted by upper-case name (`"MONDAY"`); parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Single-letter abbreviation used in class schedules (Thursday is `R`).
    pub fn letter(self) -> char {
        match self {
            DayOfWeek::Monday => 'M',
            DayOfWeek::Tuesday => 'T',
            DayOfWeek::Wednesday => 'W',
            DayOfWeek::Thursday => 'R',
            DayOfWeek::Friday => 'F',
            DayOfWeek::Saturday => 'S',
            DayOfWeek::Sunday => 'U',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "day of week",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weekly schedule: the time range an event occupies on each day it meets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchedule {
    days: BTreeMap<DayOfWeek, TimeRange>,
}

impl EventSchedule {
    /// Builds a schedule from a day → range map. Must not be empty.
    pub fn new(days: BTreeMap<DayOfWeek, TimeRange>) -> Result<Self, ValidationError> {
        if days.is_empty() {
            return Err(ValidationError::InvalidSchedule(
                "schedule cannot be empty".to_string(),
            ));
        }
        Ok(Self { days })
    }

    /// Builds a schedule where each day names an index into `ranges`.
    pub fn from_indexed(
        day_to_range: &BTreeMap<DayOfWeek, usize>,
        ranges: &[TimeRange],
    ) -> Result<Self, ValidationError> {
        let mut days = BTreeMap::new();
        for (&day, &index) in day_to_range {
            let range = ranges.get(index).ok_or_else(|| {
                ValidationError::InvalidSchedule(format!(
                    "{day} refers to range {index} but only {} exist",
                    ranges.len()
                ))
            })?;
            days.insert(day, *range);
        }
        Self::new(days)
    }

    pub fn days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.days.keys().copied()
    }

    pub fn time_for(&self, day: DayOfWeek) -> Option<TimeRange> {
        self.days.get(&day).copied()
    }

    pub fn entries(&self) -> &BTreeMap<DayOfWeek, TimeRange> {
        &self.days
    }

    /// Distinct time ranges with the days that share each one.
    ///
    /// Ranges appear in order of the first day (Monday first) that uses them.
    pub fn grouped(&self) -> Vec<(Vec<DayOfWeek>, TimeRange)> {
        let mut groups: Vec<(Vec<DayOfWeek>, TimeRange)> = Vec::new();
        for (&day, range) in &self.days {
            match groups.iter_mut().find(|(_, r)| r == range) {
                Some((days, _)) => days.push(day),
                None => groups.push((vec![day], *range)),
            }
        }
        groups
    }
}

impl fmt::Display for EventSchedule {
    /// Renders like the class schedule: `"MWF 0900-0950, TR 1230-1345"`,
    /// ordered by start time.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups = self.grouped();
        groups.sort_by_key(|(_, range)| range.start());
        let parts: Vec<String> = groups
            .iter()
            .map(|(days, range)| {
                let letters: String = days.iter().map(|d| d.letter()).collect();
                format!("{} {}", letters, range.class_schedule_string())
            })
            .collect();
        f.write_str(&parts.join(", "))
    }
}
