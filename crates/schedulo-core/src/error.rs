//! Error types for the Schedulo core.
//!
//! [`ValidationError`] covers entity construction: a value that fails one
//! of these checks is never partially built. [`DecodeError`] covers a
//! single element of a storage document that could not be turned back
//! into a domain value; callers log it and move on to the next element.

use thiserror::Error;

/// A construction-time contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A character outside `'A'..='Z'` was given to the alphabet codec.
    #[error("letter must be between 'A' and 'Z', got {0:?}")]
    InvalidLetter(char),

    /// An index outside `0..=25` that is also not the error sentinel.
    #[error("letter index must be between 0 and 25 (or the error index 26), got {0}")]
    InvalidLetterIndex(u16),

    /// A course prefix that is not exactly three upper-case letters.
    #[error("invalid course prefix: {0:?}")]
    InvalidPrefix(String),

    /// A course code above the catalog maximum.
    #[error("invalid course code: {0} (maximum is {max})", max = crate::course::MAX_COURSE_CODE)]
    CourseCodeOutOfRange(u16),

    /// A combined label such as `"CSE 1002"` that could not be split.
    #[error("invalid course label: {0:?}")]
    InvalidCourseLabel(String),

    /// A required string field was empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// An academic year before the university existed, or one whose end
    /// year would not fit.
    #[error("academic year starting in {0} is out of range")]
    AcademicYearOutOfRange(u16),

    /// A date or time range whose start is after its end.
    #[error("{kind} range start {start} is after end {end}")]
    InvertedRange {
        kind: &'static str,
        start: String,
        end: String,
    },

    /// A mood feeling scale outside `0..=10`.
    #[error("feeling scale must be between 0 and 10, got {0}")]
    FeelingScaleOutOfRange(u8),

    /// A schedule with no days, or a day pointing at a missing range.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Academic calendar page text that matches none of the known forms.
    #[error("could not parse academic calendar date {0:?}")]
    InvalidCalendarDate(String),

    /// An on-campus location string not of the form `"<building> <room>"`.
    #[error("invalid on-campus location: {0:?}")]
    InvalidLocation(String),

    /// A name that does not match any variant of a closed enumeration.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    /// A course event was requested for an instance that cannot produce one.
    #[error("cannot build course event for CRN {crn}: {reason}")]
    CourseEventUnavailable { crn: u32, reason: &'static str },
}

/// Failure to decode one element of a storage document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The element did not have the expected JSON shape.
    #[error("malformed element: {0}")]
    Shape(#[from] serde_json::Error),

    /// The element decoded but described an invalid entity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An event object carrying neither `crn` nor `category`.
    #[error("event has neither a \"crn\" nor a \"category\" field")]
    UnknownEventKind,

    /// A location object carrying none of `bldgCode`, `link`, `address`.
    #[error("unable to determine location type from its fields")]
    UnknownLocationKind,

    /// A value of the wrong JSON type where an object or array was expected.
    #[error("expected {expected} for {what}")]
    WrongType {
        what: &'static str,
        expected: &'static str,
    },

    /// A section key that should name a semester, such as `"Fall 2024"`.
    #[error("invalid semester key: {0:?}")]
    InvalidSemesterKey(String),

    /// A section key that should be an ISO date.
    #[error("invalid date key: {0:?}")]
    InvalidDateKey(String),
}
