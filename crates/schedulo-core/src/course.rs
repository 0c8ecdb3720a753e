//! Course descriptions (catalog entries) and course instances (sections
//! offered in a given semester).

use std::fmt;

use crate::academic::AcademicYear;
use crate::course_id::CompactCourseId;
use crate::datetime::EventSchedule;
use crate::error::ValidationError;
use crate::location::Location;

/// Highest course code the catalog uses.
pub const MAX_COURSE_CODE: u16 = 6_999;

/// A catalog entry, e.g. "CSE 1002 Fundamentals of Software Engineering".
///
/// Immutable once built. The [`CompactCourseId`] is computed up front from
/// prefix, code and catalog year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDescription {
    id: CompactCourseId,
    prefix: String,
    code: u16,
    credit_hours: String,
    title: String,
    catalog_year: AcademicYear,
}

impl CourseDescription {
    /// Builds a description. The prefix is trimmed and upper-cased before
    /// it is checked.
    pub fn new(
        prefix: &str,
        code: u16,
        credit_hours: impl Into<String>,
        title: impl Into<String>,
        catalog_year: AcademicYear,
    ) -> Result<Self, ValidationError> {
        let prefix = prefix.trim().to_uppercase();
        if !is_course_prefix_valid(&prefix) {
            return Err(ValidationError::InvalidPrefix(prefix));
        }
        if code > MAX_COURSE_CODE {
            return Err(ValidationError::CourseCodeOutOfRange(code));
        }
        let title = title.into();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("course title"));
        }
        let id = CompactCourseId::new(catalog_year.start_year(), &prefix, code)?;
        Ok(Self {
            id,
            prefix,
            code,
            credit_hours: credit_hours.into(),
            title,
            catalog_year,
        })
    }

    /// Builds a description from a combined label such as `"CSE 1002"`.
    pub fn from_label(
        label: &str,
        credit_hours: impl Into<String>,
        title: impl Into<String>,
        catalog_year: AcademicYear,
    ) -> Result<Self, ValidationError> {
        let (prefix, code) = parse_course_label(label)?;
        Self::new(prefix, code, credit_hours, title, catalog_year)
    }

    pub fn id(&self) -> CompactCourseId {
        self.id
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn credit_hours(&self) -> &str {
        &self.credit_hours
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn catalog_year(&self) -> AcademicYear {
        self.catalog_year
    }
}

impl fmt::Display for CourseDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.title, self.prefix, self.code)
    }
}

/// True for exactly three upper-case ASCII letters.
pub fn is_course_prefix_valid(prefix: &str) -> bool {
    prefix.len() == 3 && prefix.chars().all(|c| c.is_ascii_uppercase())
}

/// Splits `"CSE 1002"` or `"CSE1002"` into prefix and code.
///
/// The prefix is returned as written; [`CourseDescription::new`] does the
/// normalization.
pub fn parse_course_label(label: &str) -> Result<(&str, u16), ValidationError> {
    let invalid = || ValidationError::InvalidCourseLabel(label.to_string());
    if !label.is_ascii() {
        return Err(invalid());
    }
    let code = match label.len() {
        7 => &label[3..],
        8 if label.as_bytes()[3] == b' ' => &label[4..],
        _ => return Err(invalid()),
    };
    let code = code.parse().map_err(|_| invalid())?;
    Ok((&label[..3], code))
}

/// One offered section of a course in a specific semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInstance {
    crn: u32,
    description_id: CompactCourseId,
    section: String,
    schedule: Option<EventSchedule>,
    place: Option<Location>,
    instructor: String,
}

impl CourseInstance {
    pub fn new(
        crn: u32,
        description_id: CompactCourseId,
        section: impl Into<String>,
        schedule: Option<EventSchedule>,
        place: Option<Location>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            crn,
            description_id,
            section: section.into(),
            schedule,
            place,
            instructor: instructor.into(),
        }
    }

    /// Course registration number; unique within a semester.
    pub fn crn(&self) -> u32 {
        self.crn
    }

    pub fn description_id(&self) -> CompactCourseId {
        self.description_id
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn schedule(&self) -> Option<&EventSchedule> {
        self.schedule.as_ref()
    }

    pub fn place(&self) -> Option<&Location> {
        self.place.as_ref()
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }
}

impl fmt::Display for CourseInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.crn)
    }
}
