//! Storage document codec.
//!
//! [`encode`] snapshots the five registries into a [`Document`], which
//! serializes to the JSON tree below. [`decode`] walks such a tree back
//! into registries.
//!
//! ```text
//! {
//!   "Semesters":       [ { "type", "year", "academicCalendarDates": [ { "dateRange", "description", "holiday" } ] } ],
//!   "Catalog":         [ { "prefix", "code", "creditHours", "title", "catalogYear" } ],
//!   "Courses":         { "Fall 2024": [ { "crn", "descriptionID", "section", "schedule", "place", "instructor" } ] },
//!   "StudentCalendar": { "Fall 2024": [ { "title", "schedule", "location", "observesHoliday", "crn" | "category" } ] },
//!   "MoodReports":     { "2024-10-14": { "feelingScale", "feelingSource", "journalEntry" } }
//! }
//! ```
//!
//! Decoding is tolerant. A section that is missing or has the wrong JSON
//! type is skipped and its registry left alone. An element that fails to
//! decode is logged at `warn` and skipped; the rest of its section still
//! loads. Events and locations carry no tag: the variant is picked by
//! which field is present (`crn`/`category`, `bldgCode`/`link`/`address`).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::academic::{AcademicCalendarDate, AcademicYear};
use crate::category::Category;
use crate::course::{CourseDescription, CourseInstance};
use crate::course_id::CompactCourseId;
use crate::datetime::{DateRange, DayOfWeek, EventSchedule, TimeRange};
use crate::error::{DecodeError, ValidationError};
use crate::event::{Event, EventKind};
use crate::location::Location;
use crate::mood::MoodReport;
use crate::registry::{Registries, Semesters};
use crate::semester::{Semester, SemesterType};

pub const SEMESTERS: &str = "Semesters";
pub const CATALOG: &str = "Catalog";
pub const COURSES: &str = "Courses";
pub const STUDENT_CALENDAR: &str = "StudentCalendar";
pub const MOOD_REPORTS: &str = "MoodReports";

// ============ Wire shapes ============

/// Serializable snapshot of all registries.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(rename = "Semesters")]
    semesters: Vec<SemesterDoc>,
    #[serde(rename = "Catalog")]
    catalog: Vec<DescriptionDoc>,
    #[serde(rename = "Courses")]
    courses: BTreeMap<String, Vec<InstanceDoc>>,
    #[serde(rename = "StudentCalendar")]
    calendar: BTreeMap<String, Vec<EventDoc>>,
    #[serde(rename = "MoodReports")]
    moods: BTreeMap<String, MoodDoc>,
}

impl Document {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// UTF-8 JSON bytes, ready for encryption.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SemesterDoc {
    #[serde(rename = "type")]
    kind: SemesterType,
    year: u16,
    academic_calendar_dates: Vec<CalendarDateDoc>,
}

/// The part of a semester element read before its calendar dates.
#[derive(Deserialize)]
struct SemesterHeader {
    #[serde(rename = "type")]
    kind: SemesterType,
    year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDateDoc {
    date_range: DateRangeDoc,
    description: String,
    holiday: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateRangeDoc {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeRangeDoc {
    start_time: NaiveTime,
    end_time: NaiveTime,
}

/// Days sharing one exact time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduleEntryDoc {
    days: Vec<DayOfWeek>,
    range: TimeRangeDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionDoc {
    prefix: String,
    code: u16,
    credit_hours: String,
    title: String,
    catalog_year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdDoc {
    start_year: u16,
    prefix: String,
    code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceDoc {
    crn: u32,
    #[serde(rename = "descriptionID")]
    description_id: IdDoc,
    section: String,
    schedule: Option<Vec<ScheduleEntryDoc>>,
    place: Option<LocationDoc>,
    instructor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDoc {
    title: String,
    schedule: Vec<ScheduleEntryDoc>,
    location: Option<LocationDoc>,
    observes_holiday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crn: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoodDoc {
    feeling_scale: u8,
    feeling_source: Category,
    journal_entry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnCampusDoc {
    bldg_code: String,
    room_number: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VirtualDoc {
    link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OffCampusDoc {
    address: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum LocationDoc {
    OnCampus(OnCampusDoc),
    Virtual(VirtualDoc),
    OffCampus(OffCampusDoc),
}

impl LocationDoc {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::WrongType {
                what: "location",
                expected: "an object",
            });
        }
        if value.get("bldgCode").is_some() {
            Ok(LocationDoc::OnCampus(serde_json::from_value(value)?))
        } else if value.get("link").is_some() {
            Ok(LocationDoc::Virtual(serde_json::from_value(value)?))
        } else if value.get("address").is_some() {
            Ok(LocationDoc::OffCampus(serde_json::from_value(value)?))
        } else {
            Err(DecodeError::UnknownLocationKind)
        }
    }

    fn into_location(self) -> Result<Location, ValidationError> {
        match self {
            LocationDoc::OnCampus(doc) => Location::on_campus(doc.bldg_code, doc.room_number),
            LocationDoc::Virtual(doc) => Location::virtual_link(doc.link),
            LocationDoc::OffCampus(doc) => Location::off_campus(doc.address),
        }
    }
}

impl<'de> Deserialize<'de> for LocationDoc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        LocationDoc::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<&Location> for LocationDoc {
    fn from(location: &Location) -> Self {
        match location {
            Location::OnCampus {
                bldg_code,
                room_number,
            } => LocationDoc::OnCampus(OnCampusDoc {
                bldg_code: bldg_code.clone(),
                room_number: *room_number,
            }),
            Location::Virtual { link } => LocationDoc::Virtual(VirtualDoc { link: link.clone() }),
            Location::OffCampus { address } => LocationDoc::OffCampus(OffCampusDoc {
                address: address.clone(),
            }),
        }
    }
}

// ============ Encoding ============

fn schedule_docs(schedule: &EventSchedule) -> Vec<ScheduleEntryDoc> {
    schedule
        .grouped()
        .into_iter()
        .map(|(days, range)| ScheduleEntryDoc {
            days,
            range: TimeRangeDoc {
                start_time: range.start(),
                end_time: range.end(),
            },
        })
        .collect()
}

impl From<&AcademicCalendarDate> for CalendarDateDoc {
    fn from(date: &AcademicCalendarDate) -> Self {
        Self {
            date_range: DateRangeDoc {
                start_date: date.range().start(),
                end_date: date.range().end(),
            },
            description: date.description().to_string(),
            holiday: date.is_holiday(),
        }
    }
}

impl From<&CourseDescription> for DescriptionDoc {
    fn from(description: &CourseDescription) -> Self {
        Self {
            prefix: description.prefix().to_string(),
            code: description.code(),
            credit_hours: description.credit_hours().to_string(),
            title: description.title().to_string(),
            catalog_year: description.catalog_year().start_year(),
        }
    }
}

impl From<&CourseInstance> for InstanceDoc {
    fn from(instance: &CourseInstance) -> Self {
        let id = instance.description_id();
        Self {
            crn: instance.crn(),
            description_id: IdDoc {
                start_year: id.start_year(),
                prefix: id.prefix(),
                code: id.course_code(),
            },
            section: instance.section().to_string(),
            schedule: instance.schedule().map(schedule_docs),
            place: instance.place().map(LocationDoc::from),
            instructor: instance.instructor().to_string(),
        }
    }
}

impl From<&Event> for EventDoc {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title().to_string(),
            schedule: schedule_docs(event.schedule()),
            location: event.location().map(LocationDoc::from),
            observes_holiday: event.observes_holiday(),
            crn: event.crn(),
            category: event.category(),
        }
    }
}

impl From<&MoodReport> for MoodDoc {
    fn from(report: &MoodReport) -> Self {
        Self {
            feeling_scale: report.feeling_scale(),
            feeling_source: report.feeling_source(),
            journal_entry: report.journal_entry().to_string(),
        }
    }
}

/// Snapshots the current registry contents.
pub fn encode(registries: &Registries) -> Document {
    let semesters = registries
        .semesters
        .get_all()
        .iter()
        .map(|semester| SemesterDoc {
            kind: semester.kind(),
            year: semester.year(),
            academic_calendar_dates: semester.cal_dates().iter().map(CalendarDateDoc::from).collect(),
        })
        .collect();

    let catalog = registries
        .catalog
        .get_all()
        .iter()
        .map(DescriptionDoc::from)
        .collect();

    let mut courses: BTreeMap<String, Vec<InstanceDoc>> = BTreeMap::new();
    for (semester, instance) in registries.courses.all_instances() {
        courses
            .entry(semester.to_string())
            .or_default()
            .push(InstanceDoc::from(&instance));
    }

    let calendar = registries
        .calendar
        .get_all()
        .into_iter()
        .map(|(semester, events)| {
            (
                semester.to_string(),
                events.iter().map(EventDoc::from).collect(),
            )
        })
        .collect();

    let moods = registries
        .moods
        .get_all()
        .into_iter()
        .map(|(date, report)| (date.to_string(), MoodDoc::from(&report)))
        .collect();

    Document {
        semesters,
        catalog,
        courses,
        calendar,
        moods,
    }
}

// ============ Decoding ============

/// Outcome of decoding one top-level section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionReport {
    /// The section existed with the right container type.
    pub present: bool,
    pub loaded: usize,
    pub skipped: usize,
}

impl SectionReport {
    fn record<T>(
        &mut self,
        section: &'static str,
        at: impl fmt::Display,
        result: Result<T, DecodeError>,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                self.loaded += 1;
                Some(value)
            }
            Err(error) => {
                warn!(section = section, at = %at, %error, "skipping undecodable element");
                self.skipped += 1;
                None
            }
        }
    }
}

/// Per-section counts from [`decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub semesters: SectionReport,
    pub catalog: SectionReport,
    pub courses: SectionReport,
    pub calendar: SectionReport,
    pub moods: SectionReport,
}

impl DecodeReport {
    pub fn sections(&self) -> [(&'static str, SectionReport); 5] {
        [
            (SEMESTERS, self.semesters),
            (CATALOG, self.catalog),
            (COURSES, self.courses),
            (STUDENT_CALENDAR, self.calendar),
            (MOOD_REPORTS, self.moods),
        ]
    }

    pub fn loaded(&self) -> usize {
        self.sections().iter().map(|(_, s)| s.loaded).sum()
    }

    pub fn skipped(&self) -> usize {
        self.sections().iter().map(|(_, s)| s.skipped).sum()
    }
}

/// Loads a decoded JSON document into `registries`.
///
/// Entries are merged: descriptions, instances and mood reports replace
/// any with the same key, while a semester's calendar dates and events
/// are replaced as a whole list. Only a non-object root is an error.
pub fn decode(document: &Value, registries: &Registries) -> Result<DecodeReport, DecodeError> {
    let root = document.as_object().ok_or(DecodeError::WrongType {
        what: "document",
        expected: "an object",
    })?;
    let mut report = DecodeReport::default();

    if let Some(items) = array_section(root, SEMESTERS) {
        report.semesters = decode_semesters(items, &registries.semesters);
    }

    if let Some(items) = array_section(root, CATALOG) {
        let section = &mut report.catalog;
        section.present = true;
        for (index, item) in items.iter().enumerate() {
            if let Some(description) = section.record(CATALOG, index, decode_description(item)) {
                registries.catalog.add(description);
            }
        }
    }

    if let Some(by_semester) = object_section(root, COURSES) {
        let section = &mut report.courses;
        section.present = true;
        for (name, items) in by_semester {
            let Some((semester, items)) = semester_array(COURSES, name, items, &registries.semesters, section)
            else {
                continue;
            };
            for (index, item) in items.iter().enumerate() {
                let at = format!("{name}[{index}]");
                if let Some(instance) = section.record(COURSES, at, decode_instance(item)) {
                    registries.courses.add(&semester, instance);
                }
            }
        }
    }

    if let Some(by_semester) = object_section(root, STUDENT_CALENDAR) {
        let section = &mut report.calendar;
        section.present = true;
        for (name, items) in by_semester {
            let Some((semester, items)) =
                semester_array(STUDENT_CALENDAR, name, items, &registries.semesters, section)
            else {
                continue;
            };
            let events = items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    section.record(STUDENT_CALENDAR, format!("{name}[{index}]"), decode_event(item))
                })
                .collect();
            registries.calendar.replace(&semester, events);
        }
    }

    if let Some(by_date) = object_section(root, MOOD_REPORTS) {
        let section = &mut report.moods;
        section.present = true;
        for (key, item) in by_date {
            if let Some((date, mood)) = section.record(MOOD_REPORTS, key, decode_mood(key, item)) {
                registries.moods.add(date, mood);
            }
        }
    }

    debug!(
        loaded = report.loaded(),
        skipped = report.skipped(),
        "decoded storage document"
    );
    Ok(report)
}

fn array_section<'a>(root: &'a Map<String, Value>, name: &'static str) -> Option<&'a Vec<Value>> {
    match root.get(name) {
        None => {
            debug!(section = name, "section absent, leaving registry unchanged");
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            warn!(section = name, "section is not an array, leaving registry unchanged");
            None
        }
    }
}

fn object_section<'a>(
    root: &'a Map<String, Value>,
    name: &'static str,
) -> Option<&'a Map<String, Value>> {
    match root.get(name) {
        None => {
            debug!(section = name, "section absent, leaving registry unchanged");
            None
        }
        Some(Value::Object(entries)) => Some(entries),
        Some(_) => {
            warn!(section = name, "section is not an object, leaving registry unchanged");
            None
        }
    }
}

/// Resolves a `"Fall 2024": [...]` entry. A bad key or a non-array value
/// counts every element it holds as skipped.
fn semester_array<'a>(
    section_name: &'static str,
    name: &str,
    items: &'a Value,
    semesters: &Semesters,
    section: &mut SectionReport,
) -> Option<(Arc<Semester>, &'a [Value])> {
    let Value::Array(items) = items else {
        section.record::<()>(
            section_name,
            name,
            Err(DecodeError::WrongType {
                what: "semester entry",
                expected: "an array",
            }),
        );
        return None;
    };
    match semesters.get_semester_by_name(name) {
        Some(semester) => Some((semester, items.as_slice())),
        None => {
            warn!(
                section = section_name,
                semester = name,
                elements = items.len(),
                "skipping entries under invalid semester key"
            );
            section.skipped += items.len();
            None
        }
    }
}

fn decode_semesters(items: &[Value], semesters: &Semesters) -> SectionReport {
    let mut section = SectionReport {
        present: true,
        ..SectionReport::default()
    };
    for (index, item) in items.iter().enumerate() {
        let parsed = SemesterHeader::deserialize(item)
            .map_err(DecodeError::from)
            .and_then(|header| match item.get("academicCalendarDates") {
                None | Some(Value::Null) => Ok((header, None)),
                Some(Value::Array(dates)) => Ok((header, Some(dates.as_slice()))),
                Some(_) => Err(DecodeError::WrongType {
                    what: "academicCalendarDates",
                    expected: "an array",
                }),
            });
        let Some((header, dates)) = section.record(SEMESTERS, index, parsed) else {
            continue;
        };
        let semester = semesters.get_semester(header.kind, header.year);
        // Absent or null keeps whatever dates the semester already has.
        let Some(dates) = dates else {
            continue;
        };
        let mut decoded = Vec::with_capacity(dates.len());
        for (i, date) in dates.iter().enumerate() {
            match decode_calendar_date(date) {
                Ok(date) => decoded.push(date),
                Err(error) => {
                    warn!(section = SEMESTERS, semester = %semester, index = i, %error, "skipping calendar date");
                    section.skipped += 1;
                }
            }
        }
        semester.replace_cal_dates(decoded);
    }
    section
}

fn decode_calendar_date(value: &Value) -> Result<AcademicCalendarDate, DecodeError> {
    let doc = CalendarDateDoc::deserialize(value)?;
    let range = DateRange::new(doc.date_range.start_date, doc.date_range.end_date)?;
    Ok(AcademicCalendarDate::restore(range, doc.description, doc.holiday))
}

fn decode_schedule(entries: Vec<ScheduleEntryDoc>) -> Result<EventSchedule, ValidationError> {
    let mut days = BTreeMap::new();
    for entry in entries {
        let range = TimeRange::new(entry.range.start_time, entry.range.end_time)?;
        for day in entry.days {
            if let Some(previous) = days.insert(day, range) {
                warn!(%day, dropped = %previous, kept = %range, "day listed twice in schedule; keeping the later range");
            }
        }
    }
    EventSchedule::new(days)
}

/// Decodes one `Catalog` element. The identifier is rebuilt from prefix,
/// code and catalog year.
pub fn decode_description(value: &Value) -> Result<CourseDescription, DecodeError> {
    let doc = DescriptionDoc::deserialize(value)?;
    let year = AcademicYear::new(doc.catalog_year)?;
    Ok(CourseDescription::new(
        &doc.prefix,
        doc.code,
        doc.credit_hours,
        doc.title,
        year,
    )?)
}

/// Decodes one `Courses` element. A `null` or empty schedule means the
/// section has no meeting times.
pub fn decode_instance(value: &Value) -> Result<CourseInstance, DecodeError> {
    let doc = InstanceDoc::deserialize(value)?;
    let id = CompactCourseId::new(
        doc.description_id.start_year,
        &doc.description_id.prefix,
        doc.description_id.code,
    )?;
    let schedule = match doc.schedule {
        Some(entries) if !entries.is_empty() => Some(decode_schedule(entries)?),
        _ => None,
    };
    let place = doc.place.map(LocationDoc::into_location).transpose()?;
    Ok(CourseInstance::new(
        doc.crn,
        id,
        doc.section,
        schedule,
        place,
        doc.instructor,
    ))
}

/// Decodes one `StudentCalendar` element, picking the variant by field.
pub fn decode_event(value: &Value) -> Result<Event, DecodeError> {
    if value.get("crn").is_none() && value.get("category").is_none() {
        return Err(DecodeError::UnknownEventKind);
    }
    let doc = EventDoc::deserialize(value)?;
    let kind = match (doc.crn, doc.category) {
        (Some(crn), _) => EventKind::Course { crn },
        (None, Some(category)) => EventKind::Activity { category },
        (None, None) => return Err(DecodeError::UnknownEventKind),
    };
    let location = doc.location.map(LocationDoc::into_location).transpose()?;
    Ok(Event::new(
        doc.title,
        decode_schedule(doc.schedule)?,
        location,
        doc.observes_holiday,
        kind,
    )?)
}

fn decode_mood(key: &str, value: &Value) -> Result<(NaiveDate, MoodReport), DecodeError> {
    let date: NaiveDate = key
        .parse()
        .map_err(|_| DecodeError::InvalidDateKey(key.to_string()))?;
    let doc = MoodDoc::deserialize(value)?;
    let report = MoodReport::new(doc.feeling_scale, doc.feeling_source, doc.journal_entry)?;
    Ok((date, report))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mwf_tr() -> EventSchedule {
        let morning = TimeRange::new(time(9, 0), time(9, 50)).unwrap();
        let afternoon = TimeRange::new(time(12, 30), time(13, 45)).unwrap();
        EventSchedule::new(BTreeMap::from([
            (DayOfWeek::Monday, morning),
            (DayOfWeek::Tuesday, afternoon),
            (DayOfWeek::Wednesday, morning),
            (DayOfWeek::Thursday, afternoon),
            (DayOfWeek::Friday, morning),
        ]))
        .unwrap()
    }

    fn populated() -> Registries {
        let registries = Registries::new();
        let fall = registries.semesters.get_semester(SemesterType::Fall, 2024);
        fall.add_cal_date_text("Oct 14-15", "Fall break (No classes)").unwrap();

        let description = CourseDescription::new(
            "CSE",
            1002,
            "4",
            "Fundamentals of Software Engineering",
            AcademicYear::new(2024).unwrap(),
        )
        .unwrap();
        let instance = CourseInstance::new(
            80471,
            description.id(),
            "E1",
            Some(mwf_tr()),
            Some(Location::on_campus("500OLS", 129).unwrap()),
            "Staff",
        );
        registries.catalog.add(description);
        registries.courses.add(&fall, instance.clone());

        let course_event = Event::for_course(&instance, &registries.catalog).unwrap();
        let breathe = Event::activity(
            "Breathe",
            mwf_tr(),
            Some(Location::virtual_link("https://meet.example/breathe").unwrap()),
            false,
            Category::Health,
        )
        .unwrap();
        registries.calendar.add(&fall, course_event);
        registries.calendar.add(&fall, breathe);

        registries.moods.add(
            date(2024, 10, 14),
            MoodReport::new(8, Category::Personal, "Rested over the break").unwrap(),
        );
        registries
    }

    fn encoded(registries: &Registries) -> Value {
        encode(registries).to_value().unwrap()
    }

    #[test]
    fn test_encode_shape() {
        let doc = encoded(&populated());

        assert_eq!(
            doc["Semesters"],
            json!([{
                "type": "Fall",
                "year": 2024,
                "academicCalendarDates": [{
                    "dateRange": {"startDate": "2024-10-14", "endDate": "2024-10-15"},
                    "description": "Fall break (No classes)",
                    "holiday": true
                }]
            }])
        );
        assert_eq!(
            doc["Catalog"],
            json!([{
                "prefix": "CSE",
                "code": 1002,
                "creditHours": "4",
                "title": "Fundamentals of Software Engineering",
                "catalogYear": 2024
            }])
        );

        let instance = &doc["Courses"]["Fall 2024"][0];
        assert_eq!(instance["crn"], 80471);
        assert_eq!(
            instance["descriptionID"],
            json!({"startYear": 2024, "prefix": "CSE", "code": 1002})
        );
        assert_eq!(instance["place"], json!({"bldgCode": "500OLS", "roomNumber": 129}));
        assert_eq!(
            instance["schedule"],
            json!([
                {"days": ["MONDAY", "WEDNESDAY", "FRIDAY"], "range": {"startTime": "09:00:00", "endTime": "09:50:00"}},
                {"days": ["TUESDAY", "THURSDAY"], "range": {"startTime": "12:30:00", "endTime": "13:45:00"}}
            ])
        );

        let events = doc["StudentCalendar"]["Fall 2024"].as_array().unwrap();
        assert_eq!(events[0]["crn"], 80471);
        assert!(events[0].get("category").is_none());
        assert_eq!(events[1]["category"], "HEALTH");
        assert!(events[1].get("crn").is_none());
        assert_eq!(events[1]["location"], json!({"link": "https://meet.example/breathe"}));

        assert_eq!(
            doc["MoodReports"]["2024-10-14"],
            json!({"feelingScale": 8, "feelingSource": "PERSONAL", "journalEntry": "Rested over the break"})
        );
    }

    #[test]
    fn test_round_trip_restores_equal_contents() {
        let original = populated();
        let doc = encoded(&original);

        let restored = Registries::new();
        let report = decode(&doc, &restored).unwrap();
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.catalog.loaded, 1);
        assert_eq!(report.calendar.loaded, 2);

        assert_eq!(restored.catalog.get_all(), original.catalog.get_all());
        assert_eq!(restored.courses.all_instances(), original.courses.all_instances());
        assert_eq!(restored.calendar.get_all(), original.calendar.get_all());
        assert_eq!(restored.moods.get_all(), original.moods.get_all());

        let fall = restored.semesters.get_semester(SemesterType::Fall, 2024);
        let original_fall = original.semesters.get_semester(SemesterType::Fall, 2024);
        assert_eq!(fall.cal_dates(), original_fall.cal_dates());

        let id = CompactCourseId::new(2024, "CSE", 1002).unwrap();
        assert!(restored.catalog.get(id).is_some());
    }

    #[test]
    fn test_decoding_twice_does_not_duplicate() {
        let doc = encoded(&populated());
        let restored = Registries::new();
        decode(&doc, &restored).unwrap();
        decode(&doc, &restored).unwrap();
        assert_eq!(restored.calendar.len(), 2);
        assert_eq!(restored.courses.len(), 1);
        let fall = restored.semesters.get_semester(SemesterType::Fall, 2024);
        assert_eq!(fall.cal_dates().len(), 1);
    }

    #[test]
    fn test_missing_or_mistyped_section_is_skipped() {
        for moods in [None, Some(json!("not an object")), Some(json!([1, 2]))] {
            let mut doc = encoded(&populated());
            let root = doc.as_object_mut().unwrap();
            root.remove(MOOD_REPORTS);
            if let Some(moods) = moods {
                root.insert(MOOD_REPORTS.to_string(), moods);
            }

            let restored = Registries::new();
            let kept = date(2023, 1, 1);
            restored
                .moods
                .add(kept, MoodReport::new(5, Category::Other, "already here").unwrap());

            let report = decode(&doc, &restored).unwrap();
            assert!(!report.moods.present);
            assert_eq!(restored.moods.len(), 1);
            assert!(restored.moods.has(kept));
            assert_eq!(restored.catalog.len(), 1);
            assert_eq!(restored.calendar.len(), 2);
        }
    }

    #[test]
    fn test_event_without_discriminator_is_skipped() {
        let mut doc = encoded(&populated());
        let events = doc["StudentCalendar"]["Fall 2024"].as_array_mut().unwrap();
        let mut broken = events[1].clone();
        broken.as_object_mut().unwrap().remove("category");
        events.insert(1, broken);

        let restored = Registries::new();
        let report = decode(&doc, &restored).unwrap();
        assert_eq!(report.calendar.loaded, 2);
        assert_eq!(report.calendar.skipped, 1);
        let fall = restored.semesters.get_semester(SemesterType::Fall, 2024);
        let titles: Vec<String> = restored
            .calendar
            .list_by_semester(&fall)
            .iter()
            .map(|e| e.title().to_string())
            .collect();
        assert_eq!(titles, ["Fundamentals of Software Engineering", "Breathe"]);
    }

    #[test]
    fn test_unknown_location_shape_skips_only_that_element() {
        let mut doc = encoded(&populated());
        doc["StudentCalendar"]["Fall 2024"][1]["location"] = json!({"room": 4});

        let restored = Registries::new();
        let report = decode(&doc, &restored).unwrap();
        assert_eq!(report.calendar.loaded, 1);
        assert_eq!(report.calendar.skipped, 1);
    }

    #[test]
    fn test_location_discriminated_by_field() {
        let loc = LocationDoc::from_value(json!({"bldgCode": "119EVH", "roomNumber": 201}))
            .unwrap()
            .into_location()
            .unwrap();
        assert_eq!(loc, Location::on_campus("119EVH", 201).unwrap());

        let loc = LocationDoc::from_value(json!({"address": "150 W University Blvd"}))
            .unwrap()
            .into_location()
            .unwrap();
        assert_eq!(loc, Location::off_campus("150 W University Blvd").unwrap());

        let loc = LocationDoc::from_value(json!({"address": ""}))
            .unwrap()
            .into_location()
            .unwrap();
        assert_eq!(loc, Location::off_campus("").unwrap());

        // bldgCode wins even when the rest of the object looks virtual
        assert!(LocationDoc::from_value(json!({"bldgCode": "119EVH", "link": "x"})).is_err());
        assert!(matches!(
            LocationDoc::from_value(json!({})),
            Err(DecodeError::UnknownLocationKind)
        ));
    }

    #[test]
    fn test_bad_elements_and_keys_counted() {
        let doc = json!({
            "Catalog": [
                {"prefix": "CSE", "code": 1002, "creditHours": "4", "title": "Ok", "catalogYear": 2024},
                {"prefix": "C5E", "code": 1002, "creditHours": "4", "title": "Bad prefix", "catalogYear": 2024},
                {"prefix": "CSE", "code": 9000, "creditHours": "4", "title": "Bad code", "catalogYear": 2024},
                {"prefix": "CSE", "code": 1003, "creditHours": "4", "title": "Too old", "catalogYear": 1900},
                "not an object"
            ],
            "Courses": {
                "Winter 2024": [{}, {}],
                "Fall 2024": "nope"
            },
            "MoodReports": {
                "yesterday": {"feelingScale": 3, "feelingSource": "WORK", "journalEntry": "x"},
                "2024-10-15": {"feelingScale": 11, "feelingSource": "WORK", "journalEntry": "x"},
                "2024-10-16": {"feelingScale": 4, "feelingSource": "work", "journalEntry": "fine"}
            }
        });
        let registries = Registries::new();
        let report = decode(&doc, &registries).unwrap();

        assert_eq!(report.catalog.loaded, 1);
        assert_eq!(report.catalog.skipped, 4);
        assert_eq!(report.courses.skipped, 3);
        assert_eq!(report.moods.loaded, 1);
        assert_eq!(report.moods.skipped, 2);
        assert!(!report.semesters.present);
        assert!(registries.moods.has(date(2024, 10, 16)));
    }

    #[test]
    fn test_persisted_holiday_flag_is_kept() {
        let doc = json!({
            "Semesters": [{
                "type": "spring",
                "year": 2025,
                "academicCalendarDates": [
                    {"dateRange": {"startDate": "2025-03-10", "endDate": "2025-03-14"},
                     "description": "Spring break", "holiday": true},
                    {"dateRange": {"startDate": "2025-03-20", "endDate": "2025-03-19"},
                     "description": "Inverted", "holiday": false}
                ]
            }]
        });
        let registries = Registries::new();
        let report = decode(&doc, &registries).unwrap();
        assert_eq!(report.semesters.loaded, 1);
        assert_eq!(report.semesters.skipped, 1);

        let spring = registries.semesters.get_semester(SemesterType::Spring, 2025);
        let dates = spring.cal_dates();
        assert_eq!(dates.len(), 1);
        assert!(dates[0].is_holiday());
    }

    #[test]
    fn test_duplicate_schedule_day_keeps_later_range() {
        let value = json!({
            "title": "Gym", "observesHoliday": false, "category": "HEALTH", "location": null,
            "schedule": [
                {"days": ["MONDAY", "WEDNESDAY"], "range": {"startTime": "07:00:00", "endTime": "08:00:00"}},
                {"days": ["MONDAY"], "range": {"startTime": "18:00:00", "endTime": "19:00:00"}}
            ]
        });
        let event = decode_event(&value).unwrap();
        let monday = event.schedule().time_for(DayOfWeek::Monday).unwrap();
        assert_eq!(monday.start(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        let wednesday = event.schedule().time_for(DayOfWeek::Wednesday).unwrap();
        assert_eq!(wednesday.start(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn test_malformed_calendar_dates_leave_semester_alone() {
        let registries = Registries::new();
        let fall = registries.semesters.get_semester(SemesterType::Fall, 2024);
        fall.add_cal_date_text("Oct 14-15", "Fall break (No classes)").unwrap();

        let doc = json!({
            "Semesters": [{"type": "Fall", "year": 2024, "academicCalendarDates": "oops"}]
        });
        let report = decode(&doc, &registries).unwrap();
        assert_eq!(report.semesters.loaded, 0);
        assert_eq!(report.semesters.skipped, 1);
        assert_eq!(fall.cal_dates().len(), 1);

        let without_dates = [
            json!({"type": "Fall", "year": 2024, "academicCalendarDates": null}),
            json!({"type": "Fall", "year": 2024}),
        ];
        for element in without_dates {
            let report = decode(&json!({"Semesters": [element]}), &registries).unwrap();
            assert_eq!(report.semesters.loaded, 1);
            assert_eq!(fall.cal_dates().len(), 1);
        }

        let doc = json!({
            "Semesters": [{"type": "Fall", "year": 2024, "academicCalendarDates": []}]
        });
        decode(&doc, &registries).unwrap();
        assert!(fall.cal_dates().is_empty());
    }

    #[test]
    fn test_non_object_root_is_an_error() {
        let registries = Registries::new();
        assert!(decode(&json!([1, 2, 3]), &registries).is_err());
        assert!(decode(&json!("text"), &registries).is_err());
        assert!(decode(&json!({}), &registries).unwrap().sections().iter().all(|(_, s)| !s.present));
    }
}
