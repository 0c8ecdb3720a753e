//! Demonstration dataset: one course, its section and calendar event, one
//! personal activity, one mood report and one academic calendar date, all
//! in Fall 2024.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use schedulo_core::academic::AcademicYear;
use schedulo_core::category::Category;
use schedulo_core::course::{CourseDescription, CourseInstance};
use schedulo_core::datetime::{DayOfWeek, EventSchedule, TimeRange};
use schedulo_core::event::Event;
use schedulo_core::location::Location;
use schedulo_core::mood::MoodReport;
use schedulo_core::semester::SemesterType;
use schedulo_core::Registries;

pub const DEMO_CRN: u32 = 80471;

fn time(hour: u32, minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).context("invalid time of day")
}

fn schedule(days: &[DayOfWeek], start: NaiveTime, end: NaiveTime) -> Result<EventSchedule> {
    let range = TimeRange::new(start, end)?;
    let days: BTreeMap<_, _> = days.iter().map(|&day| (day, range)).collect();
    Ok(EventSchedule::new(days)?)
}

/// Adds the demonstration entities to `registries`. Entries with the same
/// keys are replaced; the calendar date and events are appended.
pub fn seed(registries: &Registries) -> Result<()> {
    let year = AcademicYear::new(2024)?;
    let fall = year.semester(SemesterType::Fall, &registries.semesters);

    fall.add_cal_date_text("Oct 14-15", "Fall break (No classes)")?;

    let description = CourseDescription::new(
        "CSE",
        1002,
        "4",
        "Fundamentals of Software Engineering",
        year,
    )?;
    let class_time = schedule(
        &[DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday],
        time(9, 0)?,
        time(9, 50)?,
    )?;
    let instance = CourseInstance::new(
        DEMO_CRN,
        description.id(),
        "01",
        Some(class_time),
        Some(Location::on_campus("500OLS", 129)?),
        "Staff",
    );
    registries.catalog.add(description);

    let course_event = Event::for_course(&instance, &registries.catalog)?;
    registries.courses.add(&fall, instance);
    registries.calendar.add(&fall, course_event);

    let breathe = Event::activity(
        "Breathe",
        schedule(&[DayOfWeek::Tuesday, DayOfWeek::Thursday], time(7, 30)?, time(7, 45)?)?,
        Some(Location::off_campus("Riverside Park")?),
        false,
        Category::Health,
    )?;
    registries.calendar.add(&fall, breathe);

    let date = NaiveDate::from_ymd_opt(2024, 10, 14).context("invalid mood date")?;
    registries.moods.add(
        date,
        MoodReport::new(
            7,
            Category::Academic,
            "Midterm prep went better than expected.",
        )?,
    );

    Ok(())
}
