//! Human-readable overviews of the store file and of loaded registries.
//!
//! Used by `schedulo status` (no password needed) and `schedulo summary`.

use std::collections::{BTreeMap, BTreeSet};

use schedulo_core::document::DecodeReport;
use schedulo_core::semester::SemesterKey;
use schedulo_core::Registries;

use crate::storage::{EncryptedStore, StoreError, StoreInfo};

/// Print the state of the storage file. A missing file is reported, not
/// treated as an error.
pub fn print_status(store: &EncryptedStore) -> Result<(), StoreError> {
    println!("Schedulo Storage Status");
    println!("=======================");
    println!();
    println!("  File:        {}", store.path().display());

    match store.inspect() {
        Ok(info) => print_info(&info),
        Err(StoreError::NotFound(_)) => println!("  State:       no data yet"),
        Err(err) => return Err(err),
    }

    println!();
    Ok(())
}

fn print_info(info: &StoreInfo) {
    println!("  State:       present");
    println!("  Size:        {}", format_bytes(info.size));
    println!("  IV:          {}", info.iv_hex);
    println!("  SHA-256:     {}", info.sha256);
}

/// Rows of the per-semester table: semester, instances, events, calendar dates.
fn semester_rows(registries: &Registries) -> Vec<(SemesterKey, usize, usize, usize)> {
    let mut keys: BTreeSet<SemesterKey> = registries
        .semesters
        .get_all()
        .iter()
        .filter(|s| !s.cal_dates().is_empty())
        .map(|s| s.key())
        .collect();
    keys.extend(registries.courses.semesters());
    keys.extend(registries.calendar.semesters());

    let all_events = registries.calendar.get_all();
    let mut course_counts: BTreeMap<SemesterKey, usize> = BTreeMap::new();
    for (key, _) in registries.courses.all_instances() {
        *course_counts.entry(key).or_default() += 1;
    }
    keys.into_iter()
        .map(|key| {
            (
                key,
                course_counts.get(&key).copied().unwrap_or(0),
                all_events.get(&key).map_or(0, Vec::len),
                registries
                    .semesters
                    .get(key)
                    .map_or(0, |semester| semester.cal_dates().len()),
            )
        })
        .collect()
}

/// Print registry counts and a per-semester breakdown.
pub fn print_summary(registries: &Registries, report: Option<&DecodeReport>) {
    println!("Schedulo Summary");
    println!("================");
    println!();
    println!("  Semesters:   {}", registries.semesters.len());
    println!("  Catalog:     {}", registries.catalog.len());
    println!("  Courses:     {}", registries.courses.len());
    println!("  Events:      {}", registries.calendar.len());
    println!("  Moods:       {}", registries.moods.len());

    let years = registries.catalog.academic_years();
    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(ToString::to_string).collect();
        println!("  Catalog years: {}", years.join(", "));
    }

    let rows = semester_rows(registries);
    if !rows.is_empty() {
        println!();
        println!("  By semester:");
        println!(
            "  {:<16} {:>8} {:>8} {:>10}",
            "SEMESTER", "COURSES", "EVENTS", "CAL DATES"
        );
        println!("  {}", "-".repeat(46));
        for (key, courses, events, dates) in rows {
            println!(
                "  {:<16} {:>8} {:>8} {:>10}",
                key.to_string(),
                courses,
                events,
                dates
            );
        }
    }

    if let Some(report) = report {
        if report.skipped() > 0 {
            println!();
            println!("  Skipped while loading:");
            for (section, counts) in report.sections() {
                if counts.skipped > 0 {
                    println!("  {:<16} {:>8}", section, counts.skipped);
                }
            }
        }
    }

    println!();
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
