//! Course sources and the ingest step that feeds them into the registries.
//!
//! ```text
//! CourseSource::scan() ──► CourseBatch ──► ingest() ──► Catalog + Courses
//! ```
//!
//! A source knows how to fetch course descriptions and scheduled sections
//! from somewhere (a scraped registrar page, a fixture file). Ingest knows
//! nothing about where they came from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use schedulo_core::course::{CourseDescription, CourseInstance};
use schedulo_core::document::{decode_description, decode_instance};
use schedulo_core::Registries;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Everything one scan produced. Instances carry the semester name they
/// belong to, e.g. `"Fall 2024"`.
#[derive(Debug, Clone, Default)]
pub struct CourseBatch {
    pub descriptions: Vec<CourseDescription>,
    pub instances: Vec<(String, CourseInstance)>,
}

/// A producer of course data.
///
/// Implementations do their own fetching and parsing, then hand back a
/// [`CourseBatch`] for [`ingest`] to merge.
pub trait CourseSource {
    /// Short label used in logs.
    fn name(&self) -> &str;

    fn scan(&self) -> Result<CourseBatch>;
}

/// Counts reported by [`ingest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub descriptions: usize,
    pub instances: usize,
    pub skipped: usize,
}

/// Scans `source` and merges the result into the registries. Descriptions
/// replace catalog entries with the same ID; instances replace sections
/// with the same CRN in the same semester.
pub fn ingest(source: &dyn CourseSource, registries: &Registries) -> Result<IngestStats> {
    let batch = source
        .scan()
        .with_context(|| format!("Source '{}' failed to scan", source.name()))?;

    let mut stats = IngestStats::default();

    for description in batch.descriptions {
        registries.catalog.add(description);
        stats.descriptions += 1;
    }

    for (semester_name, instance) in batch.instances {
        let Some(semester) = registries.semesters.get_semester_by_name(&semester_name) else {
            warn!(
                source = source.name(),
                semester = %semester_name,
                crn = instance.crn(),
                "skipping course instance with unrecognized semester"
            );
            stats.skipped += 1;
            continue;
        };
        registries.courses.add(&semester, instance);
        stats.instances += 1;
    }

    info!(
        source = source.name(),
        descriptions = stats.descriptions,
        instances = stats.instances,
        skipped = stats.skipped,
        "ingested course source"
    );
    Ok(stats)
}

// ============ JSON file source ============

/// Reads a fixture file of the form
///
/// ```json
/// {
///   "descriptions": [ <Catalog element>, ... ],
///   "instances": { "Fall 2024": [ <Courses element>, ... ] }
/// }
/// ```
///
/// Elements use the same layout as the storage document. A malformed
/// element is logged and left out of the batch; a malformed file is an
/// error.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CourseSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn scan(&self) -> Result<CourseBatch> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read course file: {}", self.path.display()))?;
        let root: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse course file: {}", self.path.display()))?;
        let Some(root) = root.as_object() else {
            bail!("Course file root must be a JSON object");
        };

        let mut batch = CourseBatch::default();

        match root.get("descriptions") {
            None => debug!("course file has no descriptions"),
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    match decode_description(item) {
                        Ok(description) => batch.descriptions.push(description),
                        Err(err) => warn!(index, error = %err, "skipping course description"),
                    }
                }
            }
            Some(_) => bail!("'descriptions' must be an array"),
        }

        match root.get("instances") {
            None => debug!("course file has no instances"),
            Some(Value::Object(by_semester)) => {
                for (semester, items) in by_semester {
                    let Some(items) = items.as_array() else {
                        warn!(semester = %semester, "instances entry is not an array");
                        continue;
                    };
                    for (index, item) in items.iter().enumerate() {
                        match decode_instance(item) {
                            Ok(instance) => batch.instances.push((semester.clone(), instance)),
                            Err(err) => warn!(
                                semester = %semester,
                                index,
                                error = %err,
                                "skipping course instance"
                            ),
                        }
                    }
                }
            }
            Some(_) => bail!("'instances' must be an object keyed by semester"),
        }

        Ok(batch)
    }
}
