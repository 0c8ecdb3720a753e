use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::academic::AcademicYear;
use crate::course::CourseDescription;
use crate::course_id::CompactCourseId;

/// Course descriptions keyed by their compact identifier.
#[derive(Debug, Default)]
pub struct Catalog {
    descriptions: RwLock<HashMap<CompactCourseId, CourseDescription>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a description, replacing any with the same identifier.
    pub fn add(&self, description: CourseDescription) {
        self.descriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(description.id(), description);
    }

    pub fn get(&self, id: CompactCourseId) -> Option<CourseDescription> {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Every description, ordered by identifier.
    pub fn get_all(&self) -> Vec<CourseDescription> {
        let mut all: Vec<CourseDescription> = self
            .descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        all.sort_by_key(CourseDescription::id);
        all
    }

    /// Descriptions from one catalog year, ordered by identifier.
    pub fn list_by_year(&self, year: AcademicYear) -> Vec<CourseDescription> {
        let mut listed: Vec<CourseDescription> = self
            .descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|d| d.catalog_year() == year)
            .cloned()
            .collect();
        listed.sort_by_key(CourseDescription::id);
        listed
    }

    /// Catalog years with at least one description.
    pub fn academic_years(&self) -> BTreeSet<AcademicYear> {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(CourseDescription::catalog_year)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.descriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
