use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::course::CourseInstance;
use crate::semester::{Semester, SemesterKey};

/// Course instances grouped by semester, unique by CRN within a semester.
#[derive(Debug, Default)]
pub struct Courses {
    by_semester: RwLock<BTreeMap<SemesterKey, BTreeMap<u32, CourseInstance>>>,
}

impl Courses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an instance, replacing any with the same CRN in `semester`.
    pub fn add(&self, semester: &Semester, instance: CourseInstance) {
        self.by_semester
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(semester.key())
            .or_default()
            .insert(instance.crn(), instance);
    }

    pub fn get(&self, semester: &Semester, crn: u32) -> Option<CourseInstance> {
        self.by_semester
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&semester.key())
            .and_then(|instances| instances.get(&crn))
            .cloned()
    }

    /// Instances offered in `semester`, ordered by CRN.
    pub fn list_by_semester(&self, semester: &Semester) -> Vec<CourseInstance> {
        self.by_semester
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&semester.key())
            .map(|instances| instances.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Semesters with at least one instance, oldest first.
    pub fn semesters(&self) -> Vec<SemesterKey> {
        self.by_semester
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, instances)| !instances.is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Every instance with the semester it belongs to.
    pub fn all_instances(&self) -> Vec<(SemesterKey, CourseInstance)> {
        self.by_semester
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .flat_map(|(key, instances)| instances.values().map(move |i| (*key, i.clone())))
            .collect()
    }

    /// Total number of instances across all semesters.
    pub fn len(&self) -> usize {
        self.by_semester
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.by_semester
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
