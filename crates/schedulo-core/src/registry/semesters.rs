use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::semester::{Semester, SemesterKey, SemesterType};

/// Interning table for [`Semester`] values.
///
/// [`Semesters::get_semester`] is the only way to obtain a `Semester`.
/// Every call for the same type and year returns a handle to the same
/// object, so calendar dates added through one handle are visible
/// through all of them.
#[derive(Debug, Default)]
pub struct Semesters {
    table: RwLock<BTreeMap<SemesterKey, Arc<Semester>>>,
}

impl Semesters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the semester for `(kind, year)`, creating it on first use.
    pub fn get_semester(&self, kind: SemesterType, year: u16) -> Arc<Semester> {
        self.intern(SemesterKey::new(kind, year))
    }

    /// Parses a `"<Type> <year>"` token such as `"Fall 2024"` and returns
    /// the matching semester. Malformed tokens yield `None`.
    pub fn get_semester_by_name(&self, name: &str) -> Option<Arc<Semester>> {
        let key: SemesterKey = name.parse().ok()?;
        Some(self.intern(key))
    }

    pub fn intern(&self, key: SemesterKey) -> Arc<Semester> {
        if let Some(existing) = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(existing);
        }
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            table
                .entry(key)
                .or_insert_with(|| Arc::new(Semester::new(key))),
        )
    }

    /// Looks up a semester without creating it.
    pub fn get(&self, key: SemesterKey) -> Option<Arc<Semester>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Every loaded semester, oldest first.
    pub fn get_all(&self) -> Vec<Arc<Semester>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every semester and empties their calendar-date lists.
    ///
    /// Handles obtained earlier stay valid but are no longer the
    /// canonical instance for their key.
    pub fn clear(&self) {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        for semester in table.values() {
            semester.clear_cal_dates();
        }
        table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_returns_same_object() {
        let semesters = Semesters::new();
        let a = semesters.get_semester(SemesterType::Fall, 2024);
        let b = semesters.get_semester(SemesterType::Fall, 2024);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(semesters.len(), 1);
    }

    #[test]
    fn test_racing_lookups_share_one_object() {
        let semesters = Semesters::new();
        let handles: Vec<Arc<Semester>> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|i| {
                    let semesters = &semesters;
                    scope.spawn(move || {
                        if i % 2 == 0 {
                            semesters.get_semester(SemesterType::Fall, 2024)
                        } else {
                            semesters.get_semester_by_name("Fall 2024").unwrap()
                        }
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(semesters.len(), 1);
        let canonical = semesters.get_semester(SemesterType::Fall, 2024);
        for handle in &handles {
            assert!(Arc::ptr_eq(handle, &canonical));
        }
    }

    #[test]
    fn test_by_name_matches_canonical() {
        let semesters = Semesters::new();
        let a = semesters.get_semester(SemesterType::Fall, 2024);
        let b = semesters.get_semester_by_name("fall 2024").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_malformed_name_is_absent() {
        let semesters = Semesters::new();
        assert!(semesters.get_semester_by_name("Autumn 2024").is_none());
        assert!(semesters.get_semester_by_name("Fall").is_none());
        assert!(semesters.get_semester_by_name("").is_none());
        assert!(semesters.is_empty());
    }

    #[test]
    fn test_shared_calendar_dates() {
        let semesters = Semesters::new();
        semesters
            .get_semester(SemesterType::Fall, 2024)
            .add_cal_date_text("Oct 14-15", "Fall break (No classes)")
            .unwrap();
        let again = semesters.get_semester(SemesterType::Fall, 2024);
        assert_eq!(again.cal_dates().len(), 1);
    }

    #[test]
    fn test_get_all_is_chronological() {
        let semesters = Semesters::new();
        semesters.get_semester(SemesterType::Fall, 2024);
        semesters.get_semester(SemesterType::Spring, 2024);
        semesters.get_semester(SemesterType::Fall, 2023);
        let names: Vec<String> = semesters.get_all().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["Fall 2023", "Spring 2024", "Fall 2024"]);
    }

    #[test]
    fn test_clear() {
        let semesters = Semesters::new();
        let fall = semesters.get_semester(SemesterType::Fall, 2024);
        fall.add_cal_date_text("Oct 14", "Break").unwrap();
        semesters.clear();
        assert!(semesters.is_empty());
        assert!(semesters.get(fall.key()).is_none());
        let fresh = semesters.get_semester(SemesterType::Fall, 2024);
        assert!(!Arc::ptr_eq(&fall, &fresh));
        assert!(fresh.cal_dates().is_empty());
    }
}
