use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use crate::mood::MoodReport;

/// At most one mood report per calendar date.
#[derive(Debug, Default)]
pub struct MoodReports {
    reports: RwLock<BTreeMap<NaiveDate, MoodReport>>,
}

impl MoodReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the report for `date`, replacing an existing one.
    pub fn add(&self, date: NaiveDate, report: MoodReport) {
        self.reports
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(date, report);
    }

    pub fn get(&self, date: NaiveDate) -> Option<MoodReport> {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&date)
            .cloned()
    }

    pub fn has(&self, date: NaiveDate) -> bool {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&date)
    }

    /// Removes and returns the report for `date`.
    pub fn remove(&self, date: NaiveDate) -> Option<MoodReport> {
        self.reports
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&date)
    }

    /// Every report, oldest date first.
    pub fn get_all(&self) -> BTreeMap<NaiveDate, MoodReport> {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.reports.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.reports
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
