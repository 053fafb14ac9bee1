use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{Result, SyncError};
use crate::models::DailyObservation;

/// Ordered, append-only collection of daily observations.
///
/// Row order is preserved exactly as read or appended; the one-record-per-date
/// invariant is checked explicitly with [`Dataset::ensure_unique_dates`]
/// before any upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<DailyObservation>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<DailyObservation>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DailyObservation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: DailyObservation) {
        self.records.push(record);
    }

    /// Append all records of `batch` after the existing rows, preserving both
    /// orders.
    pub fn extend(&mut self, batch: Dataset) {
        self.records.extend(batch.records);
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.records.iter().any(|r| r.date == date)
    }

    /// Verify the at-most-one-record-per-date invariant, returning the first
    /// offending date on violation.
    pub fn ensure_unique_dates(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.date) {
                return Err(SyncError::DuplicateDate(record.date));
            }
        }
        Ok(())
    }
}

impl IntoIterator for Dataset {
    type Item = DailyObservation;
    type IntoIter = std::vec::IntoIter<DailyObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
