use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// One day of aggregated weather observations for the configured location.
///
/// Field names double as the canonical CSV column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub humidity_percent: f64,
    pub pressure_hpa: f64,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, humidity_percent: f64, pressure_hpa: f64) -> Self {
        Self {
            date,
            humidity_percent,
            pressure_hpa,
        }
    }
}

/// Inclusive calendar-date range for an archive query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl FetchRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SyncError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Range covering `days_back + 1` days up to and including `end`.
    pub fn ending_at(end: NaiveDate, days_back: i64) -> Self {
        Self {
            start: end - Duration::days(days_back),
            end,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
