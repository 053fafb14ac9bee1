//! Decides what a sync run should do, given what already exists remotely.

use chrono::{Duration, NaiveDate};

use crate::models::{Dataset, FetchRange};

/// Days fetched before yesterday on a first-run backfill (31 days total,
/// ending the day before today).
pub const BACKFILL_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// No dataset exists yet: fetch the full historical window.
    Backfill(FetchRange),
    /// Dataset exists but yesterday is missing: fetch that single day.
    Append(NaiveDate),
    /// Yesterday is already recorded: nothing to fetch, nothing to write.
    SkipUpToDate,
}

impl SyncAction {
    pub fn describe(&self) -> String {
        match self {
            SyncAction::Backfill(range) => format!(
                "backfill {} days ({} to {})",
                range.days(),
                range.start(),
                range.end()
            ),
            SyncAction::Append(date) => format!("append {}", date),
            SyncAction::SkipUpToDate => "up to date".to_string(),
        }
    }
}

/// Choose the action for this run. `today` is computed once at run start in
/// the configured timezone; the decision compares exact calendar dates.
pub fn plan(exists: bool, existing: &Dataset, today: NaiveDate) -> SyncAction {
    let yesterday = today - Duration::days(1);

    if !exists {
        return SyncAction::Backfill(FetchRange::ending_at(yesterday, BACKFILL_DAYS));
    }
    if existing.contains_date(yesterday) {
        return SyncAction::SkipUpToDate;
    }
    SyncAction::Append(yesterday)
}
