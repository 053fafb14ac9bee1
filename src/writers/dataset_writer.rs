use chrono::NaiveDate;

use crate::error::{Result, SyncError};
use crate::hub::HubClient;
use crate::models::{schema, Dataset};

/// Serializes the full dataset to canonical CSV and replaces the remote file.
pub struct DatasetWriter<'a> {
    hub: &'a HubClient,
}

impl<'a> DatasetWriter<'a> {
    pub fn new(hub: &'a HubClient) -> Self {
        Self { hub }
    }

    /// Upload the dataset as a whole-file replace, with a commit message
    /// naming the date covered by this run.
    ///
    /// The one-record-per-date invariant is enforced here: a duplicate date
    /// is an error, never silently persisted.
    pub async fn write(&self, dataset: &Dataset, run_date: NaiveDate) -> Result<()> {
        dataset.ensure_unique_dates()?;
        let content = to_csv(dataset)?;
        let message = format!("Update weather data: {}", run_date);

        tracing::info!("Uploading updated dataset ({} rows)...", dataset.len());
        self.hub.upload_file(&content, &message).await
    }
}

/// Serialize header plus all rows, in memory order.
pub fn to_csv(dataset: &Dataset) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    writer.write_record(schema::CANONICAL_HEADER)?;
    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| SyncError::InvalidFormat(format!("CSV buffer error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| SyncError::InvalidFormat(format!("CSV output was not UTF-8: {}", e)))
}
