use crate::error::Result;
use crate::hub::HubClient;
use crate::models::{schema, DailyObservation, Dataset};

/// Reads the existing dataset from the Hub, migrating legacy column names to
/// the canonical schema.
pub struct DatasetReader<'a> {
    hub: &'a HubClient,
}

impl<'a> DatasetReader<'a> {
    pub fn new(hub: &'a HubClient) -> Self {
        Self { hub }
    }

    /// Returns `(exists, dataset)`. A missing repository or file is the
    /// expected first-run condition and yields `(false, empty)`; any other
    /// failure propagates so the caller aborts before writing anything.
    pub async fn read(&self) -> Result<(bool, Dataset)> {
        match self.hub.download_file().await? {
            None => {
                tracing::info!("No existing dataset found. Initializing new dataset.");
                Ok((false, Dataset::new()))
            }
            Some(body) => {
                let dataset = parse_csv(&body)?;
                tracing::info!("Existing dataset found ({} rows).", dataset.len());
                Ok((true, dataset))
            }
        }
    }
}

/// Parse dataset CSV, accepting canonical or legacy headers. Row order is
/// preserved.
pub fn parse_csv(content: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let header = reader.headers()?.clone();
    let canonical = schema::canonicalize(&header)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let observation: DailyObservation = row.deserialize(Some(&canonical))?;
        records.push(observation);
    }
    Ok(Dataset::from_records(records))
}
