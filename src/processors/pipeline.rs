//! One full sync run: read, plan, fetch, write.

use chrono::{Duration, NaiveDate, Utc};

use crate::config::Settings;
use crate::error::Result;
use crate::fetchers::OpenMeteoClient;
use crate::hub::HubClient;
use crate::models::{Dataset, FetchRange};
use crate::processors::merge_planner::{plan, SyncAction};
use crate::readers::DatasetReader;
use crate::writers::DatasetWriter;

/// How a run ended. Fetch failures end the run as `Aborted` without a write;
/// configuration, read-access and upload failures surface as errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Dataset rebuilt and uploaded.
    Uploaded { rows: usize },
    /// Yesterday was already recorded; nothing fetched, nothing written.
    SkippedUpToDate,
    /// No usable data came back from the weather API; nothing written.
    Aborted(String),
}

pub struct SyncPipeline {
    settings: Settings,
    hub: HubClient,
    fetcher: OpenMeteoClient,
}

impl SyncPipeline {
    pub fn new(settings: Settings) -> Result<Self> {
        let hub = HubClient::new(&settings)?;
        let fetcher = OpenMeteoClient::new(&settings)?;
        Ok(Self {
            settings,
            hub,
            fetcher,
        })
    }

    /// Current date in the configured timezone, not the host timezone.
    /// Computed once per run and passed through so every decision agrees on
    /// what "yesterday" means.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.settings.timezone).date_naive()
    }

    /// Read the remote dataset and report the action a run would take,
    /// without fetching or writing.
    pub async fn plan_only(&self, today: NaiveDate) -> Result<SyncAction> {
        let (exists, existing) = DatasetReader::new(&self.hub).read().await?;
        Ok(plan(exists, &existing, today))
    }

    pub async fn run(&self, today: NaiveDate) -> Result<RunOutcome> {
        let yesterday = today - Duration::days(1);
        let (exists, existing) = DatasetReader::new(&self.hub).read().await?;

        let final_dataset = match plan(exists, &existing, today) {
            SyncAction::SkipUpToDate => {
                tracing::info!("Data for {} already exists. Skipping update.", yesterday);
                return Ok(RunOutcome::SkippedUpToDate);
            }
            SyncAction::Backfill(range) => match self.fetch(&range).await {
                Some(batch) => {
                    tracing::info!("Generated {}-day backfill data.", batch.len());
                    batch
                }
                None => return Ok(RunOutcome::Aborted("no data fetched".to_string())),
            },
            SyncAction::Append(date) => {
                match self.fetch(&FetchRange::single_day(date)).await {
                    Some(batch) => {
                        tracing::info!("Appended data for {}.", date);
                        let mut merged = existing;
                        merged.extend(batch);
                        merged
                    }
                    None => return Ok(RunOutcome::Aborted("no new data fetched".to_string())),
                }
            }
        };

        DatasetWriter::new(&self.hub)
            .write(&final_dataset, yesterday)
            .await?;
        Ok(RunOutcome::Uploaded {
            rows: final_dataset.len(),
        })
    }

    /// Fetch a range, folding transport and parse failures into `None` so
    /// they abort the run instead of propagating past the pipeline.
    async fn fetch(&self, range: &FetchRange) -> Option<Dataset> {
        match self.fetcher.fetch_daily(range).await {
            Ok(batch) if !batch.is_empty() => Some(batch),
            Ok(_) => {
                tracing::warn!("Weather API returned no rows for {:?}", range);
                None
            }
            Err(e) => {
                tracing::error!("Error fetching weather data: {}", e);
                None
            }
        }
    }
}
