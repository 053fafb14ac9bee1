//! Daily aggregate fetcher for the Open-Meteo historical archive API.

use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::models::{DailyObservation, Dataset, FetchRange};

const ARCHIVE_PATH: &str = "/v1/archive";
const DAILY_METRICS: &str = "relative_humidity_2m_mean,surface_pressure_mean";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    relative_humidity_2m_mean: Vec<Option<f64>>,
    surface_pressure_mean: Vec<Option<f64>>,
}

pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    timezone: Tz,
}

impl OpenMeteoClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.archive_endpoint.clone(),
            latitude: settings.latitude,
            longitude: settings.longitude,
            timezone: settings.timezone,
        })
    }

    /// Fetch daily humidity and pressure aggregates for the given range.
    ///
    /// This is the one place provider field names are translated to the
    /// canonical schema. Days the provider reports with a null metric are
    /// dropped with a warning.
    pub async fn fetch_daily(&self, range: &FetchRange) -> Result<Dataset> {
        let url = format!("{}{}", self.base_url, ARCHIVE_PATH);
        tracing::info!(
            "Fetching weather data from {} to {}",
            range.start(),
            range.end()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("start_date", range.start().to_string()),
                ("end_date", range.end().to_string()),
                ("daily", DAILY_METRICS.to_string()),
                ("timezone", self.timezone.name().to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let archive: ArchiveResponse = response.json().await?;
        Self::into_dataset(archive.daily)
    }

    fn into_dataset(daily: DailyBlock) -> Result<Dataset> {
        if daily.time.len() != daily.relative_humidity_2m_mean.len()
            || daily.time.len() != daily.surface_pressure_mean.len()
        {
            return Err(SyncError::InvalidFormat(format!(
                "archive response arrays disagree in length: {} dates, {} humidity, {} pressure",
                daily.time.len(),
                daily.relative_humidity_2m_mean.len(),
                daily.surface_pressure_mean.len()
            )));
        }

        let mut dataset = Dataset::new();
        for ((date, humidity), pressure) in daily
            .time
            .into_iter()
            .zip(daily.relative_humidity_2m_mean)
            .zip(daily.surface_pressure_mean)
        {
            match (humidity, pressure) {
                (Some(humidity_percent), Some(pressure_hpa)) => {
                    dataset.push(DailyObservation::new(date, humidity_percent, pressure_hpa));
                }
                _ => tracing::warn!("Skipping {}: provider reported no value", date),
            }
        }
        Ok(dataset)
    }
}
