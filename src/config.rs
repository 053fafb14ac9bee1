//! Run configuration.
//!
//! All parameters are supplied through the environment with the
//! `METEO_SYNC_` prefix (e.g. `METEO_SYNC_TOKEN`, `METEO_SYNC_REPO_ID`).
//! Location, timezone and file name have defaults; the Hub token and
//! repository id are required and their absence is a fatal configuration
//! error raised before any network call.

use std::str::FromStr;

use chrono_tz::Tz;
use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{Result, SyncError};

pub const ENV_PREFIX: &str = "METEO_SYNC";

const DEFAULT_LATITUDE: f64 = 12.9716;
const DEFAULT_LONGITUDE: f64 = 77.5946;
const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_FILENAME: &str = "weather_data.csv";
const DEFAULT_HUB_ENDPOINT: &str = "https://huggingface.co";
const DEFAULT_ARCHIVE_ENDPOINT: &str = "https://archive-api.open-meteo.com";

#[derive(Debug, Clone)]
pub struct Settings {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
    pub repo_id: String,
    pub filename: String,
    pub hub_endpoint: String,
    pub archive_endpoint: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "defaults::latitude")]
    latitude: f64,
    #[serde(default = "defaults::longitude")]
    longitude: f64,
    #[serde(default = "defaults::timezone")]
    timezone: String,
    repo_id: Option<String>,
    #[serde(default = "defaults::filename")]
    filename: String,
    #[serde(default = "defaults::hub_endpoint")]
    hub_endpoint: String,
    #[serde(default = "defaults::archive_endpoint")]
    archive_endpoint: String,
    token: Option<String>,
}

mod defaults {
    pub fn latitude() -> f64 {
        super::DEFAULT_LATITUDE
    }
    pub fn longitude() -> f64 {
        super::DEFAULT_LONGITUDE
    }
    pub fn timezone() -> String {
        super::DEFAULT_TIMEZONE.to_string()
    }
    pub fn filename() -> String {
        super::DEFAULT_FILENAME.to_string()
    }
    pub fn hub_endpoint() -> String {
        super::DEFAULT_HUB_ENDPOINT.to_string()
    }
    pub fn archive_endpoint() -> String {
        super::DEFAULT_ARCHIVE_ENDPOINT.to_string()
    }
}

impl Settings {
    /// Load settings from `METEO_SYNC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self> {
        let raw: RawSettings = config.try_deserialize()?;

        let token = raw.token.filter(|t| !t.is_empty()).ok_or_else(|| {
            SyncError::Config(format!("{}_TOKEN is not set", ENV_PREFIX))
        })?;
        let repo_id = raw.repo_id.filter(|r| !r.is_empty()).ok_or_else(|| {
            SyncError::Config(format!("{}_REPO_ID is not set", ENV_PREFIX))
        })?;
        let timezone = Tz::from_str(&raw.timezone).map_err(|_| {
            SyncError::Config(format!("unknown timezone: {}", raw.timezone))
        })?;

        Ok(Self {
            latitude: raw.latitude,
            longitude: raw.longitude,
            timezone,
            repo_id,
            filename: raw.filename,
            hub_endpoint: raw.hub_endpoint,
            archive_endpoint: raw.archive_endpoint,
            token,
        })
    }
}
