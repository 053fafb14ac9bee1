//! Persisted CSV schema versions and header migrations.
//!
//! Datasets written by older versions of this tool carry different column
//! names. The header row identifies the schema version; a registered rename
//! table per version maps old column names forward to the canonical ones, so
//! adding a future schema change means adding one entry here rather than
//! patching the reader.

use csv::StringRecord;

use crate::error::{Result, SyncError};

/// Canonical column names, in persisted order.
pub const CANONICAL_HEADER: [&str; 3] = ["date", "humidity_percent", "pressure_hpa"];

/// Column renames applied when reading a V1 file.
const V1_RENAMES: [(&str, &str); 3] = [
    ("Date", "date"),
    ("average humidity(%)", "humidity_percent"),
    ("average pressure(hPa)", "pressure_hpa"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Legacy header: `Date,average humidity(%),average pressure(hPa)`.
    V1,
    /// Canonical header: `date,humidity_percent,pressure_hpa`.
    V2,
}

impl SchemaVersion {
    /// Identify the schema version from a header row.
    pub fn detect(header: &StringRecord) -> Result<Self> {
        if header.iter().all(is_canonical_column) {
            return Ok(SchemaVersion::V2);
        }
        if header
            .iter()
            .all(|column| v1_rename(column).is_some() || is_canonical_column(column))
        {
            return Ok(SchemaVersion::V1);
        }
        Err(SyncError::InvalidFormat(format!(
            "unrecognised dataset header: {:?}",
            header.iter().collect::<Vec<_>>()
        )))
    }
}

fn is_canonical_column(column: &str) -> bool {
    CANONICAL_HEADER.contains(&column)
}

fn v1_rename(column: &str) -> Option<&'static str> {
    V1_RENAMES
        .iter()
        .find(|(old, _)| *old == column)
        .map(|(_, new)| *new)
}

/// Rewrite a header row to canonical column names, applying the migration
/// for whatever version the header identifies as.
pub fn canonicalize(header: &StringRecord) -> Result<StringRecord> {
    SchemaVersion::detect(header)?;
    Ok(header
        .iter()
        .map(|column| v1_rename(column).unwrap_or(column))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detects_canonical_header() {
        let header = StringRecord::from(vec!["date", "humidity_percent", "pressure_hpa"]);
        assert_eq!(SchemaVersion::detect(&header).unwrap(), SchemaVersion::V2);
    }

    #[test]
    fn test_detects_legacy_header() {
        let header =
            StringRecord::from(vec!["Date", "average humidity(%)", "average pressure(hPa)"]);
        assert_eq!(SchemaVersion::detect(&header).unwrap(), SchemaVersion::V1);
    }

    #[test]
    fn test_rejects_unknown_header() {
        let header = StringRecord::from(vec!["day", "rh", "p"]);
        assert!(SchemaVersion::detect(&header).is_err());
    }

    #[test]
    fn test_canonicalize_migrates_legacy_names() {
        let header =
            StringRecord::from(vec!["Date", "average humidity(%)", "average pressure(hPa)"]);
        let migrated = canonicalize(&header).unwrap();
        assert_eq!(
            migrated,
            StringRecord::from(vec!["date", "humidity_percent", "pressure_hpa"])
        );
    }

    #[test]
    fn test_canonicalize_is_identity_on_canonical() {
        let header = StringRecord::from(vec!["date", "humidity_percent", "pressure_hpa"]);
        assert_eq!(canonicalize(&header).unwrap(), header);
    }
}
