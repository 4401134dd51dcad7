//! Dataset loading and access for hourly rental records

use crate::{utils, RentGraphError, RentalRecord, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Column names the data file header must contain
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "dteday",
    "yr",
    "mnth",
    "hr",
    "weekday",
    "casual",
    "registered",
    "cnt",
];

/// One row of the data file, as it appears on disk
#[derive(Debug, Deserialize)]
struct RawRecord {
    dteday: String,
    yr: i32,
    mnth: u32,
    hr: u32,
    weekday: String,
    casual: u64,
    registered: u64,
    cnt: u64,
}

impl RawRecord {
    /// Validate and convert a raw row into a [`RentalRecord`]
    ///
    /// `line` is the 1-based data record number, used in error messages.
    fn into_record(self, line: u64) -> Result<RentalRecord> {
        let date = NaiveDate::parse_from_str(&self.dteday, "%Y-%m-%d").map_err(|e| {
            RentGraphError::dataset_at(format!("unparseable date '{}': {}", self.dteday, e), line)
        })?;

        if !(1..=12).contains(&self.mnth) {
            return Err(RentGraphError::dataset_at(
                format!("month {} out of range 1-12", self.mnth),
                line,
            ));
        }

        if self.hr > 23 {
            return Err(RentGraphError::dataset_at(
                format!("hour {} out of range 0-23", self.hr),
                line,
            ));
        }

        let weekday = utils::parse_weekday(&self.weekday).ok_or_else(|| {
            RentGraphError::dataset_at(format!("unknown weekday '{}'", self.weekday), line)
        })?;

        if self.cnt != self.casual + self.registered {
            return Err(RentGraphError::dataset_at(
                format!(
                    "total {} does not equal casual {} + registered {}",
                    self.cnt, self.casual, self.registered
                ),
                line,
            ));
        }

        Ok(RentalRecord {
            date,
            year: self.yr,
            month: self.mnth,
            hour: self.hr,
            weekday,
            casual: self.casual,
            registered: self.registered,
            total: self.cnt,
        })
    }
}

/// The full record set, loaded once and immutable for the session
///
/// All aggregation queries run against `records()` slices; the dataset
/// itself only answers structural questions (years present, date range).
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RentalRecord>,
}

impl Dataset {
    /// Load the dataset from a delimited text file with a header row
    ///
    /// Loading is all-or-nothing: any malformed row aborts the load with a
    /// descriptive error and no partial dataset is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading rental dataset from {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                RentGraphError::dataset_with_source(
                    format!("failed to open data file {}", path.display()),
                    e,
                )
            })?;

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(RentGraphError::dataset(format!(
                    "data file {} is missing required column '{}'",
                    path.display(),
                    column
                )));
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
            let line = index as u64 + 1;
            let raw = row?;
            records.push(raw.into_record(line)?);
        }

        info!(
            "Loaded {} rental records from {}",
            records.len(),
            path.display()
        );
        Ok(Self { records })
    }

    /// Build a dataset from already-validated records
    pub fn from_records(records: Vec<RentalRecord>) -> Self {
        Self { records }
    }

    /// All records, in file order
    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    /// Number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct year labels present, in ascending order
    pub fn distinct_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Earliest and latest calendar dates present
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}
