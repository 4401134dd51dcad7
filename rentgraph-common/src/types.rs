//! Core data model for the RentGraph application

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One hourly observation of rental activity
///
/// Records are immutable once loaded; every derived table is a pure function
/// of a slice of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    /// Calendar date of the observation (primary grouping key)
    pub date: NaiveDate,
    /// Year label the record is filed under
    pub year: i32,
    /// Month of the observation (1-12)
    pub month: u32,
    /// Hour of the observation (0-23)
    pub hour: u32,
    /// Day of the week the date falls on
    pub weekday: Weekday,
    /// Rentals by casual (unregistered) riders
    pub casual: u64,
    /// Rentals by registered riders
    pub registered: u64,
    /// Total rentals; always `casual + registered`
    pub total: u64,
}

impl RentalRecord {
    /// Build a record for a date and hour, deriving year, month, and weekday
    /// from the date and the total from the two rider counts.
    pub fn new(date: NaiveDate, hour: u32, casual: u64, registered: u64) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            hour,
            weekday: date.weekday(),
            casual,
            registered,
            total: casual + registered,
        }
    }

    /// Whether the stored total matches the sum of the rider counts
    pub fn is_consistent(&self) -> bool {
        self.total == self.casual + self.registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_fields_from_date() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let record = RentalRecord::new(date, 5, 3, 13);

        assert_eq!(record.year, 2011);
        assert_eq!(record.month, 1);
        assert_eq!(record.hour, 5);
        assert_eq!(record.weekday, Weekday::Sat); // 2011-01-01 was a Saturday
        assert_eq!(record.total, 16);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_is_consistent_detects_mismatch() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let mut record = RentalRecord::new(date, 0, 3, 13);
        record.total = 99;
        assert!(!record.is_consistent());
    }
}
