//! Data aggregation over the rental record set
//!
//! Every aggregator is a pure function of (records, filter parameters):
//! no mutation of input, no shared state, no caching. Filters that match
//! nothing degrade to empty or zero-valued results instead of failing.

use crate::{HourlyDataPoint, MonthlyDataPoint, WeekdayDataPoint};
use chrono::NaiveDate;
use rentgraph_common::{utils, RentalRecord, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Summed rider counts over a filtered slice of the dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalTotals {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl RentalTotals {
    fn accumulate(&mut self, record: &RentalRecord) {
        self.casual += record.casual;
        self.registered += record.registered;
        self.total += record.total;
    }
}

/// Trait for aggregating records into a derived table
pub trait Aggregate {
    type Output;

    /// Produce the derived table for this aggregator's parameters
    fn aggregate(&self, records: &[RentalRecord]) -> Result<Self::Output>;
}

/// Aggregator for rider totals across a set of selected years
#[derive(Debug)]
pub struct YearTotalsAggregator {
    /// Year labels to include; an empty set matches nothing
    pub selected_years: HashSet<i32>,
}

impl YearTotalsAggregator {
    pub fn new(selected_years: HashSet<i32>) -> Self {
        Self { selected_years }
    }
}

impl Aggregate for YearTotalsAggregator {
    type Output = RentalTotals;

    #[instrument(skip(self, records))]
    fn aggregate(&self, records: &[RentalRecord]) -> Result<RentalTotals> {
        let mut totals = RentalTotals::default();

        for record in records {
            if self.selected_years.contains(&record.year) {
                totals.accumulate(record);
            }
        }

        debug!(
            "Aggregated totals for {} selected years: {} rentals",
            self.selected_years.len(),
            totals.total
        );
        Ok(totals)
    }
}

/// Aggregator for monthly rental totals across selected years
#[derive(Debug)]
pub struct MonthlyTrendAggregator {
    /// Year labels to include; an empty set matches nothing
    pub selected_years: HashSet<i32>,
}

impl MonthlyTrendAggregator {
    pub fn new(selected_years: HashSet<i32>) -> Self {
        Self { selected_years }
    }
}

impl Aggregate for MonthlyTrendAggregator {
    type Output = Vec<MonthlyDataPoint>;

    #[instrument(skip(self, records))]
    fn aggregate(&self, records: &[RentalRecord]) -> Result<Vec<MonthlyDataPoint>> {
        let mut monthly_totals: HashMap<(i32, u32), u64> = HashMap::new();

        for record in records {
            if self.selected_years.contains(&record.year) {
                *monthly_totals.entry((record.year, record.month)).or_insert(0) += record.total;
            }
        }

        let mut result: Vec<MonthlyDataPoint> = monthly_totals
            .into_iter()
            .map(|((year, month), total)| MonthlyDataPoint {
                year,
                month,
                total,
                label: Some(format!("{} {} - {} rentals", utils::month_abbr(month), year, total)),
            })
            .collect();

        // Sort by year then month; months absent from the data are not emitted
        result.sort_by_key(|point| (point.year, point.month));

        debug!("Aggregated {} monthly trend data points", result.len());
        Ok(result)
    }
}

/// Aggregator for rider totals on a single calendar date
#[derive(Debug)]
pub struct DateTotalsAggregator {
    /// Date to slice on; a date absent from the data yields zero totals
    pub date: NaiveDate,
}

impl DateTotalsAggregator {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Aggregate for DateTotalsAggregator {
    type Output = RentalTotals;

    #[instrument(skip(self, records))]
    fn aggregate(&self, records: &[RentalRecord]) -> Result<RentalTotals> {
        let mut totals = RentalTotals::default();

        for record in records {
            if record.date == self.date {
                totals.accumulate(record);
            }
        }

        debug!("Aggregated totals for {}: {} rentals", self.date, totals.total);
        Ok(totals)
    }
}

/// Aggregator for the hourly series of a single calendar date
#[derive(Debug)]
pub struct HourlySeriesAggregator {
    /// Date to slice on; a date absent from the data yields an empty series
    pub date: NaiveDate,
}

impl HourlySeriesAggregator {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Aggregate for HourlySeriesAggregator {
    type Output = Vec<HourlyDataPoint>;

    #[instrument(skip(self, records))]
    fn aggregate(&self, records: &[RentalRecord]) -> Result<Vec<HourlyDataPoint>> {
        let mut hourly_counts: HashMap<u32, (u64, u64, u64)> = HashMap::new();

        for record in records {
            if record.date == self.date {
                let entry = hourly_counts.entry(record.hour).or_insert((0, 0, 0));
                entry.0 += record.casual;
                entry.1 += record.registered;
                entry.2 += record.total;
            }
        }

        let mut result: Vec<HourlyDataPoint> = hourly_counts
            .into_iter()
            .map(|(hour, (casual, registered, total))| HourlyDataPoint {
                hour,
                casual,
                registered,
                total,
                label: Some(format!("{:02}:00 - {} rentals", hour, total)),
            })
            .collect();

        // Sort by hour; hours with no records are not emitted
        result.sort_by_key(|point| point.hour);

        debug!("Aggregated {} hourly data points for {}", result.len(), self.date);
        Ok(result)
    }
}

/// Aggregator for per-weekday average rider counts
///
/// Averages are per calendar day: a weekday's summed counts are divided by
/// the number of distinct dates falling on that weekday across the whole
/// record set, never by the number of hourly rows.
#[derive(Debug)]
pub struct WeekdayAveragesAggregator;

impl WeekdayAveragesAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregate for WeekdayAveragesAggregator {
    type Output = Vec<WeekdayDataPoint>;

    #[instrument(skip(self, records))]
    fn aggregate(&self, records: &[RentalRecord]) -> Result<Vec<WeekdayDataPoint>> {
        let mut casual_sums = [0u64; 7];
        let mut registered_sums = [0u64; 7];
        let mut distinct_dates: [HashSet<NaiveDate>; 7] = Default::default();

        for record in records {
            let index = utils::weekday_index(record.weekday);
            casual_sums[index] += record.casual;
            registered_sums[index] += record.registered;
            distinct_dates[index].insert(record.date);
        }

        let result = utils::WEEKDAYS
            .iter()
            .enumerate()
            .map(|(index, weekday)| {
                let days = distinct_dates[index].len() as f64;
                let (avg_casual, avg_registered) = if days > 0.0 {
                    (casual_sums[index] as f64 / days, registered_sums[index] as f64 / days)
                } else {
                    (0.0, 0.0)
                };
                WeekdayDataPoint {
                    weekday: *weekday,
                    avg_casual,
                    avg_registered,
                    label: Some(format!(
                        "{} - {:.1} rentals/day",
                        utils::weekday_name(*weekday),
                        avg_casual + avg_registered
                    )),
                }
            })
            .collect();

        debug!("Aggregated weekday averages over {} records", records.len());
        Ok(result)
    }
}

impl Default for WeekdayAveragesAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Facade exposing every derived table as a single call
///
/// All methods are pure and cheap; callers recompute on every filter change
/// instead of caching results.
#[derive(Debug, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rider totals across the selected years; empty selection yields zeros
    pub fn totals_for_years(
        &self,
        records: &[RentalRecord],
        selected_years: &HashSet<i32>,
    ) -> Result<RentalTotals> {
        YearTotalsAggregator::new(selected_years.clone()).aggregate(records)
    }

    /// Monthly rental totals per (year, month) across the selected years
    pub fn monthly_trend(
        &self,
        records: &[RentalRecord],
        selected_years: &HashSet<i32>,
    ) -> Result<Vec<MonthlyDataPoint>> {
        MonthlyTrendAggregator::new(selected_years.clone()).aggregate(records)
    }

    /// Rider totals for one calendar date; an absent date yields zeros
    pub fn totals_for_date(&self, records: &[RentalRecord], date: NaiveDate) -> Result<RentalTotals> {
        DateTotalsAggregator::new(date).aggregate(records)
    }

    /// Hourly rider counts for one calendar date, sorted by hour
    pub fn hourly_series(
        &self,
        records: &[RentalRecord],
        date: NaiveDate,
    ) -> Result<Vec<HourlyDataPoint>> {
        HourlySeriesAggregator::new(date).aggregate(records)
    }

    /// Per-weekday average rider counts over the whole record set,
    /// Monday through Sunday
    pub fn weekday_averages(&self, records: &[RentalRecord]) -> Result<Vec<WeekdayDataPoint>> {
        WeekdayAveragesAggregator::new().aggregate(records)
    }
}
