//! Report assembly and formatting for the CLI front end

use chrono::NaiveDate;
use rentgraph_common::utils;
use rentgraph_graphs::{HourlyDataPoint, MonthlyDataPoint, RentalTotals, WeekdayDataPoint};
use serde::Serialize;
use std::fmt::Write as _;

/// Complete report for one (selected years, selected date) filter choice
///
/// Plain data out of the aggregation engine; formatting never recomputes
/// anything.
#[derive(Debug, Serialize)]
pub struct Report {
    pub selected_years: Vec<i32>,
    pub selected_date: NaiveDate,
    pub previous_date: Option<NaiveDate>,
    pub year_totals: RentalTotals,
    pub monthly_trend: Vec<MonthlyDataPoint>,
    pub date_totals: RentalTotals,
    pub hourly_series: Vec<HourlyDataPoint>,
    pub previous_hourly_series: Vec<HourlyDataPoint>,
    pub weekday_averages: Vec<WeekdayDataPoint>,
}

impl Report {
    /// Render the report as plain text
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let year_list = self
            .selected_years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "Statistics for the Selected Years ({})", year_list).ok();
        writeln!(out, "  Casual Rentals:     {}", self.year_totals.casual).ok();
        writeln!(out, "  Registered Rentals: {}", self.year_totals.registered).ok();
        writeln!(out, "  Total Rentals:      {}", self.year_totals.total).ok();
        writeln!(out).ok();

        writeln!(out, "Monthly Bike Rentals Trend").ok();
        if self.monthly_trend.is_empty() {
            writeln!(out, "  no records for the selected years").ok();
        } else {
            for point in &self.monthly_trend {
                writeln!(
                    out,
                    "  {} {}  {:>8}",
                    point.year,
                    utils::month_abbr(point.month),
                    point.total
                )
                .ok();
            }
        }
        writeln!(out).ok();

        writeln!(out, "Statistics for {}", self.selected_date).ok();
        writeln!(out, "  Casual Rentals:     {}", self.date_totals.casual).ok();
        writeln!(out, "  Registered Rentals: {}", self.date_totals.registered).ok();
        writeln!(out, "  Total Rentals:      {}", self.date_totals.total).ok();
        writeln!(out).ok();

        writeln!(out, "Hourly Rentals on {}", self.selected_date).ok();
        if self.hourly_series.is_empty() {
            writeln!(out, "  no records for this date").ok();
        } else {
            for point in &self.hourly_series {
                writeln!(
                    out,
                    "  {:02}:00  casual {:>5}  registered {:>5}  total {:>5}",
                    point.hour, point.casual, point.registered, point.total
                )
                .ok();
            }
        }
        writeln!(out).ok();

        if let Some(previous_date) = self.previous_date {
            writeln!(out, "Hourly Rentals on {} (previous day)", previous_date).ok();
            if self.previous_hourly_series.is_empty() {
                writeln!(out, "  no records for this date").ok();
            } else {
                for point in &self.previous_hourly_series {
                    writeln!(out, "  {:02}:00  total {:>5}", point.hour, point.total).ok();
                }
            }
            writeln!(out).ok();
        }

        writeln!(out, "Average Rentals per Day of the Week").ok();
        for point in &self.weekday_averages {
            writeln!(
                out,
                "  {:<9}  casual {:>8.1}  registered {:>8.1}",
                utils::weekday_name(point.weekday),
                point.avg_casual,
                point.avg_registered
            )
            .ok();
        }

        out
    }

    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> rentgraph_common::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
