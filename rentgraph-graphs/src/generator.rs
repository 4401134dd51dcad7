//! Chart generation from aggregated report data

use crate::{
    ChartConfig, ChartRenderer, HourlyComparisonChart, HourlyDataPoint, HourlyRentalsChart,
    MonthlyDataPoint, MonthlyTrendChart, WeekdayAveragesChart, WeekdayDataPoint,
};
use rentgraph_common::Result;
use std::path::Path;

/// Chart generator wiring aggregation outputs to renderers
///
/// Holds the shared output dimensions and background; each method draws one
/// of the report's charts to a PNG file.
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    width: u32,
    height: u32,
    background_color: Option<String>,
}

impl ChartGenerator {
    /// Create a generator with default dimensions
    pub fn new() -> Self {
        Self {
            width: 1000,
            height: 600,
            background_color: None,
        }
    }

    /// Create a generator with explicit output dimensions
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background_color: None,
        }
    }

    /// Set the background color (hex string)
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    fn apply_output_settings(&self, config: &mut ChartConfig) {
        config.width = self.width;
        config.height = self.height;
        if let Some(ref color) = self.background_color {
            config.style.background_color = Some(color.clone());
        }
    }

    /// Render the monthly trend line chart (one line per selected year)
    pub fn monthly_trend_chart(&self, data: Vec<MonthlyDataPoint>, path: &Path) -> Result<()> {
        let (mut chart, mut config) = MonthlyTrendChart::with_config(
            "Monthly Bike Rentals Trend",
            Some("Month"),
            Some("Total Rentals"),
        );
        self.apply_output_settings(&mut config);
        chart.set_data(data);
        chart.render_to_file(&config, path)?;
        Ok(())
    }

    /// Render casual and registered hourly lines for one date
    pub fn hourly_rentals_chart(
        &self,
        date_label: &str,
        data: Vec<HourlyDataPoint>,
        path: &Path,
    ) -> Result<()> {
        let (mut chart, mut config) = HourlyRentalsChart::with_config(
            &format!("Hourly Rentals on {}", date_label),
            Some("Hour"),
            Some("Number of Rentals"),
        );
        self.apply_output_settings(&mut config);
        chart.set_data(data);
        chart.render_to_file(&config, path)?;
        Ok(())
    }

    /// Render the total-rentals comparison between a date and its previous day
    pub fn hourly_comparison_chart(
        &self,
        current_label: &str,
        current: Vec<HourlyDataPoint>,
        previous_label: &str,
        previous: Vec<HourlyDataPoint>,
        path: &Path,
    ) -> Result<()> {
        let mut chart = HourlyComparisonChart::new(
            format!("Total Rentals on {}", current_label),
            format!("Total Rentals on {}", previous_label),
        );
        chart.set_current(current);
        chart.set_previous(previous);

        let mut config = ChartConfig {
            title: format!(
                "Hourly Rentals Comparison on {} and {}",
                current_label, previous_label
            ),
            x_label: Some("Hour".to_string()),
            y_label: Some("Total Rentals".to_string()),
            ..Default::default()
        };
        self.apply_output_settings(&mut config);

        chart.render_to_file(&config, path)?;
        Ok(())
    }

    /// Render the stacked weekday averages bar chart
    pub fn weekday_averages_chart(&self, data: Vec<WeekdayDataPoint>, path: &Path) -> Result<()> {
        let (mut chart, mut config) = WeekdayAveragesChart::with_config(
            "Average Rentals per Day of the Week",
            Some("Day of the Week"),
            Some("Average Rentals"),
        );
        self.apply_output_settings(&mut config);
        chart.set_data(data);
        chart.render_to_file(&config, path)?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentgraph_common::utils;
    use tempfile::tempdir;

    #[test]
    fn test_generator_renders_all_charts() {
        let generator = ChartGenerator::with_dimensions(640, 480).with_background("#FAFAFA");
        let temp_dir = tempdir().unwrap();

        let monthly = vec![
            MonthlyDataPoint { year: 2011, month: 1, total: 100, label: None },
            MonthlyDataPoint { year: 2011, month: 2, total: 150, label: None },
        ];
        let monthly_path = temp_dir.path().join("monthly_trend.png");
        generator.monthly_trend_chart(monthly, &monthly_path).unwrap();
        assert!(monthly_path.exists());

        let hourly = vec![
            HourlyDataPoint { hour: 0, casual: 3, registered: 13, total: 16, label: None },
            HourlyDataPoint { hour: 1, casual: 8, registered: 32, total: 40, label: None },
        ];
        let hourly_path = temp_dir.path().join("hourly_rentals.png");
        generator
            .hourly_rentals_chart("2011-01-01", hourly.clone(), &hourly_path)
            .unwrap();
        assert!(hourly_path.exists());

        let comparison_path = temp_dir.path().join("hourly_comparison.png");
        generator
            .hourly_comparison_chart("2011-01-02", hourly, "2011-01-01", Vec::new(), &comparison_path)
            .unwrap();
        assert!(comparison_path.exists());

        let weekday = utils::WEEKDAYS
            .iter()
            .map(|w| WeekdayDataPoint {
                weekday: *w,
                avg_casual: 12.0,
                avg_registered: 30.0,
                label: None,
            })
            .collect();
        let weekday_path = temp_dir.path().join("weekday_averages.png");
        generator.weekday_averages_chart(weekday, &weekday_path).unwrap();
        assert!(weekday_path.exists());
    }

    #[test]
    fn test_generator_propagates_empty_data_error() {
        let generator = ChartGenerator::new();
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("empty.png");

        assert!(generator.monthly_trend_chart(Vec::new(), &path).is_err());
    }
}
