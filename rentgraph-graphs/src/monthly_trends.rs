//! Monthly rental trend line chart implementation

use crate::{ChartConfig, ChartRenderer};
use plotters::prelude::*;
use rentgraph_common::{utils, RentGraphError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Data point for the monthly rental trend
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyDataPoint {
    pub year: i32,
    pub month: u32, // 1-12
    pub total: u64,
    pub label: Option<String>,
}

/// Monthly trend line chart, one line per year
#[derive(Debug)]
pub struct MonthlyTrendChart {
    /// Data points for monthly rental totals
    pub data: Vec<MonthlyDataPoint>,
    /// Whether to draw data points as circles
    pub show_markers: bool,
}

impl MonthlyTrendChart {
    /// Create a new monthly trend chart
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            show_markers: true,
        }
    }

    /// Create a new chart with custom title and labels
    pub fn with_config(title: &str, x_label: Option<&str>, y_label: Option<&str>) -> (Self, ChartConfig) {
        let chart = Self::new();
        let mut config = ChartConfig {
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            chart_type: crate::ChartType::Line,
            ..Default::default()
        };

        // Room for month labels and rental count labels
        config.style.margins.bottom = 60;
        config.style.margins.left = 80;

        (chart, config)
    }

    /// Set data from aggregated monthly totals
    pub fn set_data(&mut self, mut data: Vec<MonthlyDataPoint>) {
        data.retain(|d| (1..=12).contains(&d.month));
        data.sort_by_key(|d| (d.year, d.month));
        self.data = data;
    }

    /// Group data by year, each year's points sorted by month
    fn group_by_year(&self) -> BTreeMap<i32, Vec<(u32, u64)>> {
        let mut grouped: BTreeMap<i32, Vec<(u32, u64)>> = BTreeMap::new();
        for point in &self.data {
            grouped.entry(point.year).or_default().push((point.month, point.total));
        }
        for year_data in grouped.values_mut() {
            year_data.sort_by_key(|&(month, _)| month);
        }
        grouped
    }

    /// Max total for y-axis scaling, with 10% padding
    fn max_total(&self) -> f64 {
        let max = self.data.iter().map(|d| d.total as f64).fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            10.0
        }
    }
}

impl Default for MonthlyTrendChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for MonthlyTrendChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(RentGraphError::chart("No data available for monthly trend chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;

        let y_max = self.max_total();

        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0.5f64..12.5f64, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Month"))
            .y_desc(config.y_label.as_deref().unwrap_or("Total Rentals"))
            .x_labels(12)
            .x_label_formatter(&|x| {
                let month = x.round() as u32;
                if (1..=12).contains(&month) && (x - month as f64).abs() < 0.01 {
                    utils::month_abbr(month).to_string()
                } else {
                    String::new()
                }
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);

        // One line per year, as in a year-over-year comparison
        for (i, (year, year_data)) in self.group_by_year().iter().enumerate() {
            let line_color = colors[i % colors.len()];
            let plot_data: Vec<(f64, f64)> = year_data
                .iter()
                .map(|&(month, total)| (month as f64, total as f64))
                .collect();

            chart
                .draw_series(LineSeries::new(plot_data.clone(), &line_color))?
                .label(format!("{}", year))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], line_color));

            if self.show_markers {
                chart.draw_series(
                    plot_data
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, line_color.filled())),
                )?;
            }
        }

        chart.configure_series_labels().draw()?;

        root.present()?;
        tracing::info!("Successfully rendered monthly trend chart to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn point(year: i32, month: u32, total: u64) -> MonthlyDataPoint {
        MonthlyDataPoint {
            year,
            month,
            total,
            label: None,
        }
    }

    #[test]
    fn test_monthly_trend_creation() {
        let chart = MonthlyTrendChart::new();
        assert!(chart.data.is_empty());
        assert!(chart.show_markers);
    }

    #[test]
    fn test_set_data_sorts_and_filters() {
        let mut chart = MonthlyTrendChart::new();
        chart.set_data(vec![
            point(2012, 6, 150),
            point(2011, 3, 100),
            point(2011, 12, 200),
            point(2012, 15, 50), // invalid month, dropped
        ]);

        assert_eq!(chart.data.len(), 3);
        assert_eq!((chart.data[0].year, chart.data[0].month), (2011, 3));
        assert_eq!((chart.data[1].year, chart.data[1].month), (2011, 12));
        assert_eq!((chart.data[2].year, chart.data[2].month), (2012, 6));
    }

    #[test]
    fn test_group_by_year() {
        let mut chart = MonthlyTrendChart::new();
        chart.set_data(vec![
            point(2012, 1, 150),
            point(2011, 6, 120),
            point(2011, 2, 100),
        ]);

        let grouped = chart.group_by_year();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&2011], vec![(2, 100), (6, 120)]);
        assert_eq!(grouped[&2012], vec![(1, 150)]);
    }

    #[test]
    fn test_max_total_padding() {
        let mut chart = MonthlyTrendChart::new();
        assert_eq!(chart.max_total(), 10.0);

        chart.set_data(vec![point(2011, 1, 100), point(2011, 2, 200)]);
        assert!((chart.max_total() - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_config() {
        let (_, config) = MonthlyTrendChart::with_config(
            "Monthly Bike Rentals Trend",
            Some("Month"),
            Some("Total Rentals"),
        );

        assert_eq!(config.title, "Monthly Bike Rentals Trend");
        assert_eq!(config.x_label, Some("Month".to_string()));
        assert!(matches!(config.chart_type, crate::ChartType::Line));
        assert_eq!(config.style.margins.left, 80);
    }

    #[test]
    fn test_render_to_file() {
        let mut chart = MonthlyTrendChart::new();
        chart.set_data(vec![
            point(2011, 1, 100),
            point(2011, 2, 120),
            point(2011, 3, 150),
            point(2012, 1, 180),
            point(2012, 2, 200),
        ]);

        let (_, config) = MonthlyTrendChart::with_config(
            "Monthly Bike Rentals Trend",
            Some("Month"),
            Some("Total Rentals"),
        );

        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("monthly_trend_test.png");

        chart.render_to_file(&config, &file_path).unwrap();
        assert!(file_path.exists());
    }

    #[test]
    fn test_render_empty_data_error() {
        let chart = MonthlyTrendChart::new();
        let config = ChartConfig::default();
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("empty_test.png");

        assert!(chart.render_to_file(&config, &file_path).is_err());
    }
}
