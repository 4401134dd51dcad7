//! Hourly rental line charts for a single calendar date

use crate::{ChartConfig, ChartRenderer};
use plotters::prelude::*;
use rentgraph_common::{RentGraphError, Result};
use std::path::Path;

/// Data point for one hour of a single date
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HourlyDataPoint {
    pub hour: u32, // 0-23
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
    pub label: Option<String>,
}

/// Hourly rentals chart for one date, casual and registered as separate lines
#[derive(Debug)]
pub struct HourlyRentalsChart {
    /// Hourly data points for the selected date
    pub data: Vec<HourlyDataPoint>,
    /// Whether to draw data points as circles
    pub show_markers: bool,
}

impl HourlyRentalsChart {
    /// Create a new hourly rentals chart
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

        config.style.margins.left = 70;

        (chart, config)
    }

    /// Set data from an aggregated hourly series
    pub fn set_data(&mut self, mut data: Vec<HourlyDataPoint>) {
        data.retain(|d| d.hour <= 23);
        data.sort_by_key(|d| d.hour);
        self.data = data;
    }

    /// Max rider count for y-axis scaling, with 10% padding
    fn max_count(&self) -> f64 {
        let max = self
            .data
            .iter()
            .map(|d| d.casual.max(d.registered) as f64)
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            10.0
        }
    }
}

impl Default for HourlyRentalsChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for HourlyRentalsChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(RentGraphError::chart("No data available for hourly rentals chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;

        let y_max = self.max_count();

        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(-0.5f64..23.5f64, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Hour"))
            .y_desc(config.y_label.as_deref().unwrap_or("Number of Rentals"))
            .x_labels(24)
            .x_label_formatter(&|x| {
                let hour = x.round() as i64;
                if (0..=23).contains(&hour) && (x - hour as f64).abs() < 0.01 {
                    format!("{}", hour)
                } else {
                    String::new()
                }
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let casual_color = colors[0];
        let registered_color = colors[1 % colors.len()];

        let casual_data: Vec<(f64, f64)> = self
            .data
            .iter()
            .map(|d| (d.hour as f64, d.casual as f64))
            .collect();
        let registered_data: Vec<(f64, f64)> = self
            .data
            .iter()
            .map(|d| (d.hour as f64, d.registered as f64))
            .collect();

        chart
            .draw_series(LineSeries::new(casual_data.clone(), &casual_color))?
            .label("Casual")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], casual_color));

        chart
            .draw_series(LineSeries::new(registered_data.clone(), &registered_color))?
            .label("Registered")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], registered_color));

        if self.show_markers {
            chart.draw_series(
                casual_data
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, casual_color.filled())),
            )?;
            chart.draw_series(
                registered_data
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, registered_color.filled())),
            )?;
        }

        chart.configure_series_labels().draw()?;

        root.present()?;
        tracing::info!("Successfully rendered hourly rentals chart to {}", path.display());
        Ok(())
    }
}

/// Comparison of total rentals by hour across two dates
/// (typically the selected date and the previous day)
#[derive(Debug)]
pub struct HourlyComparisonChart {
    /// Hourly series for the selected date
    pub current: Vec<HourlyDataPoint>,
    /// Hourly series for the comparison date
    pub previous: Vec<HourlyDataPoint>,
    /// Legend label for the selected date series
    pub current_label: String,
    /// Legend label for the comparison date series
    pub previous_label: String,
}

impl HourlyComparisonChart {
    /// Create a new comparison chart with legend labels for the two series
    pub fn new(current_label: impl Into<String>, previous_label: impl Into<String>) -> Self {
        Self {
            current: Vec::new(),
            previous: Vec::new(),
            current_label: current_label.into(),
            previous_label: previous_label.into(),
        }
    }

    /// Set the hourly series for the selected date
    pub fn set_current(&mut self, mut data: Vec<HourlyDataPoint>) {
        data.retain(|d| d.hour <= 23);
        data.sort_by_key(|d| d.hour);
        self.current = data;
    }

    /// Set the hourly series for the comparison date
    pub fn set_previous(&mut self, mut data: Vec<HourlyDataPoint>) {
        data.retain(|d| d.hour <= 23);
        data.sort_by_key(|d| d.hour);
        self.previous = data;
    }

    /// Max total over both series for y-axis scaling, with 10% padding
    fn max_total(&self) -> f64 {
        let max = self
            .current
            .iter()
            .chain(self.previous.iter())
            .map(|d| d.total as f64)
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            10.0
        }
    }
}

impl ChartRenderer for HourlyComparisonChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.current.is_empty() && self.previous.is_empty() {
            return Err(RentGraphError::chart("No data available for hourly comparison chart"));
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
            .build_cartesian_2d(-0.5f64..23.5f64, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Hour"))
            .y_desc(config.y_label.as_deref().unwrap_or("Total Rentals"))
            .x_labels(24)
            .x_label_formatter(&|x| {
                let hour = x.round() as i64;
                if (0..=23).contains(&hour) && (x - hour as f64).abs() < 0.01 {
                    format!("{}", hour)
                } else {
                    String::new()
                }
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);

        // An empty side is simply not drawn; the other side still renders
        for (i, (series, label)) in [
            (&self.current, &self.current_label),
            (&self.previous, &self.previous_label),
        ]
        .into_iter()
        .enumerate()
        {
            if series.is_empty() {
                continue;
            }
            let line_color = colors[i % colors.len()];
            let plot_data: Vec<(f64, f64)> =
                series.iter().map(|d| (d.hour as f64, d.total as f64)).collect();

            chart
                .draw_series(LineSeries::new(plot_data.clone(), &line_color))?
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], line_color));

            chart.draw_series(
                plot_data
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, line_color.filled())),
            )?;
        }

        chart.configure_series_labels().draw()?;

        root.present()?;
        tracing::info!(
            "Successfully rendered hourly comparison chart to {}",
            path.display()
        );
        Ok(())
    }
}
