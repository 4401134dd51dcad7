//! Weekday average rentals stacked bar chart implementation

use crate::{ChartConfig, ChartRenderer};
use chrono::Weekday;
use plotters::prelude::*;
use rentgraph_common::{utils, RentGraphError, Result};
use std::path::Path;

/// Data point for average rentals on one day of the week
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeekdayDataPoint {
    pub weekday: Weekday,
    pub avg_casual: f64,
    pub avg_registered: f64,
    pub label: Option<String>,
}

/// Stacked bar chart of average casual and registered rentals per weekday
#[derive(Debug)]
pub struct WeekdayAveragesChart {
    /// Data points, one per weekday
    pub data: Vec<WeekdayDataPoint>,
}

impl WeekdayAveragesChart {
    /// Create a new weekday averages chart
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new chart with custom title and labels
    pub fn with_config(title: &str, x_label: Option<&str>, y_label: Option<&str>) -> (Self, ChartConfig) {
        let chart = Self::new();
        let mut config = ChartConfig {
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            chart_type: crate::ChartType::Bar,
            ..Default::default()
        };

        // Room for the seven day labels
        config.width = 800;
        config.height = 500;
        config.style.margins.bottom = 60;

        (chart, config)
    }

    /// Set data from aggregated weekday averages
    pub fn set_data(&mut self, mut data: Vec<WeekdayDataPoint>) {
        data.sort_by_key(|d| utils::weekday_index(d.weekday));
        self.data = data;
    }

    /// Max stacked bar height for y-axis scaling, with 10% padding
    fn max_stacked(&self) -> f64 {
        let max = self
            .data
            .iter()
            .map(|d| d.avg_casual + d.avg_registered)
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            10.0
        }
    }
}

impl Default for WeekdayAveragesChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for WeekdayAveragesChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(RentGraphError::chart("No data available for weekday averages chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;

        let y_max = self.max_stacked();

        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(-0.5f64..6.5f64, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Day of the Week"))
            .y_desc(config.y_label.as_deref().unwrap_or("Average Rentals"))
            .x_labels(7)
            .x_label_formatter(&|x| {
                let index = x.round() as i64;
                if (0..=6).contains(&index) && (x - index as f64).abs() < 0.01 {
                    match index {
                        0 => "Mon",
                        1 => "Tue",
                        2 => "Wed",
                        3 => "Thu",
                        4 => "Fri",
                        5 => "Sat",
                        6 => "Sun",
                        _ => "",
                    }
                    .to_string()
                } else {
                    String::new()
                }
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let casual_color = colors[0];
        let registered_color = colors[1 % colors.len()];

        const BAR_HALF_WIDTH: f64 = 0.35;

        // Casual segment sits on the axis, registered stacks on top of it
        let casual_bars: Vec<Rectangle<(f64, f64)>> = self
            .data
            .iter()
            .map(|d| {
                let x = utils::weekday_index(d.weekday) as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, d.avg_casual)],
                    casual_color.filled(),
                )
            })
            .collect();

        let registered_bars: Vec<Rectangle<(f64, f64)>> = self
            .data
            .iter()
            .map(|d| {
                let x = utils::weekday_index(d.weekday) as f64;
                Rectangle::new(
                    [
                        (x - BAR_HALF_WIDTH, d.avg_casual),
                        (x + BAR_HALF_WIDTH, d.avg_casual + d.avg_registered),
                    ],
                    registered_color.filled(),
                )
            })
            .collect();

        chart
            .draw_series(casual_bars)?
            .label("Casual")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 8, y + 4)], casual_color.filled())
            });

        chart
            .draw_series(registered_bars)?
            .label("Registered")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 8, y + 4)], registered_color.filled())
            });

        chart.configure_series_labels().draw()?;

        root.present()?;
        tracing::info!(
            "Successfully rendered weekday averages chart to {}",
            path.display()
        );
        Ok(())
    }
}
