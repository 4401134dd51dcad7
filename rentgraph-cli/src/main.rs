//! RentGraph - Bike Rental Report Generator

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use rentgraph_common::{init_logging, utils, Dataset, LoggingConfig};
use rentgraph_config::{Config, ConfigLoader};
use rentgraph_graphs::{AggregationEngine, ChartGenerator};

mod report;

use report::Report;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data file path (overrides the configured dataset path)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Year labels to include, comma separated (defaults to every year present)
    #[arg(short, long, value_delimiter = ',')]
    years: Vec<i32>,

    /// Calendar date to report on, YYYY-MM-DD (defaults to the dataset's first date)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Render chart PNGs in addition to the printed report
    #[arg(long)]
    charts: bool,

    /// Directory to render charts into (overrides the configured output directory)
    #[arg(long)]
    chart_dir: Option<PathBuf>,

    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(LoggingConfig {
        level,
        pretty_format: config.logging.colored,
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.dataset.path));
    let dataset = Dataset::load(&data_path)
        .with_context(|| format!("failed to load dataset from {}", data_path.display()))?;

    let selected_years: HashSet<i32> = if args.years.is_empty() {
        dataset.distinct_years().into_iter().collect()
    } else {
        args.years.iter().copied().collect()
    };

    let selected_date = args
        .date
        .or_else(|| dataset.date_range().map(|(first, _)| first))
        .unwrap_or_default();
    let previous_date = utils::previous_day(selected_date);

    info!(
        "Reporting on {} records, {} selected years, date {}",
        dataset.len(),
        selected_years.len(),
        selected_date
    );

    let engine = AggregationEngine::new();
    let records = dataset.records();

    let report = Report {
        year_totals: engine.totals_for_years(records, &selected_years)?,
        monthly_trend: engine.monthly_trend(records, &selected_years)?,
        date_totals: engine.totals_for_date(records, selected_date)?,
        hourly_series: engine.hourly_series(records, selected_date)?,
        previous_hourly_series: match previous_date {
            Some(date) => engine.hourly_series(records, date)?,
            None => Vec::new(),
        },
        weekday_averages: engine.weekday_averages(records)?,
        selected_years: {
            let mut years: Vec<i32> = selected_years.iter().copied().collect();
            years.sort_unstable();
            years
        },
        selected_date,
        previous_date,
    };

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if args.charts {
        let chart_dir = args
            .chart_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.charts.output_dir));
        render_charts(&config, &report, &chart_dir)?;
    }

    Ok(())
}

/// Render every chart with a non-empty underlying series
///
/// Empty series are skipped with a log line rather than treated as errors,
/// so a date outside the dataset still produces a usable report.
fn render_charts(config: &Config, report: &Report, chart_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(chart_dir)
        .with_context(|| format!("failed to create chart directory {}", chart_dir.display()))?;

    let generator = ChartGenerator::with_dimensions(config.charts.width, config.charts.height)
        .with_background(config.charts.background_color.as_str());

    if report.monthly_trend.is_empty() {
        warn!("Skipping monthly trend chart: no records for the selected years");
    } else {
        generator.monthly_trend_chart(
            report.monthly_trend.clone(),
            &chart_dir.join("monthly_trend.png"),
        )?;
    }

    if report.hourly_series.is_empty() {
        warn!(
            "Skipping hourly rentals chart: no records for {}",
            report.selected_date
        );
    } else {
        generator.hourly_rentals_chart(
            &report.selected_date.to_string(),
            report.hourly_series.clone(),
            &chart_dir.join("hourly_rentals.png"),
        )?;
    }

    if report.hourly_series.is_empty() && report.previous_hourly_series.is_empty() {
        warn!(
            "Skipping hourly comparison chart: no records for {} or the previous day",
            report.selected_date
        );
    } else if let Some(previous_date) = report.previous_date {
        generator.hourly_comparison_chart(
            &report.selected_date.to_string(),
            report.hourly_series.clone(),
            &previous_date.to_string(),
            report.previous_hourly_series.clone(),
            &chart_dir.join("hourly_comparison.png"),
        )?;
    }

    // Weekday averages always have seven rows; an all-zero week still renders
    generator.weekday_averages_chart(
        report.weekday_averages.clone(),
        &chart_dir.join("weekday_averages.png"),
    )?;

    info!("Charts written to {}", chart_dir.display());
    Ok(())
}
