//! Aggregation engine and chart generation for the RentGraph reporting tool

pub mod aggregator;
pub mod generator;
pub mod hourly_rentals;
pub mod monthly_trends;
pub mod renderer;
pub mod types;
pub mod weekday_averages;

pub use aggregator::{Aggregate, AggregationEngine, RentalTotals};
pub use generator::ChartGenerator;
pub use hourly_rentals::{HourlyComparisonChart, HourlyDataPoint, HourlyRentalsChart};
pub use monthly_trends::{MonthlyDataPoint, MonthlyTrendChart};
pub use renderer::ChartRenderer;
pub use types::*;
pub use weekday_averages::{WeekdayAveragesChart, WeekdayDataPoint};
