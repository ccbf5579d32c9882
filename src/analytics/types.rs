//! Data types used by the dashboard pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// A single trip row after loading and coercion. Immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct TripRecord {
    /// Trip date, or `None` when the source value did not parse.
    pub trip_date: Option<NaiveDate>,
    pub revenue: f64,
    pub profit: f64,
    pub driver: String,
    pub from_city: String,
    pub to_city: String,
    /// `YYYY-MM` bucket derived from `trip_date`.
    pub month: Option<String>,
}

/// User-supplied filter criteria. `None` on an axis means no restriction.
///
/// The HTTP and CLI layers map the `"all"` query default to `None` before
/// anything reaches the filter engine, so `"all"` can never collide with a
/// real data value.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Inclusive lower bound on trip date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on trip date.
    pub date_to: Option<NaiveDate>,
    pub driver: Option<String>,
    pub from_city: Option<String>,
    pub to_city: Option<String>,
}

/// Profit aggregate for a single group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: String,
    pub total: f64,
    pub mean: f64,
    pub count: usize,
}

/// Global summary metrics over the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_trips: usize,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Percent. Exactly 0.0 when total revenue is 0, never NaN or infinite.
    pub profit_margin: f64,
}

/// Revenue and profit sums for one `YYYY-MM` bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub revenue: f64,
    pub profit: f64,
}

/// Best-performing entities surfaced for narrative display.
#[derive(Debug, Clone, Serialize)]
pub struct Highlights {
    /// Origin city with the highest total profit.
    pub best_destination: AggregateRow,
    /// Driver with the highest mean profit across all qualifying drivers.
    pub best_driver: AggregateRow,
}

/// Distinct sorted values for building the filter selectors.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub drivers: Vec<String>,
    pub from_cities: Vec<String>,
    pub to_cities: Vec<String>,
}

/// Everything the rendering layer needs for one request. Plain data, no
/// markup.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub top_destinations: Vec<AggregateRow>,
    pub top_drivers: Vec<AggregateRow>,
    pub monthly: Vec<MonthlyPoint>,
    /// `None` when the filtered set has no usable data.
    pub highlights: Option<Highlights>,
    pub filter_options: FilterOptions,
}
