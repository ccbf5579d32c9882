//! One-call orchestration of the filter, aggregate, rank, and highlight
//! stages. Each request runs this eagerly over the shared immutable
//! dataset; nothing here mutates shared state.

use tracing::debug;

use crate::analytics::rank::{Metric, top_n};
use crate::analytics::types::{DashboardData, FilterCriteria};
use crate::analytics::{aggregate, filter, highlight};
use crate::loader::Dataset;

/// How many entries each ranked breakdown keeps.
pub const TOP_N: usize = 10;
/// Minimum trips a driver needs to be ranked. Inclusive.
pub const DRIVER_MIN_TRIPS: usize = 1;

/// Computes a full [`DashboardData`] for one set of filter criteria.
#[tracing::instrument(skip(dataset), fields(rows = dataset.records.len()))]
pub fn run(dataset: &Dataset, criteria: &FilterCriteria) -> DashboardData {
    let filtered = filter::apply(&dataset.records, criteria);
    debug!(filtered = filtered.len(), "Filter applied");

    let kpis = aggregate::kpis(&filtered);
    let by_origin = aggregate::profit_by_key(&filtered, |r| r.from_city.as_str());
    let by_driver = aggregate::profit_by_key(&filtered, |r| r.driver.as_str());
    let monthly = aggregate::monthly_series(&filtered);

    let top_destinations = top_n(&by_origin, Metric::TotalProfit, 0, TOP_N);
    let top_drivers = top_n(&by_driver, Metric::MeanProfit, DRIVER_MIN_TRIPS, TOP_N);
    let highlights = highlight::select(&top_destinations, &by_driver);

    DashboardData {
        kpis,
        top_destinations,
        top_drivers,
        monthly,
        highlights,
        filter_options: dataset.options.clone(),
    }
}
