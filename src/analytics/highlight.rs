//! "Best of" selection for narrative display.

use crate::analytics::rank::{Metric, top_n};
use crate::analytics::types::{AggregateRow, Highlights};

/// Picks the best destination (head of the ranked destination list) and the
/// best driver (highest mean profit across every driver with at least one
/// trip, not merely the ranked top ten). Ties resolve the same way the
/// ranker resolves them. Returns `None` when either side has no data.
pub fn select(top_destinations: &[AggregateRow], driver_groups: &[AggregateRow]) -> Option<Highlights> {
    let best_destination = top_destinations.first()?.clone();
    let best_driver = top_n(driver_groups, Metric::MeanProfit, 1, 1).into_iter().next()?;

    Some(Highlights {
        best_destination,
        best_driver,
    })
}
