//! Global and grouped aggregation over the filtered record set.

use std::collections::BTreeMap;

use crate::analytics::types::{AggregateRow, Kpis, MonthlyPoint, TripRecord};

/// Computes the global summary metrics. Margin is profit over revenue as a
/// percentage, defined as 0 when revenue sums to 0 so it is never NaN.
pub fn kpis(records: &[&TripRecord]) -> Kpis {
    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_profit: f64 = records.iter().map(|r| r.profit).sum();

    let profit_margin = if total_revenue == 0.0 {
        0.0
    } else {
        total_profit / total_revenue * 100.0
    };

    Kpis {
        total_trips: records.len(),
        total_revenue,
        total_profit,
        profit_margin,
    }
}

/// Sums profit per group key selected by `key`. Only keys present in at
/// least one record appear, so every group's mean is over a non-empty
/// sample. Rows come back in ascending key order, which the ranker relies
/// on as its tie-break base.
pub fn profit_by_key<'a, F>(records: &[&'a TripRecord], key: F) -> Vec<AggregateRow>
where
    F: Fn(&'a TripRecord) -> &'a str,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for &r in records {
        let entry = groups.entry(key(r)).or_insert((0.0, 0));
        entry.0 += r.profit;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (total, count))| AggregateRow {
            key: key.to_string(),
            total,
            mean: total / count as f64,
            count,
        })
        .collect()
}

/// Revenue and profit sums per `YYYY-MM` bucket, ascending by label.
/// Records without a parsable trip date are excluded from this breakdown
/// only; they still count toward the global KPIs.
pub fn monthly_series(records: &[&TripRecord]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for r in records {
        let Some(month) = r.month.as_deref() else {
            continue;
        };
        let entry = buckets.entry(month).or_insert((0.0, 0.0));
        entry.0 += r.revenue;
        entry.1 += r.profit;
    }

    buckets
        .into_iter()
        .map(|(month, (revenue, profit))| MonthlyPoint {
            month: month.to_string(),
            revenue,
            profit,
        })
        .collect()
}
