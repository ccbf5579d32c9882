//! Top-N selection over grouped aggregates.

use crate::analytics::types::AggregateRow;

/// The metric a ranking orders by.
#[derive(Debug, Clone, Copy)]
pub enum Metric {
    TotalProfit,
    MeanProfit,
}

impl Metric {
    fn of(self, row: &AggregateRow) -> f64 {
        match self {
            Metric::TotalProfit => row.total,
            Metric::MeanProfit => row.mean,
        }
    }
}

/// Returns the top `n` groups by `metric`, descending, keeping only groups
/// with `count >= min_count` (the threshold is inclusive). Equal metric
/// values fall back to ascending group key, so identical input always
/// ranks identically. Fewer than `n` qualifying groups returns them all.
pub fn top_n(groups: &[AggregateRow], metric: Metric, min_count: usize, n: usize) -> Vec<AggregateRow> {
    let mut qualifying: Vec<AggregateRow> = groups
        .iter()
        .filter(|g| g.count >= min_count)
        .cloned()
        .collect();

    qualifying.sort_by(|a, b| {
        metric
            .of(b)
            .total_cmp(&metric.of(a))
            .then_with(|| a.key.cmp(&b.key))
    });
    qualifying.truncate(n);
    qualifying
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, total: f64, count: usize) -> AggregateRow {
        AggregateRow {
            key: key.to_string(),
            total,
            mean: total / count as f64,
            count,
        }
    }

    #[test]
    fn test_orders_descending_by_total() {
        let groups = [row("Alex", 10.0, 1), row("Cairo", 30.0, 1), row("Giza", 20.0, 1)];
        let ranked = top_n(&groups, Metric::TotalProfit, 0, 10);
        let keys: Vec<&str> = ranked.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Cairo", "Giza", "Alex"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let groups: Vec<AggregateRow> = (0..15).map(|i| row(&format!("c{i:02}"), i as f64, 1)).collect();
        let ranked = top_n(&groups, Metric::TotalProfit, 0, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].total, 14.0);
    }

    #[test]
    fn test_fewer_than_n_returns_all() {
        let groups = [row("Cairo", 5.0, 1)];
        let ranked = top_n(&groups, Metric::TotalProfit, 0, 10);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let groups = [row("Ali", 5.0, 1)];
        // A single driver with exactly one trip survives min_count = 1.
        let ranked = top_n(&groups, Metric::MeanProfit, 1, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].key, "Ali");
    }

    #[test]
    fn test_threshold_drops_small_groups() {
        let groups = [row("Ali", 50.0, 2), row("Omar", 99.0, 1)];
        let ranked = top_n(&groups, Metric::MeanProfit, 2, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].key, "Ali");
    }

    #[test]
    fn test_ties_break_by_ascending_key() {
        let groups = [row("Giza", 10.0, 1), row("Alex", 10.0, 1), row("Cairo", 10.0, 1)];
        let ranked = top_n(&groups, Metric::TotalProfit, 0, 10);
        let keys: Vec<&str> = ranked.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Alex", "Cairo", "Giza"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let groups = [
            row("Alex", 10.0, 1),
            row("Cairo", 30.0, 2),
            row("Giza", 10.0, 1),
            row("Luxor", -5.0, 3),
        ];
        let once = top_n(&groups, Metric::TotalProfit, 0, 3);
        let twice = top_n(&once, Metric::TotalProfit, 0, 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mean_metric_ignores_total() {
        let groups = [row("Ali", 100.0, 10), row("Omar", 30.0, 1)];
        let ranked = top_n(&groups, Metric::MeanProfit, 1, 10);
        // Omar averages 30 per trip against Ali's 10.
        assert_eq!(ranked[0].key, "Omar");
    }
}
