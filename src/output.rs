//! Output formatting and persistence for one-shot reports.
//!
//! Supports printing the dashboard DTO as JSON and appending KPI rows to a
//! CSV file for tracking runs over time.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::analytics::types::{DashboardData, Kpis};

/// One exported KPI row, stamped with the time the report ran.
#[derive(Debug, Serialize)]
struct KpiRow {
    generated_at: DateTime<Utc>,
    total_trips: usize,
    total_revenue: f64,
    total_profit: f64,
    profit_margin: f64,
}

/// Prints the full dashboard DTO as pretty JSON on stdout.
pub fn print_json(data: &DashboardData) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Appends the KPI summary as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_kpis(path: &str, kpis: &Kpis) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(KpiRow {
        generated_at: Utc::now(),
        total_trips: kpis.total_trips,
        total_revenue: kpis.total_revenue,
        total_profit: kpis.total_profit,
        profit_margin: kpis.profit_margin,
    })?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn kpis() -> Kpis {
        Kpis {
            total_trips: 3,
            total_revenue: 300.0,
            total_profit: 10.0,
            profit_margin: 10.0 / 300.0 * 100.0,
        }
    }

    #[test]
    fn test_append_kpis_creates_file() {
        let path = temp_path("trip_dashboard_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_kpis(&path, &kpis()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("total_trips"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_kpis_writes_header_once() {
        let path = temp_path("trip_dashboard_test_header.csv");
        let _ = fs::remove_file(&path);

        append_kpis(&path, &kpis()).unwrap();
        append_kpis(&path, &kpis()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content
            .lines()
            .filter(|l| l.contains("generated_at"))
            .count();
        assert_eq!(header_count, 1);

        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
