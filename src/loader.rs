//! CSV loading and per-row value coercion.
//!
//! One malformed value never fails the load: unparsable dates become
//! `None` and unparsable money values become 0. Only a missing or
//! structurally unreadable file is fatal.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{info, warn};

use crate::analytics::types::{FilterOptions, TripRecord};

/// A raw CSV row as it appears in the source file. Every field is optional
/// so a sparse row still deserializes; coercion happens afterwards.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "TripDate")]
    trip_date: Option<String>,
    #[serde(rename = "Revenue")]
    revenue: Option<String>,
    #[serde(rename = "Profit")]
    profit: Option<String>,
    #[serde(rename = "DriverName")]
    driver_name: Option<String>,
    #[serde(rename = "FromPos")]
    from_pos: Option<String>,
    #[serde(rename = "ToPos")]
    to_pos: Option<String>,
}

/// The full in-memory dataset, read once at startup and never mutated.
#[derive(Debug)]
pub struct Dataset {
    pub records: Vec<TripRecord>,
    /// Distinct sorted drivers and cities, for the filter selectors.
    pub options: FilterOptions,
}

/// Reads the trips CSV at `path` into a [`Dataset`], in file order.
pub fn load_dataset(path: &str) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open trips CSV at {path}"))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RawTrip>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                // Structurally broken row (wrong field count etc.), not a
                // value-level failure. Value failures are coerced below.
                warn!(row = records.len() + skipped + 1, error = %e, "Skipping unreadable row");
                skipped += 1;
                continue;
            }
        };
        records.push(coerce(raw));
    }

    let options = filter_options(&records);

    info!(
        path,
        rows = records.len(),
        skipped,
        "Dataset loaded"
    );

    Ok(Dataset { records, options })
}

fn coerce(raw: RawTrip) -> TripRecord {
    let trip_date = raw.trip_date.as_deref().and_then(parse_date);
    let month = trip_date.map(|d| d.format("%Y-%m").to_string());

    TripRecord {
        trip_date,
        revenue: parse_money(raw.revenue.as_deref()),
        profit: parse_money(raw.profit.as_deref()),
        driver: raw.driver_name.unwrap_or_default(),
        from_city: raw.from_pos.unwrap_or_default(),
        to_city: raw.to_pos.unwrap_or_default(),
        month,
    }
}

/// Attempts the date formats seen in trip exports. `None` on failure.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

/// Parses a money column, tolerating thousands separators. Missing or
/// malformed values become 0, never an error and never NaN.
fn parse_money(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().replace(',', "").parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Collects the distinct sorted driver and city values for the selectors.
/// Empty strings are omitted.
pub fn filter_options(records: &[TripRecord]) -> FilterOptions {
    let mut drivers = BTreeSet::new();
    let mut from_cities = BTreeSet::new();
    let mut to_cities = BTreeSet::new();

    for r in records {
        if !r.driver.is_empty() {
            drivers.insert(r.driver.clone());
        }
        if !r.from_city.is_empty() {
            from_cities.insert(r.from_city.clone());
        }
        if !r.to_city.is_empty() {
            to_cities.insert(r.to_city.clone());
        }
    }

    FilterOptions {
        drivers: drivers.into_iter().collect(),
        from_cities: from_cities.into_iter().collect(),
        to_cities: to_cities.into_iter().collect(),
    }
}
