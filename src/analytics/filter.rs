//! Conjunctive record filtering.

use crate::analytics::types::{FilterCriteria, TripRecord};

/// Returns the records satisfying every specified predicate, preserving
/// input order. An empty result is valid and flows downstream as-is.
pub fn apply<'a>(records: &'a [TripRecord], criteria: &FilterCriteria) -> Vec<&'a TripRecord> {
    records.iter().filter(|r| matches(r, criteria)).collect()
}

/// AND semantics: unspecified predicates always pass. A record without a
/// parsable trip date fails any specified date bound.
fn matches(record: &TripRecord, criteria: &FilterCriteria) -> bool {
    if criteria.date_from.is_some() || criteria.date_to.is_some() {
        let Some(date) = record.trip_date else {
            return false;
        };
        if let Some(from) = criteria.date_from
            && date < from
        {
            return false;
        }
        if let Some(to) = criteria.date_to
            && date > to
        {
            return false;
        }
    }

    if let Some(driver) = &criteria.driver
        && record.driver != *driver
    {
        return false;
    }
    if let Some(from_city) = &criteria.from_city
        && record.from_city != *from_city
    {
        return false;
    }
    if let Some(to_city) = &criteria.to_city
        && record.to_city != *to_city
    {
        return false;
    }

    true
}
