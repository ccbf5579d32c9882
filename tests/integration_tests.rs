use trip_dashboard::analytics::pipeline;
use trip_dashboard::analytics::types::{FilterCriteria, TripRecord};
use trip_dashboard::loader::{Dataset, filter_options, load_dataset};
use trip_dashboard::server::DashboardQuery;

fn fixture() -> Dataset {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/trips_sample.csv");
    load_dataset(path).expect("failed to load fixture CSV")
}

#[test]
fn test_load_coerces_instead_of_failing() {
    let dataset = fixture();
    assert_eq!(dataset.records.len(), 5);

    // Column order in the fixture differs from the canonical one; mapping
    // is by header name.
    let sara = &dataset.records[3];
    assert_eq!(sara.driver, "Sara");
    assert_eq!(sara.trip_date, None);
    assert_eq!(sara.month, None);
    assert_eq!(sara.revenue, 0.0);
    assert_eq!(sara.profit, 0.0);

    let quoted = &dataset.records[4];
    assert_eq!(quoted.revenue, 1250.50);
}

#[test]
fn test_missing_file_is_fatal() {
    assert!(load_dataset("no/such/file.csv").is_err());
}

#[test]
fn test_unfiltered_dashboard_totals() {
    let dataset = fixture();
    let data = pipeline::run(&dataset, &FilterCriteria::default());

    assert_eq!(data.kpis.total_trips, 5);
    assert!((data.kpis.total_revenue - 1550.50).abs() < 1e-9);
    assert!((data.kpis.total_profit - 310.0).abs() < 1e-9);
    assert!(data.kpis.profit_margin.is_finite());

    // The undated row is excluded from the monthly series only.
    assert_eq!(data.monthly.len(), 2);
    assert_eq!(data.monthly[0].month, "2024-01");
    assert!((data.monthly[0].revenue - 300.0).abs() < 1e-9);
    assert!((data.monthly[0].profit - 10.0).abs() < 1e-9);
    assert_eq!(data.monthly[1].month, "2024-02");

    assert_eq!(data.filter_options.drivers, vec!["Ali", "Omar", "Sara"]);
    assert_eq!(data.filter_options.from_cities, vec!["Alex", "Cairo", "Giza"]);
}

#[test]
fn test_query_decoding_end_to_end() {
    let dataset = fixture();
    let query = DashboardQuery {
        date_from: Some("2024-01-01".to_string()),
        date_to: Some("garbage".to_string()), // dropped, not an error
        driver: Some("all".to_string()),
        from_city: Some("Cairo".to_string()),
        to_city: Some("all".to_string()),
    };
    let data = pipeline::run(&dataset, &query.into_criteria());

    assert_eq!(data.kpis.total_trips, 2);
    assert_eq!(data.top_destinations.len(), 1);
    assert_eq!(data.top_destinations[0].key, "Cairo");
}

#[test]
fn test_filtered_set_is_an_ordered_subsequence() {
    let dataset = fixture();
    let criteria = FilterCriteria {
        driver: Some("Ali".to_string()),
        ..Default::default()
    };
    let filtered = trip_dashboard::analytics::filter::apply(&dataset.records, &criteria);

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.driver == "Ali"));

    // Order preservation: each retained record appears later in the source
    // than the one before it.
    let mut cursor = 0;
    for r in &filtered {
        let pos = dataset.records[cursor..]
            .iter()
            .position(|other| std::ptr::eq(*r, other))
            .expect("filtered record missing from source tail");
        cursor += pos + 1;
    }
}

#[test]
fn test_three_row_sample_scenario() {
    let records = vec![
        trip("D1", "Cairo", "Alex", 100.0, 20.0),
        trip("D2", "Cairo", "Giza", 200.0, -10.0),
        trip("D3", "Alex", "Giza", 0.0, 0.0),
    ];
    let options = filter_options(&records);
    let dataset = Dataset { records, options };

    let data = pipeline::run(&dataset, &FilterCriteria::default());
    assert_eq!(data.kpis.total_trips, 3);
    assert_eq!(data.kpis.total_revenue, 300.0);
    assert_eq!(data.kpis.total_profit, 10.0);
    assert!((data.kpis.profit_margin - 3.3333333333).abs() < 1e-6);

    // Every driver has exactly one trip; the inclusive minimum-count
    // threshold keeps all three in the ranking.
    assert_eq!(data.top_drivers.len(), 3);

    let cairo = FilterCriteria {
        from_city: Some("Cairo".to_string()),
        ..Default::default()
    };
    let data = pipeline::run(&dataset, &cairo);
    assert_eq!(data.kpis.total_trips, 2);
    assert_eq!(data.kpis.total_profit, 10.0);
    assert_eq!(data.top_destinations.len(), 1);
    assert_eq!(data.top_destinations[0].key, "Cairo");
    assert_eq!(data.top_destinations[0].total, 10.0);
}

fn trip(driver: &str, from: &str, to: &str, revenue: f64, profit: f64) -> TripRecord {
    TripRecord {
        trip_date: None,
        revenue,
        profit,
        driver: driver.to_string(),
        from_city: from.to_string(),
        to_city: to.to_string(),
        month: None,
    }
}
