//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

#![allow(dead_code)]

use aggregation_engine::CategoryCount;
use dashboard_lib::{Dashboard, DashboardConfig, DashboardSnapshot, ViewId, ViewModel};
use engine::FilterSpec;
use serde_json::{json, Value};

/// Test harness wrapping one dashboard.
pub struct TestHarness {
    pub dashboard: Dashboard,
}

impl TestHarness {
    /// Create a harness whose dashboard is still loading.
    pub fn new() -> Self {
        TestHarness {
            dashboard: Dashboard::new(DashboardConfig::default()),
        }
    }

    /// Create a harness loaded with the event fixture.
    pub fn with_events() -> Self {
        Self::with_json(&EventFixture::json())
    }

    /// Create a harness loaded with an arbitrary payload.
    pub fn with_json(json: &str) -> Self {
        let mut harness = Self::new();
        harness
            .dashboard
            .load_from_str(json)
            .expect("fixture should load");
        harness
    }

    pub fn apply(&mut self, spec: FilterSpec) -> DashboardSnapshot {
        self.dashboard.apply_filters(spec).expect("dashboard is loaded")
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.snapshot().expect("dashboard is loaded")
    }

    pub fn view(&self, id: ViewId) -> ViewModel {
        self.dashboard.view(id).expect("dashboard is loaded")
    }

    /// Topics of the filtered records, in order.
    pub fn filtered_topics(&self) -> Vec<String> {
        let state = self.dashboard.state().expect("dashboard is loaded");
        state
            .filtered()
            .iter()
            .map(|r| r.topic.clone().unwrap_or_default())
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.dashboard.state().expect("dashboard is loaded").filtered().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TEST DATA FIXTURES
// ============================================================================

/// Sample event records, shaped like the raw dataset payload.
pub struct EventFixture;

impl EventFixture {
    /// (topic, sector, region, country, city, intensity, likelihood, relevance, added)
    pub fn data() -> Vec<(
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        Option<f64>,
        f64,
        f64,
        &'static str,
    )> {
        vec![
            ("oil", "Energy", "Northern America", "United States of America", "Houston", Some(6.0), 3.0, 2.0, "January, 20 2017 03:51:25"),
            ("gas", "Energy", "Europe", "France", "Paris", Some(4.0), 2.0, 3.0, "January, 18 2017 00:00:00"),
            ("oil", "Energy", "World", "", "", None, 4.0, 1.0, "February, 01 2017 10:00:00"),
            ("market", "Retail", "Asia", "India", "Mumbai", Some(10.0), 3.0, 4.0, "March, 05 2017 12:30:00"),
            ("gas", "Technology", "Europe", "Germany", "Berlin", Some(2.0), 1.0, 2.0, "January, 25 2017 08:00:00"),
            ("economy", "Technology", "Asia", "India", "Delhi", Some(8.0), 4.0, 3.0, "April, 10 2017 09:15:00"),
            ("oil", "Energy", "Northern America", "United States of America", "Houston", Some(12.0), 2.0, 5.0, ""),
            ("climate", "", "Africa", "Nigeria", "", Some(0.0), 1.0, 1.0, "May, 02 2017 14:00:00"),
        ]
    }

    /// The fixture as a JSON array. Absent values are written as empty
    /// strings, the way the raw dataset does.
    pub fn json() -> String {
        let records: Vec<Value> = Self::data()
            .into_iter()
            .map(|(topic, sector, region, country, city, intensity, likelihood, relevance, added)| {
                json!({
                    "topic": topic,
                    "sector": sector,
                    "region": region,
                    "country": country,
                    "city": city,
                    "intensity": intensity.map(Value::from).unwrap_or_else(|| json!("")),
                    "likelihood": likelihood,
                    "relevance": relevance,
                    "added": added,
                    "end_year": "",
                    "start_year": 2017,
                    "pestle": "Economic",
                    "source": "EIA",
                    "title": "ignored"
                })
            })
            .collect();
        Value::Array(records).to_string()
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert two floats are equal within a small tolerance.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.001,
        "expected {} but got {}",
        expected, actual
    );
}

/// Assert ranked counts match `(label, count)` pairs in order.
pub fn assert_counts(entries: &[CategoryCount], expected: &[(&str, usize)]) {
    let actual: Vec<(&str, usize)> = entries.iter().map(|c| (c.label.as_str(), c.count)).collect();
    assert_eq!(actual, expected, "ranked counts differ");
}

/// Unwrap the ranked counts of a view model.
pub fn ranked_counts(model: &ViewModel) -> &[CategoryCount] {
    match model {
        ViewModel::RankedCounts { entries, .. } => entries,
        other => panic!("expected RankedCounts but got {:?}", other),
    }
}
