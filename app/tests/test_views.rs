//! FILENAME: tests/test_views.rs
//! Integration tests for the per-view models.

mod common;

use aggregation_engine::OTHER_LABEL;
use common::{assert_close, assert_counts, ranked_counts, TestHarness};
use dashboard_lib::{Dashboard, DashboardConfig, ViewId, ViewModel};
use engine::{Field, FilterKey, FilterSpec, NumericField};

// ============================================================================
// RANKED COUNTS
// ============================================================================

#[test]
fn test_topics_distribution() {
    let harness = TestHarness::with_events();
    let model = harness.view(ViewId::TopicsDistribution);
    assert_counts(
        ranked_counts(&model),
        &[("oil", 3), ("gas", 2), ("market", 1), ("economy", 1), ("climate", 1)],
    );
}

#[test]
fn test_topics_distribution_folds_other() {
    let config = DashboardConfig::from_json_str(r#"{"topicsTopN": 2}"#).unwrap();
    let mut dashboard = Dashboard::new(config);
    dashboard.load_from_str(&common::EventFixture::json()).unwrap();

    let model = dashboard.view(ViewId::TopicsDistribution).unwrap();
    assert_counts(ranked_counts(&model), &[("oil", 3), ("gas", 2), (OTHER_LABEL, 3)]);
}

#[test]
fn test_treemap_is_uncapped_first_occurrence() {
    let harness = TestHarness::with_events();
    let model = harness.view(ViewId::Treemap);
    assert_counts(
        ranked_counts(&model),
        &[("oil", 3), ("gas", 2), ("market", 1), ("economy", 1), ("climate", 1)],
    );
    match model {
        ViewModel::RankedCounts { field, .. } => assert_eq!(field, Field::Topic),
        other => panic!("unexpected model {:?}", other),
    }
}

// ============================================================================
// GROUPED AVERAGES
// ============================================================================

#[test]
fn test_country_view_means() {
    let harness = TestHarness::with_events();
    let groups = match harness.view(ViewId::CountryView) {
        ViewModel::GroupedAverages { field, groups } => {
            assert_eq!(field, Field::Country);
            groups
        }
        other => panic!("unexpected model {:?}", other),
    };

    let order: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(order, vec!["United States of America", "India", "France", "Germany", "Nigeria"]);
    assert_close(groups[0].mean(NumericField::Intensity).unwrap(), 9.0);
    assert_close(groups[1].mean(NumericField::Intensity).unwrap(), 9.0);
    // zero is a real value
    assert_close(groups[4].mean(NumericField::Intensity).unwrap(), 0.0);
    assert_eq!(groups[4].means[0].contributing, 1);
}

#[test]
fn test_city_view_means() {
    let harness = TestHarness::with_events();
    let groups = match harness.view(ViewId::CityView) {
        ViewModel::GroupedAverages { groups, .. } => groups,
        other => panic!("unexpected model {:?}", other),
    };
    assert_eq!(groups[0].category, "Houston");
    assert_eq!(groups[0].count, 2);
    assert_close(groups[0].mean(NumericField::Relevance).unwrap(), 3.5);
    assert_eq!(groups.len(), 5);
}

#[test]
fn test_absent_intensity_excluded_from_mean() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Topic, "oil"));
    let groups = match harness.view(ViewId::CountryView) {
        ViewModel::GroupedAverages { groups, .. } => groups,
        other => panic!("unexpected model {:?}", other),
    };
    // the "World" oil record has no country and is not grouped
    assert_eq!(groups.len(), 1);
    assert_close(groups[0].mean(NumericField::Intensity).unwrap(), 9.0);
}

#[test]
fn test_radar_sector_profile() {
    let harness = TestHarness::with_events();
    let sectors = match harness.view(ViewId::RadarChart) {
        ViewModel::SectorProfile { sectors } => sectors,
        other => panic!("unexpected model {:?}", other),
    };
    let names: Vec<&str> = sectors.iter().map(|s| s.sector.as_str()).collect();
    assert_eq!(names, vec!["Energy", "Retail", "Technology"]);

    let energy = &sectors[0];
    assert_eq!(energy.count, 4);
    // intensity 6, 4, absent, 12
    assert_close(energy.intensity, 22.0 / 3.0);
    assert_close(energy.likelihood, 11.0 / 4.0);
}

// ============================================================================
// REGION MAP
// ============================================================================

#[test]
fn test_region_map_totals() {
    let harness = TestHarness::with_events();
    let (totals, top, max_value) = match harness.view(ViewId::RegionMap) {
        ViewModel::RegionMap { totals, top, max_value } => (totals, top, max_value),
        other => panic!("unexpected model {:?}", other),
    };

    let keys: Vec<&str> = totals.iter().map(|t| t.region.as_str()).collect();
    assert_eq!(keys, vec!["Northern America", "Europe", "World", "Asia", "Africa"]);

    let top_keys: Vec<&str> = top.iter().map(|t| t.region.as_str()).collect();
    assert_eq!(top_keys, vec!["Northern America", "Asia", "Europe", "World", "Africa"]);
    assert_close(max_value, 18.0);

    let sum: f64 = totals.iter().map(|t| t.value).sum();
    assert_close(sum, 42.0);
}

#[test]
fn test_region_map_cap() {
    let config = DashboardConfig::from_json_str(r#"{"regionDisplayCap": 2}"#).unwrap();
    let mut dashboard = Dashboard::new(config);
    dashboard.load_from_str(&common::EventFixture::json()).unwrap();
    match dashboard.view(ViewId::RegionMap).unwrap() {
        ViewModel::RegionMap { totals, top, .. } => {
            assert_eq!(totals.len(), 5);
            assert_eq!(top.len(), 2);
        }
        other => panic!("unexpected model {:?}", other),
    }
}

#[test]
fn test_region_map_all_zero_uses_unit_domain() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Topic, "climate"));
    match harness.view(ViewId::RegionMap) {
        ViewModel::RegionMap { max_value, .. } => assert_close(max_value, 1.0),
        other => panic!("unexpected model {:?}", other),
    }
}

// ============================================================================
// POINTS
// ============================================================================

#[test]
fn test_likelihood_series_sorted_by_time() {
    let harness = TestHarness::with_events();
    let (field, points, legend) = match harness.view(ViewId::Likelihood) {
        ViewModel::TimeSeries { field, points, legend } => (field, points, legend),
        other => panic!("unexpected model {:?}", other),
    };
    assert_eq!(field, NumericField::Likelihood);
    // the record without a timestamp is skipped
    assert_eq!(points.len(), 7);
    assert!(points.windows(2).all(|w| w[0].point.added <= w[1].point.added));
    assert_eq!(points[0].point.topic.as_deref(), Some("gas"));
    assert!(points.iter().all(|p| p.visible));

    let topics: Vec<&str> = legend.iter().map(|l| l.topic.as_str()).collect();
    assert_eq!(topics, vec!["oil", "gas", "market", "economy", "climate"]);
}

#[test]
fn test_intensity_series_skips_absent_values() {
    let harness = TestHarness::with_events();
    match harness.view(ViewId::Intensity) {
        ViewModel::TimeSeries { points, .. } => assert_eq!(points.len(), 6),
        other => panic!("unexpected model {:?}", other),
    }
}

#[test]
fn test_scatter_views_have_one_point_per_record() {
    let harness = TestHarness::with_events();
    for id in [ViewId::Relevance, ViewId::BubbleChart] {
        match harness.view(id) {
            ViewModel::Scatter { points } => {
                assert_eq!(points.len(), 8);
                assert_eq!(points[2].intensity, None);
                assert_eq!(points[2].relevance, Some(1.0));
            }
            other => panic!("unexpected model {:?}", other),
        }
    }
}

#[test]
fn test_snapshot_serializes() {
    let harness = TestHarness::with_events();
    let json = serde_json::to_value(harness.snapshot()).unwrap();
    assert_eq!(json["generation"], 0);
    assert_eq!(json["views"].as_array().unwrap().len(), 10);
    assert_eq!(json["views"][3]["id"], "topics_distribution");
    assert_eq!(json["views"][3]["model"]["type"], "rankedCounts");
}
