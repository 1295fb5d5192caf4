//! FILENAME: tests/test_filters.rs
//! Integration tests for filtering through the dashboard.

mod common;

use common::TestHarness;
use dashboard_lib::{active_filter_count, FilterDraft, ViewId};
use engine::{FilterKey, FilterSpec};

// ============================================================================
// FILTER SEMANTICS
// ============================================================================

#[test]
fn test_empty_filter_is_identity() {
    let mut harness = TestHarness::with_events();
    let before = harness.filtered_topics();
    harness.apply(FilterSpec::new());
    assert_eq!(harness.filtered_topics(), before);
    assert_eq!(harness.filtered_len(), 8);
}

#[test]
fn test_sector_filter_keeps_order() {
    let mut harness = TestHarness::with_events();
    let snapshot = harness.apply(FilterSpec::new().with(FilterKey::Sector, "Energy"));
    assert_eq!(snapshot.record_count, 4);
    assert_eq!(harness.filtered_topics(), vec!["oil", "gas", "oil", "oil"]);
}

#[test]
fn test_filter_is_case_insensitive() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Sector, "eNeRgY"));
    assert_eq!(harness.filtered_len(), 4);
}

#[test]
fn test_numeric_filter_uses_string_form() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Intensity, "6"));
    assert_eq!(harness.filtered_topics(), vec!["oil"]);

    harness.apply(FilterSpec::new().with(FilterKey::StartYear, "2017"));
    assert_eq!(harness.filtered_len(), 8);
}

#[test]
fn test_missing_field_never_matches() {
    let mut harness = TestHarness::with_events();
    // the "climate" record has no sector
    harness.apply(FilterSpec::new().with(FilterKey::Topic, "climate").with(FilterKey::Sector, "Energy"));
    assert_eq!(harness.filtered_len(), 0);
}

#[test]
fn test_conjunction_of_keys() {
    let mut harness = TestHarness::with_events();
    harness.apply(
        FilterSpec::new()
            .with(FilterKey::Sector, "technology")
            .with(FilterKey::Region, "asia"),
    );
    assert_eq!(harness.filtered_topics(), vec!["economy"]);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut harness = TestHarness::with_events();
    let snapshot = harness
        .dashboard
        .apply_filter_pairs(vec![("sector", "Retail"), ("colour", "blue"), ("topic", "")])
        .unwrap();
    assert_eq!(snapshot.record_count, 1);
    let state = harness.dashboard.state().unwrap();
    assert_eq!(active_filter_count(state.filter_spec()), 1);
}

#[test]
fn test_new_spec_replaces_old() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Sector, "Energy"));
    harness.apply(FilterSpec::new().with(FilterKey::Topic, "gas"));
    // the sector constraint is gone
    assert_eq!(harness.filtered_len(), 2);
}

#[test]
fn test_no_match_yields_no_data_everywhere() {
    let mut harness = TestHarness::with_events();
    let snapshot = harness.apply(FilterSpec::new().with(FilterKey::Country, "Atlantis"));
    assert_eq!(snapshot.record_count, 0);
    assert!(snapshot.views.iter().all(|v| v.model.is_no_data()));
}

#[test]
fn test_reset_restores_everything() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Sector, "Energy"));
    let snapshot = harness.dashboard.reset_filters().unwrap();
    assert_eq!(snapshot.record_count, 8);
    assert!(harness.dashboard.state().unwrap().filter_spec().is_empty());
}

#[test]
fn test_filter_spec_from_json_object() {
    let spec: FilterSpec =
        serde_json::from_str(r#"{"sector": "energy", "topic": "", "unknown": "x"}"#).unwrap();
    let mut harness = TestHarness::with_events();
    harness.apply(spec);
    assert_eq!(harness.filtered_len(), 4);
}

// ============================================================================
// FILTER AUTHORING
// ============================================================================

#[test]
fn test_filter_options_come_from_whole_dataset() {
    let mut harness = TestHarness::with_events();
    harness.apply(FilterSpec::new().with(FilterKey::Sector, "Retail"));

    let sectors = harness.dashboard.filter_options(FilterKey::Sector).unwrap();
    assert_eq!(sectors, vec!["Energy", "Retail", "Technology"]);

    let intensities = harness.dashboard.filter_options(FilterKey::Intensity).unwrap();
    assert_eq!(intensities, vec!["0", "10", "12", "2", "4", "6", "8"]);

    assert!(harness.dashboard.filter_options(FilterKey::EndYear).unwrap().is_empty());
}

#[test]
fn test_draft_submission() {
    let mut harness = TestHarness::with_events();
    let mut draft = FilterDraft::new();
    draft.set(FilterKey::Region, "Europe");
    draft.set(FilterKey::Topic, "gas");
    draft.set(FilterKey::Topic, "");
    assert_eq!(draft.active_count(), 1);

    let snapshot = harness.apply(draft.build());
    assert_eq!(snapshot.record_count, 2);
    assert!(!snapshot.view(ViewId::Treemap).unwrap().is_no_data());
}
