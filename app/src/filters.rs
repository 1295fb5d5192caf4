//! FILENAME: app/src/filters.rs
// PURPOSE: Filter authoring helpers: option lists, drafts and the active count.
// CONTEXT: A draft collects per-key edits; nothing is applied until the draft
// is built into a FilterSpec and handed to the coordinator.

use std::collections::{BTreeMap, BTreeSet};

use engine::{Dataset, FilterKey, FilterSpec};
use serde::{Deserialize, Serialize};

/// Sorted distinct non-empty values of the field behind `key`, in their
/// canonical string form. Sorting is by string, so "10" precedes "2".
pub fn filter_options(dataset: &Dataset, key: FilterKey) -> Vec<String> {
    let field = key.field();
    dataset
        .iter()
        .filter_map(|record| record.text(field))
        .filter(|value| !value.is_empty())
        .map(|value| value.into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Option lists for every filter key.
pub fn all_filter_options(dataset: &Dataset) -> BTreeMap<FilterKey, Vec<String>> {
    FilterKey::ALL
        .iter()
        .map(|&key| (key, filter_options(dataset, key)))
        .collect()
}

/// Number of constrained keys.
pub fn active_filter_count(spec: &FilterSpec) -> usize {
    spec.len()
}

// ============================================================================
// DRAFT
// ============================================================================

/// Pending filter edits. An empty selection means "all values".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDraft {
    selections: BTreeMap<FilterKey, String>,
}

impl FilterDraft {
    pub fn new() -> Self {
        FilterDraft::default()
    }

    /// Starts from the currently applied filters.
    pub fn from_spec(spec: &FilterSpec) -> Self {
        FilterDraft {
            selections: spec.iter().map(|(k, v)| (k, v.to_string())).collect(),
        }
    }

    /// Merges one edit over the previous draft.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        self.selections.insert(key, value.into());
    }

    pub fn get(&self, key: FilterKey) -> &str {
        self.selections.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Clears every selection.
    pub fn reset(&mut self) {
        self.selections.clear();
    }

    /// Keys with a non-empty selection.
    pub fn active_count(&self) -> usize {
        self.selections.values().filter(|v| !v.is_empty()).count()
    }

    /// The spec the draft would apply. Empty selections are dropped.
    pub fn build(&self) -> FilterSpec {
        let mut spec = FilterSpec::new();
        for (key, value) in &self.selections {
            spec.set(*key, value.as_str());
        }
        spec
    }

    /// True when submitting the draft would change `applied`.
    pub fn differs_from(&self, applied: &FilterSpec) -> bool {
        self.build() != *applied
    }
}
