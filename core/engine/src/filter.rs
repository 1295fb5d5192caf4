//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Field-constraint filtering of the dataset.
//! CONTEXT: A `FilterSpec` maps a fixed set of eleven keys to a selected value.
//! A record passes when, for every constrained key, the string form of its
//! field equals the selected value ignoring case. A record missing the field
//! never passes a constrained key. Unknown key names are ignored when a spec
//! is built from loose pairs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, FilteredDataset};
use crate::record::{Field, Record};

// ============================================================================
// FILTER KEYS
// ============================================================================

/// The keys a filter can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    EndYear,
    Intensity,
    Sector,
    Topic,
    Region,
    StartYear,
    Country,
    Relevance,
    Pestle,
    Source,
    Likelihood,
}

impl FilterKey {
    pub const ALL: [FilterKey; 11] = [
        FilterKey::EndYear,
        FilterKey::Intensity,
        FilterKey::Sector,
        FilterKey::Topic,
        FilterKey::Region,
        FilterKey::StartYear,
        FilterKey::Country,
        FilterKey::Relevance,
        FilterKey::Pestle,
        FilterKey::Source,
        FilterKey::Likelihood,
    ];

    /// The record field this key constrains.
    pub fn field(self) -> Field {
        match self {
            FilterKey::EndYear => Field::EndYear,
            FilterKey::Intensity => Field::Intensity,
            FilterKey::Sector => Field::Sector,
            FilterKey::Topic => Field::Topic,
            FilterKey::Region => Field::Region,
            FilterKey::StartYear => Field::StartYear,
            FilterKey::Country => Field::Country,
            FilterKey::Relevance => Field::Relevance,
            FilterKey::Pestle => Field::Pestle,
            FilterKey::Source => Field::Source,
            FilterKey::Likelihood => Field::Likelihood,
        }
    }

    pub fn name(self) -> &'static str {
        self.field().name()
    }

    pub fn from_name(name: &str) -> Option<FilterKey> {
        FilterKey::ALL.iter().copied().find(|k| k.name() == name)
    }
}

// ============================================================================
// FILTER SPEC
// ============================================================================

/// An immutable set of field constraints. Keys without a value are
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FilterSpec {
    constraints: BTreeMap<FilterKey, String>,
}

impl FilterSpec {
    /// The all-empty spec.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Builds a spec from loose `(name, value)` pairs. Unknown names and empty
    /// values are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut spec = FilterSpec::new();
        for (name, value) in pairs {
            if let Some(key) = FilterKey::from_name(name.as_ref()) {
                spec.set(key, value);
            }
        }
        spec
    }

    /// Returns a copy of this spec with `key` set to `value`.
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets or clears (with an empty value) one constraint.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.constraints.remove(&key);
        } else {
            self.constraints.insert(key, value);
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.constraints.get(&key).map(String::as_str)
    }

    /// True when no key is constrained.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of constrained keys.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> + '_ {
        self.constraints.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for FilterSpec {
    fn from(map: BTreeMap<String, String>) -> Self {
        FilterSpec::from_pairs(map)
    }
}

impl From<FilterSpec> for BTreeMap<String, String> {
    fn from(spec: FilterSpec) -> Self {
        spec.constraints
            .into_iter()
            .map(|(k, v)| (k.name().to_string(), v))
            .collect()
    }
}

// ============================================================================
// FILTER APPLICATION
// ============================================================================

/// A constraint with its value lowercased once, ahead of the scan.
struct PreparedConstraint {
    field: Field,
    lowered: String,
}

fn prepare(spec: &FilterSpec) -> Vec<PreparedConstraint> {
    spec.iter()
        .map(|(key, value)| PreparedConstraint {
            field: key.field(),
            lowered: value.chars().flat_map(char::to_lowercase).collect(),
        })
        .collect()
}

fn passes(record: &Record, constraints: &[PreparedConstraint]) -> bool {
    constraints.iter().all(|c| match record.text(c.field) {
        Some(text) => text.chars().flat_map(char::to_lowercase).eq(c.lowered.chars()),
        None => false,
    })
}

/// True when `record` satisfies every constraint of `spec`.
pub fn matches(record: &Record, spec: &FilterSpec) -> bool {
    passes(record, &prepare(spec))
}

/// Applies `spec` to `dataset`, keeping dataset order. An empty spec returns
/// every record.
pub fn apply(dataset: &Arc<Dataset>, spec: &FilterSpec, generation: u64) -> FilteredDataset {
    if spec.is_empty() {
        return FilteredDataset::unfiltered(Arc::clone(dataset), generation);
    }

    let constraints = prepare(spec);
    let indices = dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| passes(record, &constraints))
        .map(|(i, _)| i)
        .collect();

    FilteredDataset::from_indices(Arc::clone(dataset), indices, generation)
}
