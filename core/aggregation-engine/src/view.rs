//! FILENAME: core/aggregation-engine/src/view.rs
//! Aggregation results - the shapes handed to rendering collaborators.
//!
//! These are plain serializable values. Nothing here knows about drawing;
//! a renderer receives them and decides how to present them.

use chrono::NaiveDateTime;
use engine::NumericField;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// RANKED COUNTS
// ============================================================================

/// One category with its number of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        CategoryCount {
            label: label.into(),
            count,
        }
    }
}

// ============================================================================
// GROUPED AVERAGES
// ============================================================================

/// Mean of one numeric field within a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldMean {
    pub field: NumericField,
    pub mean: f64,
    /// Records that carried the field; absent values are not counted.
    pub contributing: usize,
}

/// A category with its member count and the means of the requested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedAverage {
    pub category: String,
    pub count: usize,
    pub means: SmallVec<[FieldMean; 3]>,
}

impl GroupedAverage {
    pub fn mean(&self, field: NumericField) -> Option<f64> {
        self.means.iter().find(|m| m.field == field).map(|m| m.mean)
    }
}

/// Mean scores of one sector, for the multi-axis comparison view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorProfile {
    pub sector: String,
    pub count: usize,
    pub intensity: f64,
    pub likelihood: f64,
    pub relevance: f64,
}

// ============================================================================
// GEOGRAPHY
// ============================================================================

/// Summed value of one raw region label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTotal {
    pub region: String,
    pub value: f64,
}

/// How one map feature should be shaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureShade {
    pub admin: String,
    /// The data region key covering the feature, if any.
    pub region: Option<String>,
    /// The key's total; None means "no data".
    pub value: Option<f64>,
}

// ============================================================================
// POINTS
// ============================================================================

/// One record placed on a time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub added: NaiveDateTime,
    pub value: f64,
    pub topic: Option<String>,
}

/// One record's three scores, for scatter and bubble charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub intensity: Option<f64>,
    pub likelihood: Option<f64>,
    pub relevance: Option<f64>,
    pub topic: Option<String>,
}
