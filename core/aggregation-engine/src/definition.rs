//! FILENAME: core/aggregation-engine/src/definition.rs
//! Aggregation defaults and the mean accumulator.
//!
//! The numbers here are the caps the dashboard views use unless a
//! configuration overrides them.

/// Ranked-count views keep this many categories before folding the rest.
pub const DEFAULT_TOP_N: usize = 9;

/// Grouped-average tables keep this many categories.
pub const DEFAULT_TOP_K: usize = 10;

/// The region bar chart shows at most this many regions.
pub const REGION_DISPLAY_CAP: usize = 10;

/// Label of the bucket holding every category past the top N.
pub const OTHER_LABEL: &str = "Other";

/// Accumulates one numeric field for one group.
///
/// Records lacking the field are not added, so they do not count towards
/// the denominator of the mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    pub sum: f64,
    pub count_numbers: usize,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        MeanAccumulator::default()
    }

    pub fn add_number(&mut self, value: f64) {
        self.sum += value;
        self.count_numbers += 1;
    }

    /// Adds the value if present; an absent value is skipped entirely.
    pub fn add_optional(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.add_number(v);
        }
    }

    /// Arithmetic mean of the contributed values, or 0 with no contributors.
    pub fn mean(&self) -> f64 {
        if self.count_numbers == 0 {
            0.0
        } else {
            self.sum / self.count_numbers as f64
        }
    }
}
