//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the record engine.
//! CONTEXT: Record schema, dataset, filtering and region classification.
//! Re-exports public types for use by the aggregation and dashboard crates.

pub mod dataset;
pub mod filter;
pub mod record;
pub mod region;

// Re-export commonly used types at the crate root
pub use dataset::{Dataset, FilteredDataset};
pub use filter::{FilterKey, FilterSpec};
pub use record::{
    eq_ignore_case, format_number, Field, FieldValue, NumericField, Record, ADDED_FORMAT,
};
pub use region::{MapFeature, RegionDef, RegionMember, RegionResolver, Resolution, REGIONS};
