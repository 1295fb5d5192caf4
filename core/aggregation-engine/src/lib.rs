//! FILENAME: core/aggregation-engine/src/lib.rs
//! Aggregation subsystem for the insight dashboard.
//!
//! This crate turns a (filtered) record sequence into per-view summaries.
//! It depends on `engine` for the record schema and region classification.
//! Every function is pure and total: the same input always yields the same
//! output, and empty input yields an empty result.
//!
//! Layers:
//! - `definition`: Defaults and accumulators (WHAT is aggregated)
//! - `grouping`: Insertion-ordered group tables (HOW records are bucketed)
//! - `view`: Result shapes handed to renderers (WHAT we display)
//! - `engine`: The aggregation functions (HOW we calculate)

pub mod definition;
pub mod grouping;
pub mod view;
pub mod engine;

pub use self::definition::*;
pub use self::view::*;
pub use self::engine::{
    average_by_category, count_by_category, distinct_values, region_map_shading,
    scatter_points, sector_profile, sum_by_region, time_series, top_n_by_category,
    RegionTotals,
};
