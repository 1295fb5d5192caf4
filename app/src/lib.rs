//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the insight dashboard.
// CONTEXT: Wires ingestion, filtering, aggregation and the view registry
// behind the Dashboard coordinator. Rendering stays outside this crate and
// consumes the serializable view models.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod filters;
pub mod logging;
pub mod views;

pub use config::DashboardConfig;
pub use coordinator::{Dashboard, DashboardSnapshot, DashboardState, LoadState, ViewSnapshot};
pub use error::DashboardError;
pub use filters::{active_filter_count, all_filter_options, filter_options, FilterDraft};
pub use logging::{get_log_path, init_log_file, next_seq, write_log};
pub use views::{compute_view, LegendEntry, SeriesPoint, ViewId, ViewModel};
