//! FILENAME: app/src/config.rs
// PURPOSE: Tunable caps for the dashboard views.
// CONTEXT: Every field falls back to its default, so a partial JSON document
// only overrides what it names.

use aggregation_engine::{DEFAULT_TOP_K, DEFAULT_TOP_N, REGION_DISPLAY_CAP};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Categories kept by the topics distribution before "Other"
    pub topics_top_n: usize,
    /// Rows of the country table
    pub country_top_k: usize,
    /// Rows of the city table
    pub city_top_k: usize,
    /// Bars of the region chart
    pub region_display_cap: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            topics_top_n: DEFAULT_TOP_N,
            country_top_k: DEFAULT_TOP_K,
            city_top_k: DEFAULT_TOP_K,
            region_display_cap: REGION_DISPLAY_CAP,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(json)?)
    }
}
