//! FILENAME: app/src/views.rs
// PURPOSE: View registry and per-view model computation.
// CONTEXT: Each view is a pure function of one filtered snapshot plus the
// legend toggles. Renderers receive the ViewModel and nothing else.

use std::collections::BTreeSet;

use aggregation_engine::{
    average_by_category, count_by_category, distinct_values, scatter_points, sector_profile,
    sum_by_region, time_series, top_n_by_category, CategoryCount, GroupedAverage, RegionTotal,
    ScatterPoint, SectorProfile, TimePoint,
};
use engine::{Field, FilteredDataset, NumericField};
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Intensity,
    Likelihood,
    Relevance,
    TopicsDistribution,
    RegionMap,
    CountryView,
    CityView,
    BubbleChart,
    RadarChart,
    Treemap,
}

impl ViewId {
    /// Every view, in dashboard layout order.
    pub const ALL: [ViewId; 10] = [
        ViewId::Intensity,
        ViewId::Likelihood,
        ViewId::Relevance,
        ViewId::TopicsDistribution,
        ViewId::RegionMap,
        ViewId::CountryView,
        ViewId::CityView,
        ViewId::BubbleChart,
        ViewId::RadarChart,
        ViewId::Treemap,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ViewId::Intensity => "intensity",
            ViewId::Likelihood => "likelihood",
            ViewId::Relevance => "relevance",
            ViewId::TopicsDistribution => "topics_distribution",
            ViewId::RegionMap => "region_map",
            ViewId::CountryView => "country_view",
            ViewId::CityView => "city_view",
            ViewId::BubbleChart => "bubble_chart",
            ViewId::RadarChart => "radar_chart",
            ViewId::Treemap => "treemap",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewId::Intensity => "Intensity",
            ViewId::Likelihood => "Likelihood",
            ViewId::Relevance => "Relevance",
            ViewId::TopicsDistribution => "Topics Distribution",
            ViewId::RegionMap => "Region Map",
            ViewId::CountryView => "Country View",
            ViewId::CityView => "City View",
            ViewId::BubbleChart => "Bubble Chart",
            ViewId::RadarChart => "Radar Chart",
            ViewId::Treemap => "Treemap",
        }
    }

    pub fn from_id(id: &str) -> Option<ViewId> {
        ViewId::ALL.iter().copied().find(|v| v.id() == id)
    }
}

// ============================================================================
// VIEW MODELS
// ============================================================================

/// A time-series point with its legend visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    #[serde(flatten)]
    pub point: TimePoint,
    pub visible: bool,
}

/// One legend entry of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub topic: String,
    pub visible: bool,
}

/// The derived shape one view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ViewModel {
    /// Category counts, either ranked and capped or in first-occurrence order.
    RankedCounts { field: Field, entries: Vec<CategoryCount> },
    /// Top categories with their mean scores.
    GroupedAverages { field: Field, groups: Vec<GroupedAverage> },
    /// Region totals: the full map data, the bar selection and the colour
    /// domain upper bound.
    RegionMap {
        totals: Vec<RegionTotal>,
        top: Vec<RegionTotal>,
        max_value: f64,
    },
    SectorProfile { sectors: Vec<SectorProfile> },
    TimeSeries {
        field: NumericField,
        points: Vec<SeriesPoint>,
        legend: Vec<LegendEntry>,
    },
    Scatter { points: Vec<ScatterPoint> },
    /// The filtered set is empty.
    NoData,
}

impl ViewModel {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ViewModel::NoData)
    }
}

fn time_series_view(
    filtered: &FilteredDataset,
    field: NumericField,
    hidden_topics: &BTreeSet<String>,
) -> ViewModel {
    let visible = |topic: Option<&str>| topic.map_or(true, |t| !hidden_topics.contains(t));

    let points = time_series(filtered, field)
        .into_iter()
        .map(|point| SeriesPoint {
            visible: visible(point.topic.as_deref()),
            point,
        })
        .collect();

    let legend = distinct_values(filtered, Field::Topic)
        .into_iter()
        .map(|topic| LegendEntry {
            visible: visible(Some(topic.as_str())),
            topic,
        })
        .collect();

    ViewModel::TimeSeries { field, points, legend }
}

/// Computes the model of view `id` from one filtered snapshot.
pub fn compute_view(
    id: ViewId,
    filtered: &FilteredDataset,
    hidden_topics: &BTreeSet<String>,
    config: &DashboardConfig,
) -> ViewModel {
    if filtered.is_empty() {
        return ViewModel::NoData;
    }

    match id {
        ViewId::Intensity => {
            // the intensity chart has no legend toggles
            time_series_view(filtered, NumericField::Intensity, &BTreeSet::new())
        }
        ViewId::Likelihood => time_series_view(filtered, NumericField::Likelihood, hidden_topics),
        ViewId::Relevance | ViewId::BubbleChart => ViewModel::Scatter {
            points: scatter_points(filtered),
        },
        ViewId::TopicsDistribution => ViewModel::RankedCounts {
            field: Field::Topic,
            entries: top_n_by_category(filtered, Field::Topic, config.topics_top_n),
        },
        ViewId::RegionMap => {
            let totals = sum_by_region(filtered, NumericField::Intensity);
            ViewModel::RegionMap {
                top: totals.top(config.region_display_cap),
                max_value: totals.max_value(),
                totals: totals.to_vec(),
            }
        }
        ViewId::CountryView => ViewModel::GroupedAverages {
            field: Field::Country,
            groups: average_by_category(
                filtered,
                Field::Country,
                &[NumericField::Intensity],
                config.country_top_k,
            ),
        },
        ViewId::CityView => ViewModel::GroupedAverages {
            field: Field::City,
            groups: average_by_category(
                filtered,
                Field::City,
                &[NumericField::Relevance],
                config.city_top_k,
            ),
        },
        ViewId::RadarChart => ViewModel::SectorProfile {
            sectors: sector_profile(filtered),
        },
        ViewId::Treemap => ViewModel::RankedCounts {
            field: Field::Topic,
            entries: count_by_category(filtered, Field::Topic),
        },
    }
}
