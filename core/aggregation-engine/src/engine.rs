//! FILENAME: core/aggregation-engine/src/engine.rs
//! Aggregation Engine - turns a record sequence into per-view summaries.
//!
//! Every function accepts any iterator of record references (a filtered
//! dataset, a slice, a Vec of records) and returns an owned result.
//!
//! Ordering rules:
//! 1. Groups are discovered in first-occurrence order.
//! 2. Rankings sort descending with a stable sort, so equal counts keep
//!    their first-occurrence order.
//! 3. Records whose grouping field is absent are left out of the grouping.

use std::cmp::Ordering;

use engine::{Field, MapFeature, NumericField, Record, RegionResolver};
use smallvec::SmallVec;

use crate::definition::{MeanAccumulator, OTHER_LABEL};
use crate::grouping::{FxIndexMap, GroupTable};
use crate::view::{
    CategoryCount, FeatureShade, FieldMean, GroupedAverage, RegionTotal, ScatterPoint,
    SectorProfile, TimePoint,
};

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ============================================================================
// COUNTS
// ============================================================================

/// Record count per category, uncapped, in first-occurrence order.
pub fn count_by_category<'a, I>(records: I, field: Field) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    GroupTable::build(records, field, || 0usize, |count, _| *count += 1)
        .into_vec()
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect()
}

/// Ranked counts capped at `n` categories. Remaining categories are folded
/// into a single "Other" bucket, which is omitted when nothing remains.
pub fn top_n_by_category<'a, I>(records: I, field: Field, n: usize) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ranked = count_by_category(records, field);
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    if ranked.len() > n {
        let other: usize = ranked[n..].iter().map(|c| c.count).sum();
        ranked.truncate(n);
        ranked.push(CategoryCount::new(OTHER_LABEL, other));
    }
    ranked
}

/// Distinct values of `field` in first-occurrence order (legend order).
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    GroupTable::build(records, field, || (), |_, _| {})
        .into_vec()
        .into_iter()
        .map(|(label, _)| label)
        .collect()
}

// ============================================================================
// AVERAGES
// ============================================================================

struct GroupAccumulator {
    count: usize,
    values: SmallVec<[MeanAccumulator; 3]>,
}

/// Groups by `group_field` and accumulates each value field, unsorted.
fn group_means<'a, I>(records: I, group_field: Field, value_fields: &[NumericField]) -> Vec<GroupedAverage>
where
    I: IntoIterator<Item = &'a Record>,
{
    let table = GroupTable::build(
        records,
        group_field,
        || GroupAccumulator {
            count: 0,
            values: value_fields.iter().map(|_| MeanAccumulator::new()).collect(),
        },
        |acc, record| {
            acc.count += 1;
            for (slot, field) in acc.values.iter_mut().zip(value_fields) {
                slot.add_optional(record.number(*field));
            }
        },
    );

    table
        .into_vec()
        .into_iter()
        .map(|(category, acc)| GroupedAverage {
            category,
            count: acc.count,
            means: acc
                .values
                .iter()
                .zip(value_fields)
                .map(|(slot, field)| FieldMean {
                    field: *field,
                    mean: slot.mean(),
                    contributing: slot.count_numbers,
                })
                .collect(),
        })
        .collect()
}

/// Mean of each value field per category, ranked by member count and capped
/// at `top_k`. A record without a value field still counts as a member but
/// is left out of that field's mean.
pub fn average_by_category<'a, I>(
    records: I,
    group_field: Field,
    value_fields: &[NumericField],
    top_k: usize,
) -> Vec<GroupedAverage>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = group_means(records, group_field, value_fields);
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(top_k);
    groups
}

/// Mean intensity, likelihood and relevance of every sector, in
/// first-occurrence order.
pub fn sector_profile<'a, I>(records: I) -> Vec<SectorProfile>
where
    I: IntoIterator<Item = &'a Record>,
{
    group_means(records, Field::Sector, &NumericField::ALL)
        .into_iter()
        .map(|group| SectorProfile {
            intensity: group.mean(NumericField::Intensity).unwrap_or(0.0),
            likelihood: group.mean(NumericField::Likelihood).unwrap_or(0.0),
            relevance: group.mean(NumericField::Relevance).unwrap_or(0.0),
            count: group.count,
            sector: group.category,
        })
        .collect()
}

// ============================================================================
// REGIONS
// ============================================================================

/// Summed value per raw region label, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct RegionTotals {
    totals: FxIndexMap<String, f64>,
}

impl RegionTotals {
    pub fn get(&self, region: &str) -> Option<f64> {
        self.totals.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Region labels in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.totals.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum over all regions.
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// The `k` largest totals, descending; ties keep first-occurrence order.
    pub fn top(&self, k: usize) -> Vec<RegionTotal> {
        let mut sorted = self.to_vec();
        sorted.sort_by(|a, b| descending(a.value, b.value));
        sorted.truncate(k);
        sorted
    }

    /// Upper bound of the colour scale: the largest total, or 1 when there is
    /// nothing positive to scale against.
    pub fn max_value(&self) -> f64 {
        let max = self.totals.values().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    pub fn to_vec(&self) -> Vec<RegionTotal> {
        self.iter()
            .map(|(region, value)| RegionTotal {
                region: region.to_string(),
                value,
            })
            .collect()
    }
}

/// Sums `value_field` per raw `region` label. Labels are used verbatim (no
/// classification); a missing value adds 0; records without a region are
/// skipped.
pub fn sum_by_region<'a, I>(records: I, value_field: NumericField) -> RegionTotals
where
    I: IntoIterator<Item = &'a Record>,
{
    let table = GroupTable::build(records, Field::Region, || 0.0_f64, |sum, record| {
        *sum += record.number(value_field).unwrap_or(0.0)
    });
    RegionTotals {
        totals: table.into_vec().into_iter().collect(),
    }
}

/// Shades each map feature with the total of the first region key (in
/// first-occurrence order) that covers it.
pub fn region_map_shading(
    totals: &RegionTotals,
    features: &[MapFeature],
    resolver: &RegionResolver,
) -> Vec<FeatureShade> {
    features
        .iter()
        .map(|feature| {
            let region = resolver.resolve_feature(feature, totals.keys());
            FeatureShade {
                admin: feature.admin.clone(),
                value: region.and_then(|r| totals.get(r)),
                region: region.map(str::to_string),
            }
        })
        .collect()
}

// ============================================================================
// POINTS
// ============================================================================

/// Records with a parseable `added` timestamp and a value for `value_field`,
/// sorted by time. Records with equal timestamps keep dataset order.
pub fn time_series<'a, I>(records: I, value_field: NumericField) -> Vec<TimePoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut points: Vec<TimePoint> = records
        .into_iter()
        .filter_map(|record| {
            Some(TimePoint {
                added: record.added_at()?,
                value: record.number(value_field)?,
                topic: record.topic.clone(),
            })
        })
        .collect();
    points.sort_by(|a, b| a.added.cmp(&b.added));
    points
}

/// One point per record with its three scores.
pub fn scatter_points<'a, I>(records: I) -> Vec<ScatterPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| ScatterPoint {
            intensity: record.intensity,
            likelihood: record.likelihood,
            relevance: record.relevance,
            topic: record.topic.clone(),
        })
        .collect()
}
