//! FILENAME: app/src/coordinator.rs
// PURPOSE: Keeps every view consistent with one filter state.
// CONTEXT: DashboardState is a plain value; each interaction produces the next
// state from the previous one. Dashboard wraps it in the load state machine
// and exposes command-style methods that log and fail closed until loaded.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use aggregation_engine::{region_map_shading, sum_by_region, FeatureShade};
use engine::{filter, Dataset, FilterKey, FilterSpec, FilteredDataset, MapFeature, NumericField, RegionResolver};
use persistence::LoadError;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::filters::filter_options;
use crate::views::{compute_view, ViewId, ViewModel};
use crate::{log_debug, log_enter, log_error, log_exit, log_info, log_warn};

// ============================================================================
// STATE
// ============================================================================

/// The interaction state: dataset, applied filters, their result, the
/// expanded view and the hidden legend topics.
#[derive(Debug, Clone)]
pub struct DashboardState {
    dataset: Arc<Dataset>,
    filter_spec: FilterSpec,
    filtered: Arc<FilteredDataset>,
    active_view: Option<ViewId>,
    hidden_topics: BTreeSet<String>,
    generation: u64,
}

/// One view of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub id: ViewId,
    pub title: &'static str,
    pub model: ViewModel,
}

/// Every view computed from the same filtered snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generation: u64,
    pub record_count: usize,
    pub active_view: Option<ViewId>,
    pub views: Vec<ViewSnapshot>,
}

impl DashboardSnapshot {
    pub fn view(&self, id: ViewId) -> Option<&ViewModel> {
        self.views.iter().find(|v| v.id == id).map(|v| &v.model)
    }
}

impl DashboardState {
    /// Initial state: no filters, every record, generation 0.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filtered = Arc::new(FilteredDataset::unfiltered(Arc::clone(&dataset), 0));
        DashboardState {
            dataset,
            filter_spec: FilterSpec::new(),
            filtered,
            active_view: None,
            hidden_topics: BTreeSet::new(),
            generation: 0,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter_spec
    }

    pub fn filtered(&self) -> &FilteredDataset {
        &self.filtered
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn hidden_topics(&self) -> &BTreeSet<String> {
        &self.hidden_topics
    }

    pub fn is_topic_visible(&self, topic: &str) -> bool {
        !self.hidden_topics.contains(topic)
    }

    /// Replaces the filters wholesale and recomputes the filtered set under a
    /// new generation. Legend toggles are reset.
    pub fn apply_filters(&self, spec: FilterSpec) -> Self {
        let generation = self.generation + 1;
        let filtered = Arc::new(filter::apply(&self.dataset, &spec, generation));
        DashboardState {
            dataset: Arc::clone(&self.dataset),
            filter_spec: spec,
            filtered,
            active_view: self.active_view,
            hidden_topics: BTreeSet::new(),
            generation,
        }
    }

    pub fn reset_filters(&self) -> Self {
        self.apply_filters(FilterSpec::default())
    }

    /// Expands `id`, or collapses it when it is already expanded. The filtered
    /// snapshot is shared with the previous state.
    pub fn toggle_view(&self, id: ViewId) -> Self {
        let mut next = self.clone();
        next.active_view = if self.active_view == Some(id) { None } else { Some(id) };
        next
    }

    /// Shows or hides one topic in the likelihood legend.
    pub fn toggle_topic(&self, topic: &str) -> Self {
        let mut next = self.clone();
        if !next.hidden_topics.remove(topic) {
            next.hidden_topics.insert(topic.to_string());
        }
        next
    }

    pub fn view(&self, id: ViewId, config: &DashboardConfig) -> ViewModel {
        compute_view(id, &self.filtered, &self.hidden_topics, config)
    }

    pub fn snapshot(&self, config: &DashboardConfig) -> DashboardSnapshot {
        DashboardSnapshot {
            generation: self.generation,
            record_count: self.filtered.len(),
            active_view: self.active_view,
            views: ViewId::ALL
                .iter()
                .map(|&id| ViewSnapshot {
                    id,
                    title: id.title(),
                    model: self.view(id, config),
                })
                .collect(),
        }
    }

    /// Shades map features from the region intensity totals of the current
    /// filtered set.
    pub fn region_shading(&self, features: &[MapFeature], resolver: &RegionResolver) -> Vec<FeatureShade> {
        let totals = sum_by_region(self.filtered.as_ref(), NumericField::Intensity);
        region_map_shading(&totals, features, resolver)
    }
}

// ============================================================================
// LOAD STATE MACHINE
// ============================================================================

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(DashboardState),
    /// Terminal; keeps the error message for display.
    Errored(String),
}

/// The dashboard: configuration plus the load state machine.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    resolver: RegionResolver,
    load: LoadState,
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard::new(DashboardConfig::default())
    }
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Dashboard {
            config,
            resolver: RegionResolver::new(),
            load: LoadState::Loading,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.load, LoadState::Loaded(_))
    }

    /// Completes the initial load. Only the first completion counts; there
    /// is no retry.
    pub fn finish_load(&mut self, result: Result<Dataset, LoadError>) -> Result<usize, DashboardError> {
        log_enter!("LOAD", "finish_load");

        if !matches!(self.load, LoadState::Loading) {
            log_warn!("LOAD", "load already completed, ignoring");
            return match &self.load {
                LoadState::Loaded(state) => Ok(state.dataset().len()),
                _ => Err(DashboardError::NotLoaded),
            };
        }

        match result {
            Ok(dataset) => {
                let count = dataset.len();
                self.load = LoadState::Loaded(DashboardState::new(Arc::new(dataset)));
                log_exit!("LOAD", "finish_load", "records={}", count);
                Ok(count)
            }
            Err(e) => {
                log_error!("LOAD", "dataset load failed: {}", e);
                self.load = LoadState::Errored(e.to_string());
                Err(DashboardError::Load(e))
            }
        }
    }

    pub fn load_from_str(&mut self, json: &str) -> Result<usize, DashboardError> {
        self.finish_load(persistence::parse_dataset(json))
    }

    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, DashboardError> {
        let path = path.as_ref();
        log_info!("LOAD", "reading dataset from {:?}", path);
        self.finish_load(persistence::load_dataset(path))
    }

    pub fn state(&self) -> Result<&DashboardState, DashboardError> {
        match &self.load {
            LoadState::Loaded(state) => Ok(state),
            _ => Err(DashboardError::NotLoaded),
        }
    }

    fn state_mut(&mut self) -> Result<&mut DashboardState, DashboardError> {
        match &mut self.load {
            LoadState::Loaded(state) => Ok(state),
            _ => Err(DashboardError::NotLoaded),
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Applies a new filter set and returns the recomputed views.
    pub fn apply_filters(&mut self, spec: FilterSpec) -> Result<DashboardSnapshot, DashboardError> {
        log_enter!("FILTER", "apply_filters", "constraints={}", spec.len());
        let config = self.config.clone();
        let state = self.state_mut()?;
        *state = state.apply_filters(spec);
        log_info!(
            "FILTER",
            "generation {} matched {} of {} records",
            state.generation(),
            state.filtered().len(),
            state.dataset().len()
        );
        let snapshot = state.snapshot(&config);
        log_exit!("FILTER", "apply_filters");
        Ok(snapshot)
    }

    /// Applies filters given as loose `(name, value)` pairs; unknown names
    /// are skipped.
    pub fn apply_filter_pairs<I, K, V>(&mut self, pairs: I) -> Result<DashboardSnapshot, DashboardError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut spec = FilterSpec::new();
        for (name, value) in pairs {
            match FilterKey::from_name(name.as_ref()) {
                Some(key) => spec.set(key, value),
                None => log_debug!("FILTER", "ignoring unknown filter key '{}'", name.as_ref()),
            }
        }
        self.apply_filters(spec)
    }

    pub fn reset_filters(&mut self) -> Result<DashboardSnapshot, DashboardError> {
        log_info!("FILTER", "reset filters");
        self.apply_filters(FilterSpec::default())
    }

    /// Toggles the expanded view by id and returns the new expanded view.
    pub fn toggle_view(&mut self, id: &str) -> Result<Option<ViewId>, DashboardError> {
        let state = self.state_mut()?;
        let view = match ViewId::from_id(id) {
            Some(view) => view,
            None => {
                log_warn!("VIEW", "unknown view '{}'", id);
                return Err(DashboardError::UnknownView(id.to_string()));
            }
        };
        *state = state.toggle_view(view);
        log_debug!("VIEW", "active view {:?}", state.active_view());
        Ok(state.active_view())
    }

    /// Flips a legend topic and returns whether it is now visible.
    pub fn toggle_topic(&mut self, topic: &str) -> Result<bool, DashboardError> {
        let state = self.state_mut()?;
        *state = state.toggle_topic(topic);
        let visible = state.is_topic_visible(topic);
        log_debug!("VIEW", "topic '{}' visible={}", topic, visible);
        Ok(visible)
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot, DashboardError> {
        Ok(self.state()?.snapshot(&self.config))
    }

    pub fn view(&self, id: ViewId) -> Result<ViewModel, DashboardError> {
        Ok(self.state()?.view(id, &self.config))
    }

    /// Choices for one filter, drawn from the whole dataset.
    pub fn filter_options(&self, key: FilterKey) -> Result<Vec<String>, DashboardError> {
        Ok(filter_options(self.state()?.dataset(), key))
    }

    pub fn region_shading(&self, features: &[MapFeature]) -> Result<Vec<FeatureShade>, DashboardError> {
        Ok(self.state()?.region_shading(features, &self.resolver))
    }
}
