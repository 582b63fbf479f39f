use crate::config::DashboardConfig;
use crate::data::aggregate::{
    count_by_type, eligibility_split, range_series, summarize, EligibilitySplit,
};
use crate::data::filter::{filtered_indices, select, Selector};
use crate::data::loader::LoadOutcome;
use crate::data::model::EvDataset;
use crate::data::view::{
    display_rows, eligibility_chart, manufacturer_choices, paginate, range_chart, summary_cards,
    BarChartData, Choice, DisplayRow, Page, PieChartData, SummaryCard,
};

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything computed from {dataset, selector}. Rebuilt from scratch on
/// every change, never edited in place.
#[derive(Debug, Clone)]
pub struct DerivedViews {
    /// Indices of entries passing the selector.
    pub visible_indices: Vec<usize>,
    pub eligibility: EligibilitySplit,
    pub rows: Vec<DisplayRow>,
    pub cards: Vec<SummaryCard>,
    pub range_chart: BarChartData,
    pub eligibility_chart: PieChartData,
}

impl Default for DerivedViews {
    fn default() -> Self {
        Self::compute(&EvDataset::default(), None, 0)
    }
}

impl DerivedViews {
    pub fn compute(dataset: &EvDataset, selector: Option<&str>, chart_limit: usize) -> Self {
        let visible_indices = filtered_indices(&dataset.entries, selector);
        let visible = select(&dataset.entries, &visible_indices);

        let type_counts = count_by_type(&visible);
        let eligibility = eligibility_split(&visible);
        let range_series = range_series(&visible);
        let summary = summarize(&visible);

        Self {
            rows: display_rows(&dataset.entries, &visible_indices),
            cards: summary_cards(&summary, &type_counts, eligibility),
            range_chart: range_chart(&range_series, chart_limit),
            eligibility_chart: eligibility_chart(eligibility),
            visible_indices,
            eligibility,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// The full session state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<EvDataset>,

    /// Manufacturer picker entries; depends only on the dataset.
    pub choices: Vec<Choice>,

    /// Active manufacturer filter.
    pub selector: Selector,

    pub views: DerivedViews,

    /// Zero-based table page.
    pub page: usize,

    pub status: LoadStatus,

    /// Dismissable error notification.
    pub status_message: Option<String>,

    /// Generation of the most recently started load.
    generation: u64,

    page_size: usize,
    chart_limit: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            choices: Vec::new(),
            selector: None,
            views: DerivedViews::default(),
            page: 0,
            status: LoadStatus::Idle,
            status_message: None,
            generation: 0,
            page_size: config.page_size,
            chart_limit: config.chart_limit,
        }
    }

    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Enter `Loading` and return the generation the caller must tag its
    /// outcome with.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.generation
    }

    /// Apply a finished load. Outcomes from superseded loads are dropped;
    /// returns whether the outcome was applied.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.generation != self.generation {
            log::warn!(
                "Ignoring stale load #{} (current is #{})",
                outcome.generation,
                self.generation
            );
            return false;
        }

        match outcome.result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} vehicles from {} manufacturers",
                    dataset.len(),
                    dataset.manufacturers.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
                self.status = LoadStatus::Failed;
            }
        }
        true
    }

    /// Ingest a newly loaded dataset and rebuild all views.
    fn set_dataset(&mut self, dataset: EvDataset) {
        self.choices = manufacturer_choices(&dataset);
        self.dataset = Some(dataset);
        self.status = LoadStatus::Loaded;
        self.status_message = None;
        self.recompute();
    }

    /// Change the manufacturer filter. Does not touch the load status.
    pub fn set_filter(&mut self, selector: Selector) {
        log::debug!("Manufacturer filter: {selector:?}");
        self.selector = selector;
        self.page = 0;
        self.recompute();
    }

    /// Recompute every derived view from {dataset, selector}.
    pub fn recompute(&mut self) {
        self.views = match &self.dataset {
            Some(ds) => DerivedViews::compute(ds, self.selector.as_deref(), self.chart_limit),
            None => DerivedViews::default(),
        };
        self.page = self.current_page().page;
    }

    pub fn dismiss_error(&mut self) {
        self.status_message = None;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.page = self.current_page().page;
    }

    pub fn current_page(&self) -> Page<'_> {
        paginate(&self.views.rows, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::loader::tests::serve_once;
    use crate::data::loader::{load, DatasetSource, LoadError};
    use crate::data::model::EvEntry;

    fn ev(make: &str, model: &str, ty: &str, cafv: &str) -> EvEntry {
        EvEntry {
            manufacturer: Some(make.into()),
            model: Some(model.into()),
            vehicle_type: Some(ty.into()),
            cafv_eligibility: Some(cafv.into()),
            electric_range: Some(100.0),
            ..Default::default()
        }
    }

    fn dataset() -> EvDataset {
        EvDataset::from_entries(vec![
            ev("TESLA", "MODEL 3", "BEV", "Clean Alternative Fuel Vehicle Eligible"),
            ev("NISSAN", "LEAF", "BEV", "Not eligible due to low battery range"),
            ev("TESLA", "MODEL Y", "BEV", "Eligible"),
            ev("TOYOTA", "PRIUS PRIME", "PHEV", "Not eligible due to low battery range"),
        ])
    }

    fn io_failure() -> LoadError {
        LoadError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
    }

    fn card<'a>(state: &'a AppState, label: &str) -> Option<&'a str> {
        state
            .views
            .cards
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.value.as_str())
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        let generation = state.begin_load();
        assert!(state.apply_outcome(LoadOutcome {
            generation,
            result: Ok(dataset()),
        }));
        state
    }

    #[test]
    fn starts_idle() {
        let state = AppState::default();
        assert_eq!(state.status, LoadStatus::Idle);
        assert!(state.views.rows.is_empty());
    }

    #[test]
    fn successful_load_computes_views() {
        let state = loaded();

        assert_eq!(state.status, LoadStatus::Loaded);
        assert!(!state.loading());
        assert_eq!(state.views.visible_indices.len(), 4);
        assert_eq!(card(&state, "BEV"), Some("3"));
        assert_eq!(state.views.eligibility.eligible, 2);
        assert_eq!(state.views.eligibility.not_eligible, 2);
        assert_eq!(
            state.choices.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
            vec!["TESLA", "NISSAN", "TOYOTA"]
        );
    }

    #[test]
    fn failed_load_keeps_one_message_and_no_dataset() {
        let mut state = AppState::default();
        let generation = state.begin_load();
        assert!(state.loading());

        state.apply_outcome(LoadOutcome {
            generation,
            result: Err(io_failure()),
        });

        assert_eq!(state.status, LoadStatus::Failed);
        assert!(state.dataset.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("missing.csv")));

        state.dismiss_error();
        assert!(state.status_message.is_none());
        assert_eq!(state.status, LoadStatus::Failed);
    }

    #[test]
    fn http_error_status_fails_the_session() {
        let url = serve_once("503 Service Unavailable");
        let mut state = AppState::default();
        let generation = state.begin_load();

        let result = load(&DatasetSource::Url(url));
        assert!(matches!(result, Err(LoadError::Status { .. })));
        assert!(state.apply_outcome(LoadOutcome { generation, result }));

        assert_eq!(state.status, LoadStatus::Failed);
        assert!(state.dataset.is_none());
        assert!(state.views.rows.is_empty());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("503")));
    }

    #[test]
    fn filter_rederives_without_touching_status_or_choices() {
        let mut state = loaded();
        state.set_filter(Some("TESLA".into()));

        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.views.visible_indices, vec![0, 2]);
        assert_eq!(card(&state, "Total Vehicles"), Some("2"));
        assert_eq!(card(&state, "BEV"), Some("2"));
        assert_eq!(state.views.eligibility.total(), 2);
        assert_eq!(state.views.range_chart.labels[1], "TESLA MODEL Y");
        assert_eq!(state.choices.len(), 3);

        let before = state.views.rows.clone();
        state.set_filter(Some("TESLA".into()));
        assert_eq!(state.views.rows, before);

        state.set_filter(None);
        assert_eq!(state.views.visible_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unknown_manufacturer_gives_empty_views() {
        let mut state = loaded();
        state.set_filter(Some("RIVIAN".into()));

        assert!(state.views.rows.is_empty());
        assert_eq!(state.views.eligibility, EligibilitySplit::default());
        assert_eq!(state.current_page().page_count, 1);
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut state = AppState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(!state.apply_outcome(LoadOutcome {
            generation: first,
            result: Err(io_failure()),
        }));
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.status_message.is_none());

        assert!(state.apply_outcome(LoadOutcome {
            generation: second,
            result: Ok(dataset()),
        }));
        assert_eq!(state.status, LoadStatus::Loaded);
    }

    #[test]
    fn filter_before_data_arrives_applies_on_load() {
        let mut state = AppState::default();
        state.set_filter(Some("NISSAN".into()));
        let generation = state.begin_load();
        state.apply_outcome(LoadOutcome {
            generation,
            result: Ok(dataset()),
        });

        assert_eq!(state.views.visible_indices, vec![1]);
    }

    #[test]
    fn paging_clamps_and_resets_on_filter() {
        let config = DashboardConfig {
            page_size: 3,
            ..Default::default()
        };
        let mut state = AppState::new(&config);
        let generation = state.begin_load();
        state.apply_outcome(LoadOutcome {
            generation,
            result: Ok(dataset()),
        });

        state.set_page(5);
        assert_eq!(state.page, 1);
        assert_eq!(state.current_page().rows.len(), 1);

        state.set_filter(Some("TESLA".into()));
        assert_eq!(state.page, 0);
    }
}
