use std::path::PathBuf;

use crate::chart::{render, RenderOutput, TextMeasure};
use crate::config::ChartLayout;
use crate::data::model::{HospitalAggregate, PriceDataset};
use crate::ui::tooltip::TooltipState;

/// Message shown in place of the chart when the CSV cannot be read.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load CSV";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading(PathBuf),
    Loaded,
    /// Terminal for the current file; holds the underlying error text.
    Failed(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<PriceDataset>,

    /// File the current dataset (or failure) came from.
    pub source: Option<PathBuf>,

    /// Code shown in the chart.
    pub selected_code: Option<String>,

    /// Chart for `selected_code`, rebuilt on every selection change.
    pub scene: Option<RenderOutput>,

    pub layout: ChartLayout,

    pub tooltip: TooltipState,

    pub status: LoadStatus,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            selected_code: None,
            scene: None,
            layout: ChartLayout::default(),
            tooltip: TooltipState::default(),
            status: LoadStatus::Idle,
        }
    }
}

impl AppState {
    pub fn begin_load(&mut self, path: PathBuf) {
        self.status = LoadStatus::Loading(path);
    }

    /// Ingest a newly loaded dataset and select its first code.
    pub fn set_dataset(&mut self, dataset: PriceDataset, source: PathBuf, measure: &dyn TextMeasure) {
        let first = dataset.default_code().map(str::to_string);
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status = LoadStatus::Loaded;
        self.selected_code = None;
        self.scene = None;
        self.tooltip.hide();

        if let Some(code) = first {
            self.select_code(&code, measure);
        }
    }

    /// Drop any loaded data and show the failure message instead.
    pub fn load_failed(&mut self, source: PathBuf, error: String) {
        self.dataset = None;
        self.source = Some(source);
        self.selected_code = None;
        self.scene = None;
        self.tooltip.hide();
        self.status = LoadStatus::Failed(error);
    }

    /// Switch the chart to `code`, replacing the previous scene.
    pub fn select_code(&mut self, code: &str, measure: &dyn TextMeasure) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.scene = Some(render(ds, code, &self.layout, measure));
        self.selected_code = Some(code.to_string());
        self.tooltip.hide();
    }

    /// Aggregates behind the current chart.
    pub fn aggregates(&self) -> Vec<&HospitalAggregate> {
        self.scene
            .as_ref()
            .map(|s| s.aggregates().collect())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading(_))
    }
}
