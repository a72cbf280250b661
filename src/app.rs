use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use crate::data::loader::{load_file, LoadError};
use crate::data::model::PriceDataset;
use crate::state::{AppState, LoadStatus};
use crate::ui::chart::{self, EguiMeasure};
use crate::ui::panels::{self, PanelAction};

/// Result of a background CSV load.
struct LoadResult {
    path: PathBuf,
    outcome: Result<PriceDataset, LoadError>,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PriceRangeApp {
    pub state: AppState,
    load_rx: Option<Receiver<LoadResult>>,
}

impl PriceRangeApp {
    /// Create the app and start loading `initial` in the background.
    pub fn new(initial: PathBuf) -> Self {
        let mut app = Self {
            state: AppState::default(),
            load_rx: None,
        };
        app.start_load(initial);
        app
    }

    /// Read `path` off the UI thread. A newer load supersedes an older one;
    /// the stale result is dropped with its receiver.
    fn start_load(&mut self, path: PathBuf) {
        log::info!("Loading {}", path.display());
        self.state.begin_load(path.clone());

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let outcome = load_file(&path);
            let _ = tx.send(LoadResult { path, outcome });
        });
    }

    fn check_load_results(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        let LoadResult { path, outcome } = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.load_rx = None;
                log::error!("CSV loader thread exited without a result");
                let path = match &self.state.status {
                    LoadStatus::Loading(path) => path.clone(),
                    _ => PathBuf::new(),
                };
                self.state.load_failed(path, "loader thread exited".to_string());
                return;
            }
        };
        self.load_rx = None;

        match outcome {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows covering {} codes from {}",
                    dataset.len(),
                    dataset.codes.len(),
                    path.display()
                );
                if dataset.is_empty() {
                    log::warn!("{} contains no usable price rows", path.display());
                }
                self.state.set_dataset(dataset, path, &EguiMeasure { ctx });
            }
            Err(e) => {
                log::error!("CSV load failed: {e}");
                self.state.load_failed(path, e.to_string());
            }
        }
    }
}

impl eframe::App for PriceRangeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results(ctx);
        if self.state.is_loading() {
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar ----
        let action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &self.state))
            .inner;
        if let PanelAction::Open(path) = action {
            self.start_load(path);
        }

        // ---- Left side panel: code selection ----
        egui::SidePanel::left("code_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            chart::chart_area(ui, &mut self.state);
        });
    }
}
