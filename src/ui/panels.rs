use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::export::{write_json, write_svg};
use crate::state::{AppState, LoadStatus};

use super::chart::EguiMeasure;

/// Requests from the panels that the app must act on.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    None,
    Open(PathBuf),
}

// ---------------------------------------------------------------------------
// Left side panel – code selection
// ---------------------------------------------------------------------------

/// Render the code selector and the metadata summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Billing code");
    ui.separator();

    let codes = match &state.dataset {
        Some(ds) => ds.codes.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    if codes.is_empty() {
        ui.label("No usable rows in this file.");
        return;
    }

    let current = state.selected_code.clone().unwrap_or_default();
    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("code_select")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(400.0).show(ui, |ui: &mut Ui| {
                for code in &codes {
                    if ui.selectable_label(current == *code, code).clicked() {
                        chosen = Some(code.clone());
                    }
                }
            });
        });

    if let Some(code) = chosen.filter(|c| *c != current) {
        log::debug!("Selected code {code}");
        let ctx = ui.ctx().clone();
        state.select_code(&code, &EguiMeasure { ctx: &ctx });
    }

    ui.separator();
    if let Some(scene) = &state.scene {
        ui.label(&scene.meta_line);
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("{} hospitals", state.aggregates().len())).weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> PanelAction {
    let mut action = PanelAction::None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = open_file_dialog() {
                    action = PanelAction::Open(path);
                }
                ui.close_menu();
            }

            ui.separator();

            let has_chart = state.scene.is_some();
            if ui
                .add_enabled(has_chart, egui::Button::new("Export SVG…"))
                .clicked()
            {
                export_svg_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_chart, egui::Button::new("Export JSON…"))
                .clicked()
            {
                export_json_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.status {
            LoadStatus::Idle => {}
            LoadStatus::Loading(path) => {
                ui.spinner();
                ui.label(format!("Loading {}", path.display()));
            }
            LoadStatus::Loaded => {
                if let (Some(ds), Some(path)) = (&state.dataset, &state.source) {
                    ui.label(format!(
                        "{}: {} rows, {} codes",
                        path.display(),
                        ds.len(),
                        ds.codes.len()
                    ));
                }
            }
            LoadStatus::Failed(err) => {
                ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
            }
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open hospital price data")
        .add_filter("CSV", &["csv"])
        .pick_file()
}

fn export_svg_dialog(state: &AppState) {
    let Some(scene) = &state.scene else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(format!("{}.svg", scene.code))
        .add_filter("SVG", &["svg"])
        .save_file()
    else {
        return;
    };

    match write_svg(&path, scene) {
        Ok(()) => log::info!("Exported chart to {}", path.display()),
        Err(e) => log::error!("SVG export failed: {e:#}"),
    }
}

fn export_json_dialog(state: &AppState) {
    let Some(scene) = &state.scene else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export aggregates")
        .set_file_name(format!("{}.json", scene.code))
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    match write_json(&path, scene) {
        Ok(()) => log::info!("Exported {} aggregates to {}", scene.marks.len(), path.display()),
        Err(e) => log::error!("JSON export failed: {e:#}"),
    }
}
