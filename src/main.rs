mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use app::PriceRangeApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let csv_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CSV_PATH));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 720.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hospital Price Ranges",
        options,
        Box::new(move |_cc| Ok(Box::new(PriceRangeApp::new(csv_path)))),
    )
}
