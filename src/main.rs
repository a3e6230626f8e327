mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::DashboardApp;
use config::{CONFIG_FILE, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    // Optional first argument: data directory.
    if let Some(dir) = std::env::args_os().nth(1) {
        config.data_dir = PathBuf::from(dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Market Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(AppState::new(config))))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
