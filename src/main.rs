mod analytics;
mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use eframe::egui;

use app::CampaignLensApp;
use data::model::CanonicalTable;
use state::AppState;

/// The fixed dataset, read once from the working directory.
const DATASET_PATH: &str = "ifood_df.csv";

fn main() -> eframe::Result {
    env_logger::init();

    // Loading and cleaning failures are fatal: no partial dashboard.
    let table = match load_dataset() {
        Ok(table) => table,
        Err(e) => {
            log::error!("startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Campaign Lens – Marketing Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(CampaignLensApp::new(AppState::new(table))))),
    )
}

fn load_dataset() -> anyhow::Result<CanonicalTable> {
    let raw = data::loader::load_file(Path::new(DATASET_PATH))
        .with_context(|| format!("loading {DATASET_PATH}"))?;
    let table = data::clean::clean(raw).context("cleaning dataset")?;
    log::info!(
        "Loaded {} customers, {} numeric columns",
        table.len(),
        table.numeric_columns().count()
    );
    Ok(table)
}
