mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::LaunchDeckApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded automatically when no path is given on the command line.
const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    if let Some(path) = startup_dataset() {
        match data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records from {}",
                    dataset.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                // A broken dataset at startup is fatal; runtime loads via
                // File → Open only surface a status message.
                log::error!("Failed to load {}: {e:#}", path.display());
                std::process::exit(1);
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Deck – Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDeckApp::new(state)))),
    )
}

/// The dataset to load before the UI starts: an explicit CLI path, or the
/// default file when it exists in the working directory.
fn startup_dataset() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let default = Path::new(DEFAULT_DATASET);
    default.exists().then(|| default.to_path_buf())
}
