mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::LaunchdeckApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line; otherwise start empty and
    // let the user open a file.
    let dataset_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launchdeck – Launch Records Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = LaunchdeckApp::default();
            if let Some(path) = dataset_path {
                let loaded = data::loader::load_file(&path)
                    .with_context(|| format!("loading {}", path.display()));
                match loaded {
                    Ok(dataset) => {
                        log::info!(
                            "Loaded {} launch records from {}",
                            dataset.len(),
                            path.display()
                        );
                        app.state.set_dataset(dataset);
                    }
                    Err(e) => {
                        log::error!("Failed to load dataset: {e:#}");
                        app.state.status_message = Some(format!("Error: {e:#}"));
                    }
                }
            }
            Ok(Box::new(app))
        }),
    )
}
