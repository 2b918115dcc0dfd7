mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::EegViewerApp;
use clap::Parser;
use eframe::egui;

#[derive(Parser)]
#[command(name = "eeg-viewer", about = "View plain-text EEG recordings")]
struct Args {
    /// EEG text files to load at startup
    files: Vec<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 960.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "EEG Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(EegViewerApp::with_files(args.files)))),
    )
}
