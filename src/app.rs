use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::state::{AppState, Section};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct EegViewerApp {
    pub state: AppState,
}

impl EegViewerApp {
    /// Start the viewer with `files` already loaded.
    pub fn with_files(files: Vec<PathBuf>) -> Self {
        let mut app = Self::default();
        app.state.start_ingest(files);
        app
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        self.state.start_ingest(dropped);
    }
}

impl eframe::App for EegViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Merge finished background parses; keep polling while any are out.
        self.state.poll_ingest();
        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // ---- Top panel: menu + navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: data sets ----
        egui::SidePanel::left("dataset_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active section ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.section {
            Section::OpenFiles => panels::open_files_section(ui, &mut self.state),
            Section::Graphs => plot::graphs_section(ui, &self.state),
            Section::RawData => table::raw_data_section(ui, &self.state),
        });
    }
}
