use eframe::egui::{self, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::color::dataset_color;
use crate::data::stats::compute_stats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Voltage chart and statistics (Graphs section)
// ---------------------------------------------------------------------------

pub fn graphs_section(ui: &mut Ui, state: &AppState) {
    let (Some(idx), Some(ds)) = (state.current, state.current_dataset()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a data set to view its chart");
        });
        return;
    };

    ui.heading(&ds.name);

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.strong("Statistics");
        ui.separator();
        match compute_stats(ds) {
            Ok(stats) => {
                ui.label(format!("Average voltage = {} mV", stats.mean));
                ui.label(format!(
                    "Standard deviation of the voltage = {} mV",
                    stats.std_dev
                ));
            }
            Err(e) => {
                ui.label(e.to_string());
            }
        }
    });

    ui.add_space(8.0);

    let points: PlotPoints = ds
        .time
        .iter()
        .zip(&ds.voltage)
        .map(|(&t, &v)| [t, v])
        .collect();

    Plot::new(("voltage_plot", idx))
        .x_axis_label("Time (s)")
        .y_axis_label("Voltage (mV)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(&ds.name)
                    .color(dataset_color(idx))
                    .width(1.0),
            );
        });
}
