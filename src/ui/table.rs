use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw data table (Raw Data section)
// ---------------------------------------------------------------------------

pub fn raw_data_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = state.current_dataset() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a data set to view its samples");
        });
        return;
    };

    ui.heading(&ds.name);

    let row_h = egui::TextStyle::Body.resolve(ui.style()).size * 1.4;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(60.0))
        .column(Column::initial(140.0))
        .column(Column::remainder())
        .header(row_h, |mut header| {
            for title in ["#", "Time (s)", "Voltage (mV)"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            // Virtualised: only visible rows are laid out.
            body.rows(row_h, ds.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label((i + 1).to_string());
                });
                row.col(|ui| {
                    ui.label(ds.time[i].to_string());
                });
                row.col(|ui| {
                    ui.label(ds.voltage[i].to_string());
                });
            });
        });
}
