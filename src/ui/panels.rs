use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::dataset_color;
use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.registry.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export session…"))
                .clicked()
            {
                export_session_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for section in Section::ALL {
            if ui
                .selectable_label(state.section == section, section.label())
                .clicked()
            {
                state.set_section(section);
            }
        }

        ui.separator();
        ui.label(state.status_line());

        if state.is_loading() {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dataset menu
// ---------------------------------------------------------------------------

/// Render the list of loaded datasets.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data sets");
    ui.separator();

    if state.registry.is_empty() {
        ui.label("no data sets found");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, ds) in state.registry.iter().enumerate() {
                let text = RichText::new(&ds.name).color(dataset_color(idx));
                if ui.selectable_label(state.current == Some(idx), text).clicked() {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        state.select_dataset(idx);
    }
}

// ---------------------------------------------------------------------------
// Open Files section – drop hint and per-file reports
// ---------------------------------------------------------------------------

pub fn open_files_section(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.heading("Drop EEG text files here");
        ui.label("or");
        if ui.button("Browse…").clicked() {
            open_file_dialog(state);
        }
        ui.add_space(16.0);
    });

    if state.reports.is_empty() {
        return;
    }

    let mut dismissed = None;
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        for (i, report) in state.reports.iter().enumerate() {
            let fill = if report.is_ok() {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::from_rgb(220, 53, 69)
            };
            egui::Frame::group(ui.style()).fill(fill).show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(report.message()).color(Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("x").clicked() {
                            dismissed = Some(i);
                        }
                    });
                });
            });
        }
    });

    if let Some(i) = dismissed {
        state.dismiss_report(i);
    }
    if ui.button("OK").clicked() {
        state.clear_reports();
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open EEG data")
        .add_filter("EEG data", &["txt"])
        .pick_files();

    if let Some(paths) = files {
        state.start_ingest(paths);
    }
}

fn export_session_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export session")
        .add_filter("JSON", &["json"])
        .set_file_name("session.json")
        .save_file();

    if let Some(path) = file {
        match state.export_session(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export session: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
