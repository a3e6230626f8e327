use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::DisplayRange;
use crate::state::AppState;
use crate::ui::format::{PLACEHOLDER, format_count, format_percent};

// ---------------------------------------------------------------------------
// Left side panel – stats table
// ---------------------------------------------------------------------------

/// Render the stats panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Summary");
    ui.separator();

    let Some(summary) = &state.summary else {
        ui.label("No dataset loaded.");
        return;
    };

    let rows = [
        ("Yearly rows", format_count(summary.monthly_rows)),
        ("Daily rows", format_count(summary.moving_avg_rows)),
        ("Return rows", format_count(summary.returns_rows)),
        (
            "Latest date",
            summary
                .latest_date
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
        ("Avg daily return", format_percent(summary.mean_return, 3)),
        ("Volatility (std dev)", format_percent(summary.volatility, 3)),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Metric");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (metric, value) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(*metric);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("Close vs SMA:");
        let mut range = state.range;
        egui::ComboBox::from_id_salt("range_select")
            .selected_text(range.label())
            .show_ui(ui, |ui: &mut Ui| {
                for choice in DisplayRange::CHOICES {
                    ui.selectable_value(&mut range, choice, choice.label());
                }
            });
        if range != state.range {
            state.set_range(range);
        }

        ui.separator();

        if let Some(data) = &state.data {
            ui.label(format!(
                "{} — {} daily rows loaded",
                state.config.data_dir.display(),
                data.moving_avg.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dashboard data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.open_dir(dir);
    }
}
