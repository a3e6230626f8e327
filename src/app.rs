use eframe::egui::{self, ScrollArea, Ui};

use crate::chart::Slot;
use crate::state::AppState;
use crate::ui::{panels, plot};

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Build the app and perform the initial load.
    pub fn new(mut state: AppState) -> Self {
        state.reload();
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: stats ----
        egui::SidePanel::left("stats_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: charts, two per row ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for pair in Slot::ALL.chunks(2) {
                        ui.columns(pair.len(), |cols| {
                            for (col, slot) in cols.iter_mut().zip(pair) {
                                plot::chart_slot(
                                    col,
                                    *slot,
                                    self.state.charts.get(*slot),
                                    CHART_HEIGHT,
                                );
                            }
                        });
                        ui.add_space(12.0);
                    }
                });
        });
    }
}
