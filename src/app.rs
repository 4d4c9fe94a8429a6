use eframe::egui;

use crate::pipeline::PipelineOutput;
use crate::state::ViewState;
use crate::ui::{panels, plot};

/// Window size in logical pixels.
const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExoplanetChartApp {
    pub state: ViewState,
}

impl ExoplanetChartApp {
    pub fn new(output: PipelineOutput) -> Self {
        Self {
            state: ViewState::new(output),
        }
    }
}

impl eframe::App for ExoplanetChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: counts and toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: summary statistics ----
        if self.state.show_summary {
            egui::SidePanel::right("summary_panel")
                .default_width(360.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::summary_panel(ui, &self.state);
                });
        }

        // ---- Central panel: bar chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::distance_plot(ui, &self.state);
        });
    }
}

/// Open the chart window and block until the user closes it.
pub fn show(output: PipelineOutput) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Exoplanet Distances",
        options,
        Box::new(|_cc| Ok(Box::new(ExoplanetChartApp::new(output)))),
    )
}
