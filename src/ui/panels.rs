use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary::Statistic;
use crate::report::format_value;
use crate::state::ViewState;

// ---------------------------------------------------------------------------
// Right side panel – summary statistics
// ---------------------------------------------------------------------------

/// Render the summary statistics table: one row per statistic, one column
/// per numeric catalog field.
pub fn summary_panel(ui: &mut Ui, state: &ViewState) {
    ui.heading("Summary");
    ui.separator();

    let columns = state.summary.columns();
    if columns.is_empty() {
        ui.label("No statistics computed.");
        return;
    }

    ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto())
                .columns(Column::auto().at_least(72.0), columns.len())
                .header(20.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("statistic");
                    });
                    for (col, _) in columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col.name());
                        });
                    }
                })
                .body(|mut body| {
                    for stat in Statistic::ALL {
                        body.row(18.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(stat.name());
                            });
                            for (_, summary) in columns {
                                row.col(|ui: &mut Ui| {
                                    ui.monospace(format_value(summary.get(stat)));
                                });
                            }
                        });
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} targets, {} of {} catalog planets matched, {} charted",
            state.target_count,
            state.matched_rows,
            state.catalog_rows,
            state.chart.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_summary, "Summary statistics")
            .clicked()
        {
            state.toggle_summary();
        }

        let missing = state.chart.bars.iter().filter(|b| b.distance.is_none()).count();
        if missing > 0 {
            ui.label(RichText::new(format!("{missing} without distance")).weak());
        }
    });
}
