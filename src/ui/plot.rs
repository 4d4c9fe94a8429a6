use std::ops::RangeInclusive;

use eframe::egui::{FontId, TextStyle, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Plot};

use crate::state::ViewState;

/// Font size for tick labels, smaller than body text so long planet names fit.
const TICK_FONT_SIZE: f32 = 10.0;

const BAR_WIDTH: f64 = 0.6;

// ---------------------------------------------------------------------------
// Distance bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the distance bar chart in the central panel.
pub fn distance_plot(ui: &mut Ui, state: &ViewState) {
    if state.chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No planets fall inside the chart window");
        });
        return;
    }

    let labels: Vec<String> = state.chart.bars.iter().map(|b| b.label.clone()).collect();
    let n = labels.len() as f64;

    // Missing distances keep their category slot but draw no bar.
    let bars: Vec<Bar> = state
        .chart
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, b)| {
            let distance = b.distance?;
            Some(
                Bar::new(i as f64, distance)
                    .name(&b.label)
                    .fill(state.bar_color(i))
                    .width(BAR_WIDTH),
            )
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("Distance")
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{:.2} pc", bar.name, bar.value)
        }));

    ui.scope(|ui: &mut Ui| {
        // egui_plot draws every tick label in the Body style, so this also
        // shrinks the y ticks and hover text. There is no per-axis font.
        ui.style_mut()
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(TICK_FONT_SIZE));

        Plot::new("distance_plot")
            .x_axis_label("Exoplanet")
            .y_axis_label("Distance (parsecs)")
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                category_label(&labels, mark.value)
            })
            .include_x(-0.5)
            .include_x(n - 0.5)
            .include_y(0.0)
            .include_y(state.chart.max_distance().unwrap_or(1.0) * 1.05)
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    });
}

/// Label for an x tick: the planet name when the tick sits on a bar.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_on_bars_get_planet_names() {
        let labels = vec!["Kepler-442 b".to_string(), "K2-18 b".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Kepler-442 b");
        assert_eq!(category_label(&labels, 1.0), "K2-18 b");
    }

    #[test]
    fn ticks_between_or_outside_bars_are_blank() {
        let labels = vec!["a".to_string()];
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 3.0), "");
    }
}
