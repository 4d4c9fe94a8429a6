use eframe::egui::Color32;

use crate::chart::DistanceChart;
use crate::color::generate_palette;
use crate::data::summary::SummaryTable;
use crate::pipeline::PipelineOutput;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct ViewState {
    /// Bars to draw.
    pub chart: DistanceChart,

    /// One fill colour per bar.
    pub bar_colors: Vec<Color32>,

    /// Statistics shown in the side panel.
    pub summary: SummaryTable,

    /// Rows in the full catalog.
    pub catalog_rows: usize,

    /// Target names requested, duplicates included.
    pub target_count: usize,

    /// Rows that matched a target name.
    pub matched_rows: usize,

    /// Whether the summary side panel is open.
    pub show_summary: bool,
}

impl ViewState {
    pub fn new(output: PipelineOutput) -> Self {
        Self {
            bar_colors: generate_palette(output.chart.len()),
            catalog_rows: output.catalog_rows,
            target_count: output.target_count,
            matched_rows: output.filtered.len(),
            chart: output.chart,
            summary: output.summary,
            show_summary: false,
        }
    }

    /// Fill colour for bar `i`.
    pub fn bar_color(&self, i: usize) -> Color32 {
        self.bar_colors.get(i).copied().unwrap_or(Color32::LIGHT_BLUE)
    }

    pub fn toggle_summary(&mut self) {
        self.show_summary = !self.show_summary;
    }
}
