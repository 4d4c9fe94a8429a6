use anyhow::{Context, Result};

use crate::chart::DistanceChart;
use crate::config::PipelineConfig;
use crate::data::filter::filter_by_names;
use crate::data::loader::{load_catalog, load_target_names};
use crate::data::model::{FilteredTable, NumericColumn};
use crate::data::summary::{summarize, SummaryTable};

/// Everything a run produces before presentation.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Rows in the full catalog.
    pub catalog_rows: usize,
    /// Number of target names read, duplicates included.
    pub target_count: usize,
    pub filtered: FilteredTable,
    pub summary: SummaryTable,
    pub chart: DistanceChart,
}

/// Load, filter, summarise and cut the chart window. Any failure aborts.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;

    let catalog = load_catalog(&config.catalog_path).context("loading exoplanet catalog")?;
    let targets =
        load_target_names(&config.targets_path).context("loading target planet names")?;

    let filtered = filter_by_names(&catalog, &targets);
    let summary = summarize(&filtered, &NumericColumn::ALL);
    let chart = DistanceChart::from_table(&filtered, config.chart_window);

    Ok(PipelineOutput {
        catalog_rows: catalog.len(),
        target_count: targets.len(),
        filtered,
        summary,
        chart,
    })
}
