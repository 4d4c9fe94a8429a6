use std::path::Path;

use anyhow::{anyhow, Context, Result};

use exoplanet_survey::config::{PipelineConfig, CONFIG_FILE};
use exoplanet_survey::{app, pipeline, report};

fn main() -> Result<()> {
    env_logger::init();

    let config = PipelineConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let output = pipeline::run(&config)?;

    let table = report::format_summary(&output.summary).context("formatting summary table")?;
    println!("{table}");

    app::show(output).map_err(|e| anyhow!("chart window failed: {e}"))
}
