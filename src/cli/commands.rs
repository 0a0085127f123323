//! CLI command implementations

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::Config;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::report::write_report;

/// Run the filter pipeline once and write the CSV report
pub async fn run(config: &Config, output: Option<&str>) -> Result<()> {
    info!("Starting migrated-coin filter...");
    info!(
        "Filters: pair age <= {}h, 1h txns >= {}, 5m txns >= {}",
        config.filters.pair_age_hours, config.filters.min_1h_txns, config.filters.min_5m_txns
    );

    let pipeline = Pipeline::from_config(config).context("Failed to initialize pipeline")?;
    let report = pipeline.run().await.context("Pipeline run aborted")?;

    log_exclusions(&report);

    let path = output.unwrap_or(config.output.path.as_str());
    write_report(path, &report.survivors)
        .await
        .context("Failed to write report")?;

    Ok(())
}

/// Show current configuration (query strings masked)
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}

fn log_exclusions(report: &PipelineReport) {
    let mut by_stage: BTreeMap<String, usize> = BTreeMap::new();
    for exclusion in &report.exclusions {
        *by_stage.entry(exclusion.stage.to_string()).or_default() += 1;
    }

    for (stage, count) in by_stage {
        info!("Excluded at {} stage: {}", stage, count);
    }

    info!(
        "Blacklist now holds {} memecoins and {} developers",
        report.blacklist.memecoin_count(),
        report.blacklist.developer_count()
    );
}
