//! Report pipeline
//!
//! Locate → load → normalize → reshape → render → persist. Only a missing
//! result file or an empty one ends the run early; everything after
//! loading degrades per panel instead of failing.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::locator;
use crate::results::{Metric, ResultTable, PREVIEW_ROWS};
use crate::visualization::{OverviewChart, OverviewPlotter};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The chart was written
    Written {
        /// Result file the chart was built from
        source: PathBuf,
        /// Chart location
        output: PathBuf,
        /// The rendered figure
        chart: OverviewChart,
    },
    /// The result file had no data rows; nothing was written
    Empty {
        /// Result file that was read
        source: PathBuf,
    },
}

/// Run the pipeline described by `config`.
///
/// Returns [`ReportError::NoResultsFound`] (wrapped) when no file matches,
/// so callers can exit non-zero.
pub fn generate(config: &ReportConfig) -> Result<ReportOutcome> {
    config.validate().map_err(ReportError::from)?;

    let source = locator::find_latest(&config.root, &config.patterns)?;
    tracing::info!("Processing {}", source.display());

    let delimiter = config.delimiter_byte().map_err(ReportError::from)?;
    let table = match ResultTable::load(&source, delimiter) {
        Ok(table) => table,
        Err(ReportError::EmptyResultSet { path }) => {
            tracing::info!("CSV file is empty: {}", path);
            return Ok(ReportOutcome::Empty { source });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load results: {}", source.display()))
        }
    };

    if let Some(warning) = mean_warning(&table) {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("First {} rows after processing:\n{}", PREVIEW_ROWS, table.preview(PREVIEW_ROWS));

    let chart = OverviewChart::from_table(&table, Local::now());
    OverviewPlotter::plot(&chart, &config.output, (config.width, config.height))
        .with_context(|| format!("Failed to render chart: {}", config.output.display()))?;

    Ok(ReportOutcome::Written {
        source,
        output: config.output.clone(),
        chart,
    })
}

/// Why the time panel is likely to come out empty, if it is.
fn mean_warning(table: &ResultTable) -> Option<String> {
    if !table.schema.has_metric(Metric::Mean) {
        Some(format!(
            "'Mean' column not found in results; columns: {:?}",
            table.schema.headers
        ))
    } else if table.all_missing(Metric::Mean) {
        Some(
            "All 'Mean' values are NA. This usually means the benchmark failed or was terminated."
                .to_string(),
        )
    } else {
        None
    }
}
