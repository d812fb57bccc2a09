//! CLI argument parsing and command handling

use crate::config::ReportConfig;
use crate::report::{self, ReportOutcome};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Render an overview chart from the latest BenchmarkDotNet CSV report
#[derive(Parser, Debug)]
#[command(name = "bench-overview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, env = "BENCH_OVERVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the search patterns are resolved against
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Result file glob, in preference order (repeatable)
    #[arg(short, long = "pattern")]
    pub patterns: Vec<String>,

    /// Chart output path (.png or .svg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSV field delimiter
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides
    pub fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)
                .with_context(|| format!("Failed to load config from: {}", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if !self.patterns.is_empty() {
            config = config.with_patterns(self.patterns.iter().cloned());
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }

        Ok(config)
    }

    /// Generate the chart based on CLI arguments
    pub fn run(&self) -> Result<()> {
        let config = self.report_config()?;
        tracing::debug!("Configuration: {:?}", config);

        match report::generate(&config)? {
            ReportOutcome::Written { output, chart, .. } => {
                for panel in [&chart.time, &chart.memory] {
                    if !panel.has_data() {
                        tracing::info!("{}: placeholder only", panel.title);
                    }
                }
                println!("✓ Chart saved to {}", output.display());
            }
            ReportOutcome::Empty { source } => {
                println!("No data rows in {}, chart not generated", source.display());
            }
        }

        Ok(())
    }
}
