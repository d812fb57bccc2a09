//! Bench Overview - charts for BenchmarkDotNet CSV reports
//!
//! Finds the newest `*-report.csv` produced by a BenchmarkDotNet run and
//! renders a two-panel grouped bar chart comparing methods per input
//! sample: mean execution time on top, allocated memory below.
//!
//! # Architecture
//!
//! - **Locator**: newest file matching a list of glob patterns
//! - **Results**: schema check and typed rows with unit-aware cells
//! - **Pivot**: sample × method matrices per metric
//! - **Visualization**: chart model and plotters rendering
//! - **Report**: the pipeline tying the stages together
//!
//! # Example
//!
//! ```rust,no_run
//! use bench_overview::{generate, ReportConfig, ReportOutcome};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ReportConfig::new(".").with_output("assets/overview.png");
//!
//!     if let ReportOutcome::Written { output, .. } = generate(&config)? {
//!         println!("wrote {}", output.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod pivot;
pub mod report;
pub mod results;
pub mod visualization;

// Re-export commonly used types
pub use config::{ConfigError, ReportConfig};
pub use error::{ReportError, Result};
pub use pivot::PivotTable;
pub use report::{generate, ReportOutcome};
pub use results::{Measurement, Metric, ResultRow, ResultTable};
pub use visualization::{OverviewChart, OverviewPlotter};
