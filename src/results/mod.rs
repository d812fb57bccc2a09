//! Benchmark result loading
//!
//! A result file is a delimited table with a header row. The header is
//! checked once against the known columns, producing a [`Schema`]; every
//! data row then becomes a typed [`ResultRow`].

pub mod units;

pub use units::{Measurement, MemoryUnit, TimeUnit, BYTES_PER_MIB};

use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Implementation under test
pub const METHOD: &str = "Method";
/// Input sample
pub const FILE_NAME: &str = "FileName";
/// Mean execution time
pub const MEAN: &str = "Mean";
/// Allocated memory
pub const ALLOCATED: &str = "Allocated";

/// Number of rows shown in log previews
pub const PREVIEW_ROWS: usize = 5;

/// Column positions resolved from the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Every header, in file order
    pub headers: Vec<String>,
    method: Option<usize>,
    file_name: Option<usize>,
    mean: Option<usize>,
    allocated: Option<usize>,
}

impl Schema {
    /// Resolve known columns from a header row.
    ///
    /// `Mean` falls back to the first header containing `Mean`, since some
    /// exporters decorate it with a unit (`Mean [ms]`).
    pub fn from_headers(headers: &StringRecord) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let position = |name: &str| headers.iter().position(|h| h == name);

        let mean = position(MEAN).or_else(|| {
            let found = headers.iter().position(|h| h.contains(MEAN));
            if let Some(idx) = found {
                tracing::warn!(
                    "'{}' column not found, using '{}' instead",
                    MEAN,
                    headers[idx]
                );
            }
            found
        });

        Self {
            method: position(METHOD),
            file_name: position(FILE_NAME),
            mean,
            allocated: position(ALLOCATED),
            headers,
        }
    }

    /// Whether the column for `metric` is present
    pub fn has_metric(&self, metric: Metric) -> bool {
        match metric {
            Metric::Mean => self.mean.is_some(),
            Metric::Allocated => self.allocated.is_some(),
        }
    }

    /// Check the columns needed to chart `metric`.
    pub fn require(&self, metric: Metric) -> Result<()> {
        for (name, idx) in [(METHOD, self.method), (FILE_NAME, self.file_name)] {
            if idx.is_none() {
                return Err(ReportError::MissingColumn(name.to_string()));
            }
        }
        if !self.has_metric(metric) {
            return Err(ReportError::MissingColumn(metric.column().to_string()));
        }
        Ok(())
    }

    fn row(&self, record: &StringRecord) -> ResultRow {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        let measurement = |idx: Option<usize>| match idx.and_then(|i| record.get(i)) {
            Some(raw) => Measurement::parse(raw),
            None => Measurement::Missing,
        };

        ResultRow {
            method: text(self.method),
            file_name: text(self.file_name),
            mean: measurement(self.mean),
            allocated: measurement(self.allocated),
        }
    }
}

/// One measured observation
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Implementation under test
    pub method: String,
    /// Input sample
    pub file_name: String,
    /// Mean execution time
    pub mean: Measurement,
    /// Allocated memory
    pub allocated: Measurement,
}

/// The two charted measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Execution time, normalized to milliseconds
    Mean,
    /// Allocated memory, normalized to bytes
    Allocated,
}

impl Metric {
    /// Column the metric is read from
    pub fn column(self) -> &'static str {
        match self {
            Metric::Mean => MEAN,
            Metric::Allocated => ALLOCATED,
        }
    }

    /// Raw cell for this metric
    pub fn measurement(self, row: &ResultRow) -> &Measurement {
        match self {
            Metric::Mean => &row.mean,
            Metric::Allocated => &row.allocated,
        }
    }

    /// Normalized value, `None` when the cell has no value
    pub fn value(self, row: &ResultRow) -> Option<f64> {
        match self {
            Metric::Mean => row.mean.as_millis(),
            Metric::Allocated => row.allocated.as_bytes(),
        }
    }
}

/// A loaded result file
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    /// Resolved header
    pub schema: Schema,
    /// Data rows in file order
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Load a result file from disk.
    ///
    /// A file without data rows is reported as
    /// [`ReportError::EmptyResultSet`].
    pub fn load(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file, delimiter)?;

        if table.is_empty() {
            return Err(ReportError::EmptyResultSet {
                path: path.display().to_string(),
            });
        }

        Ok(table)
    }

    /// Parse a delimited table with a header row
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let schema = Schema::from_headers(rdr.headers()?);
        tracing::debug!("Columns: {:?}", schema.headers);

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            if idx < PREVIEW_ROWS {
                tracing::debug!("raw row {}: {:?}", idx + 1, record);
            }

            let row = schema.row(&record);
            for metric in [Metric::Mean, Metric::Allocated] {
                match metric.measurement(&row) {
                    Measurement::Unparsable(raw) => {
                        let err = ReportError::UnparsableValue {
                            column: metric.column().to_string(),
                            value: raw.clone(),
                        };
                        tracing::warn!("row {}: {}, treating as missing", idx + 1, err);
                    }
                    Measurement::Missing => {}
                    cell if metric.value(&row).is_none() => {
                        let err = ReportError::UnparsableValue {
                            column: metric.column().to_string(),
                            value: cell.to_string(),
                        };
                        tracing::warn!("row {}: {} is out of range, treating as missing", idx + 1, err);
                    }
                    _ => {}
                }
            }
            rows.push(row);
        }

        Ok(Self { schema, rows })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether no row carries a value for `metric`
    pub fn all_missing(&self, metric: Metric) -> bool {
        self.rows.iter().all(|row| metric.value(row).is_none())
    }

    /// Render the first `n` rows with normalized values
    pub fn preview(&self, n: usize) -> String {
        let mut out = format!(
            "{:<24} {:<24} {:>14} {:>16}",
            METHOD, FILE_NAME, "Mean (ms)", "Allocated (B)"
        );
        let fmt_value = |v: Option<f64>| v.map(|v| format!("{:.4}", v)).unwrap_or("NA".into());

        for row in self.rows.iter().take(n) {
            let _ = write!(
                out,
                "\n{:<24} {:<24} {:>14} {:>16}",
                row.method,
                row.file_name,
                fmt_value(Metric::Mean.value(row)),
                fmt_value(Metric::Allocated.value(row)),
            );
        }
        out
    }
}
