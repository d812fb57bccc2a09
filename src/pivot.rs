//! Sample × method reshaping
//!
//! Turns the row-oriented result table into a matrix with one row per
//! `FileName` and one column per `Method`, the shape a grouped bar chart
//! needs.

use crate::error::{ReportError, Result};
use crate::results::{Metric, ResultTable};
use std::collections::{BTreeMap, BTreeSet};

/// Metric values indexed by sample (rows) and method (columns)
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    /// Sample names, sorted
    pub samples: Vec<String>,
    /// Method names, sorted
    pub methods: Vec<String>,
    /// `cells[sample][method]`; `None` where no measurement exists
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    /// Reshape `table` on `metric`.
    ///
    /// Rows without a value for `metric` are left out, so samples or
    /// methods that only ever had missing values do not appear. Fails
    /// with [`ReportError::DuplicateKey`] when two rows share a
    /// `(FileName, Method)` pair, and with [`ReportError::MissingColumn`]
    /// when the table cannot be keyed or lacks the metric.
    pub fn build(table: &ResultTable, metric: Metric) -> Result<Self> {
        table.schema.require(metric)?;

        let mut values: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for row in &table.rows {
            let Some(value) = metric.value(row) else {
                continue;
            };
            let key = (row.file_name.as_str(), row.method.as_str());
            if values.insert(key, value).is_some() {
                return Err(ReportError::DuplicateKey {
                    file_name: row.file_name.clone(),
                    method: row.method.clone(),
                });
            }
        }

        let samples: Vec<String> = values
            .keys()
            .map(|(sample, _)| *sample)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let methods: Vec<String> = values
            .keys()
            .map(|(_, method)| *method)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let cells = samples
            .iter()
            .map(|sample| {
                methods
                    .iter()
                    .map(|method| values.get(&(sample.as_str(), method.as_str())).copied())
                    .collect()
            })
            .collect();

        Ok(Self {
            samples,
            methods,
            cells,
        })
    }

    /// Whether the table has no cells
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value for a sample/method pair
    pub fn get(&self, sample: &str, method: &str) -> Option<f64> {
        let row = self.samples.iter().position(|s| s == sample)?;
        let col = self.methods.iter().position(|m| m == method)?;
        self.cells[row][col]
    }

    /// Copy with every value divided by `divisor`
    pub fn scaled_down(&self, divisor: f64) -> Self {
        Self {
            samples: self.samples.clone(),
            methods: self.methods.clone(),
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(|v| v.map(|v| v / divisor)).collect())
                .collect(),
        }
    }

    /// Largest value present, if any
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    }
}
