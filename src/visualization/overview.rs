//! Two-panel overview chart: mean time and allocated memory per sample

use crate::error::ReportError;
use crate::pivot::PivotTable;
use crate::results::{Metric, ResultTable, BYTES_PER_MIB};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const TITLE_FONT_SIZE: u32 = 30;
const CAPTION_FONT_SIZE: u32 = 24;
const MESSAGE_FONT_SIZE: u32 = 20;

/// Share of each sample slot taken by its group of bars
const GROUP_WIDTH: f64 = 0.8;

/// What a panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Grouped bars, one group per sample
    Bars(PivotTable),
    /// Centered message in place of a chart
    Placeholder(String),
}

/// One chart panel
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub y_desc: &'static str,
    pub content: PanelContent,
}

impl Panel {
    /// Reshape `table` for `metric`, degrading to a placeholder on failure.
    ///
    /// Memory is shown in mebibytes.
    pub fn from_table(table: &ResultTable, metric: Metric) -> Self {
        let (title, y_desc) = match metric {
            Metric::Mean => (
                "Performance Comparison: Mean Execution Time",
                "Execution Time (ms)",
            ),
            Metric::Allocated => (
                "Memory Comparison: Allocated Memory",
                "Allocated Memory (MB)",
            ),
        };

        let column = metric.column();
        let content = match PivotTable::build(table, metric) {
            Ok(pivot) if pivot.is_empty() => {
                tracing::warn!("No valid {} values to plot", column);
                PanelContent::Placeholder(format!("All {} values are NA/missing", column))
            }
            Ok(pivot) => {
                let pivot = match metric {
                    Metric::Mean => pivot,
                    Metric::Allocated => pivot.scaled_down(BYTES_PER_MIB),
                };
                if y_ceiling(&pivot).is_some() {
                    PanelContent::Bars(pivot)
                } else {
                    tracing::warn!("{} values are too large to chart", column);
                    PanelContent::Placeholder(format!(
                        "Error plotting {}: values too large to chart",
                        column
                    ))
                }
            }
            Err(ReportError::MissingColumn(missing)) => {
                tracing::warn!("{} column not found, skipping {} panel", missing, column);
                PanelContent::Placeholder(format!("{} column not found in results", missing))
            }
            Err(e) => {
                tracing::warn!("Error plotting {}: {}", column, e);
                PanelContent::Placeholder(format!("Error plotting {}: {}", column, e))
            }
        };

        Self {
            title,
            y_desc,
            content,
        }
    }

    /// Whether the panel has bars to draw
    pub fn has_data(&self) -> bool {
        matches!(self.content, PanelContent::Bars(_))
    }
}

/// The complete figure
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewChart {
    pub title: String,
    pub time: Panel,
    pub memory: Panel,
}

impl OverviewChart {
    /// Build both panels from a loaded table
    pub fn from_table(table: &ResultTable, generated_at: DateTime<Local>) -> Self {
        Self {
            title: format!(
                "Benchmark Results - Generated at {}",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            time: Panel::from_table(table, Metric::Mean),
            memory: Panel::from_table(table, Metric::Allocated),
        }
    }
}

/// Top of the y axis with some headroom, `None` when it would not be finite
fn y_ceiling(pivot: &PivotTable) -> Option<f64> {
    let max = pivot.max_value().filter(|v| *v > 0.0).unwrap_or(1.0);
    Some(max * 1.1).filter(|v| v.is_finite())
}

pub struct OverviewPlotter;

impl OverviewPlotter {
    /// Render `chart` to `path`, replacing any existing file.
    ///
    /// `.svg` paths use the SVG backend, anything else is a PNG bitmap.
    pub fn plot(chart: &OverviewChart, path: &Path, size: (u32, u32)) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            Self::draw(SVGBackend::new(path, size).into_drawing_area(), chart)
        } else {
            Self::draw(BitMapBackend::new(path, size).into_drawing_area(), chart)
        }
    }

    fn draw<DB>(root: DrawingArea<DB, Shift>, chart: &OverviewChart) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let body = root.titled(&chart.title, ("sans-serif", TITLE_FONT_SIZE))?;

        let areas = body.split_evenly((2, 1));
        for (area, panel) in areas.iter().zip([&chart.time, &chart.memory]) {
            match &panel.content {
                PanelContent::Bars(pivot) => Self::draw_bars(area, panel, pivot)?,
                PanelContent::Placeholder(message) => {
                    Self::draw_placeholder(area, panel, message)?
                }
            }
        }

        root.present()?;
        Ok(())
    }

    /// Grouped bar chart, one bar per method within each sample slot
    fn draw_bars<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel, pivot: &PivotTable) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let num_samples = pivot.samples.len();
        let num_methods = pivot.methods.len().max(1);
        let Some(y_max) = y_ceiling(pivot) else {
            anyhow::bail!("{}: values too large to chart", panel.title);
        };

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5..(num_samples as f64 - 0.5), 0f64..y_max)?;

        let samples = &pivot.samples;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.15))
            .x_labels(num_samples)
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 0.3 {
                    samples.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|y| format!("{:.2}", y))
            .x_desc("Sample File")
            .y_desc(panel.y_desc)
            .draw()?;

        let bar_width = GROUP_WIDTH / num_methods as f64;
        for (col, method) in pivot.methods.iter().enumerate() {
            let color = Palette99::pick(col).mix(0.9);
            let bars = pivot.cells.iter().enumerate().filter_map(|(row, values)| {
                let value = values[col]?;
                let x0 = row as f64 - GROUP_WIDTH / 2.0 + col as f64 * bar_width;
                Some(Rectangle::new(
                    [(x0, 0.0), (x0 + bar_width, value)],
                    color.filled(),
                ))
            });

            chart
                .draw_series(bars)?
                .label(method.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    fn draw_placeholder<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel, message: &str) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let inner = area.titled(panel.title, ("sans-serif", CAPTION_FONT_SIZE))?;
        let (width, height) = inner.dim_in_pixel();
        let style = TextStyle::from(("sans-serif", MESSAGE_FONT_SIZE).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));

        inner.draw(&Text::new(
            message,
            ((width / 2) as i32, (height / 2) as i32),
            style,
        ))?;
        Ok(())
    }
}
