//! Visualization and plotting

pub mod overview;

pub use overview::{OverviewChart, OverviewPlotter, Panel, PanelContent};

/// Whether plotters can resolve a font to lay out text.
#[cfg(test)]
pub(crate) fn fonts_available() -> bool {
    use plotters::style::IntoFont;
    ("sans-serif", 12).into_font().box_size("x").is_ok()
}
