//! Renderer seam: one pipeline, interchangeable output adapters.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::error::ReportResult;

use super::ReportBundle;

/// Something that turns a [`ReportBundle`] into an output file.
pub trait ReportRenderer {
    /// Write the report to `path`, replacing any existing file.
    fn render(&self, bundle: &ReportBundle, path: &Path) -> ReportResult<()>;
}

/// Output type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Four-panel PNG image.
    Chart,
    /// Two-sheet XLSX workbook.
    Spreadsheet,
}

impl ReportKind {
    /// Output file name used when the caller does not pick one.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Chart => "graph.png",
            Self::Spreadsheet => "report.xlsx",
        }
    }

    /// Default renderer for this kind.
    ///
    /// Fails with [`crate::ReportError::RendererDisabled`] if the matching cargo feature is off.
    pub fn renderer(self) -> ReportResult<Box<dyn ReportRenderer>> {
        match self {
            #[cfg(feature = "chart")]
            Self::Chart => Ok(Box::new(super::chart::ChartRenderer::default())),
            #[cfg(not(feature = "chart"))]
            Self::Chart => Err(crate::error::ReportError::RendererDisabled { renderer: "chart" }),
            #[cfg(feature = "spreadsheet")]
            Self::Spreadsheet => Ok(Box::new(super::spreadsheet::SpreadsheetRenderer::default())),
            #[cfg(not(feature = "spreadsheet"))]
            Self::Spreadsheet => Err(crate::error::ReportError::RendererDisabled {
                renderer: "spreadsheet",
            }),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart => f.write_str("chart"),
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// Render `bundle` with the default renderer for `kind`.
pub fn render_report(bundle: &ReportBundle, kind: ReportKind, path: impl AsRef<Path>) -> ReportResult<()> {
    let path = path.as_ref();
    kind.renderer()?.render(bundle, path)?;
    info!(%kind, path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ReportKind;

    #[test]
    fn default_file_names() {
        assert_eq!(ReportKind::Chart.default_file_name(), "graph.png");
        assert_eq!(ReportKind::Spreadsheet.default_file_name(), "report.xlsx");
    }

    #[test]
    fn display_names_match_cli_values() {
        assert_eq!(ReportKind::Chart.to_string(), "chart");
        assert_eq!(ReportKind::Spreadsheet.to_string(), "spreadsheet");
    }
}
