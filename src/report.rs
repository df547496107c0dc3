//! Report rendering: CSV for spreadsheets, AsciiDoc for publishing.

mod asciidoc;
mod csv;

use std::path::PathBuf;

pub use asciidoc::render_asciidoc;
pub use csv::render_csv;

use crate::model::PullRequest;

/// Output format of the exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    AsciiDoc,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::AsciiDoc => "adoc",
        }
    }

    /// Human-readable format name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::AsciiDoc => "AsciiDoc",
        }
    }

    /// Where the report goes when no output path is given.
    pub fn default_output(self) -> PathBuf {
        PathBuf::from(format!("/tmp/maven_open_prs.{}", self.extension()))
    }
}

/// Render pull requests in the given format.
///
/// `author` is the active author filter, used for the AsciiDoc title.
/// `generated_at` is the human-readable time the report was produced.
pub fn render(
    format: ReportFormat,
    prs: &[PullRequest],
    author: Option<&str>,
    generated_at: &str,
) -> String {
    match format {
        ReportFormat::Csv => render_csv(prs),
        ReportFormat::AsciiDoc => render_asciidoc(prs, author, generated_at),
    }
}
