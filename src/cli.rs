//! Command-line interface for maven-prs.
//!
//! One command, no subcommands: list every open pull request across the
//! Apache Maven repositories and write them to a CSV or AsciiDoc report.
//! Progress and summaries go to stderr; the report goes to a file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::debug;

use crate::config::Config;
use crate::export::{self, ExportError, ExportRequest};
use crate::gh::Gh;
use crate::model::PullRequest;
use crate::report::ReportFormat;
use crate::{repos, summary};

/// Login `gh` reports for Dependabot pull requests.
pub const DEPENDABOT: &str = "app/dependabot";

/// Number of repositories listed in the per-repository summary.
const TOP_REPOSITORIES: usize = 10;

/// Export all open pull requests from Apache Maven repositories.
#[derive(Debug, Parser)]
#[command(name = "maven-prs", after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    format: FormatArg,

    /// Output file path (default: /tmp/maven_open_prs.{csv|adoc}).
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Only include PRs by this author login (e.g. "app/dependabot").
    #[arg(long)]
    author: Option<String>,

    /// Only include Dependabot PRs (shortcut for --author app/dependabot).
    /// Takes precedence over --author.
    #[arg(long)]
    dependabot: bool,

    /// jQAssistant YAML file to prune archived repositories from.
    /// Falls back to $MAVEN_PRS_YAML, then `yaml-path` in ~/.maven-prs/config.toml.
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// Do not check for archived repositories; query the full list as-is.
    #[arg(long)]
    skip_archived_check: bool,
}

const EXAMPLES_HELP: &str = r"Examples:
  maven-prs                                   CSV of every open PR
  maven-prs --format asciidoc -o prs.adoc     AsciiDoc table grouped by repository
  maven-prs --dependabot --format asciidoc    Dependabot PRs only

Requires an authenticated GitHub CLI (`gh auth login`).";

/// CLI-facing report format, mapped to the domain `ReportFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated values, one row per PR.
    Csv,
    /// AsciiDoc table grouped by repository.
    #[value(name = "asciidoc")]
    AsciiDoc,
}

impl FormatArg {
    fn to_domain(self) -> ReportFormat {
        match self {
            Self::Csv => ReportFormat::Csv,
            Self::AsciiDoc => ReportFormat::AsciiDoc,
        }
    }
}

impl Cli {
    /// The effective author filter, with `--dependabot` expanded.
    fn author(&self) -> Option<String> {
        if self.dependabot {
            Some(DEPENDABOT.to_string())
        } else {
            self.author.clone()
        }
    }

    pub(crate) fn request(&self, config: &Config) -> ExportRequest {
        let format = self.format.to_domain();
        ExportRequest {
            format,
            output: self
                .output
                .clone()
                .unwrap_or_else(|| format.default_output()),
            author: self.author(),
            yaml_path: config.yaml_path(self.yaml.as_deref()),
            check_archived: !self.skip_archived_check,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<(), ExportError> {
    let cli = Cli::parse();
    let config = Config::load().map_err(ExportError::Config)?;
    let request = cli.request(&config);

    let gh = Gh::new(config.gh_program());
    debug!("using {}", gh.program().display());

    eprintln!("Fetching open PRs from Apache Maven repositories...\n");
    let prs = export::export(&gh, repos::maven_repositories(), &request)?;

    print_summary(&prs, &request);
    Ok(())
}

fn print_summary(prs: &[PullRequest], request: &ExportRequest) {
    let rule = "=".repeat(60);
    eprintln!("\n{rule}");
    eprintln!("Total Maven PRs found: {}", prs.len());
    eprintln!("{rule}\n");

    eprintln!(
        "Exported {} to: {}\n",
        request.format.label(),
        request.output.display()
    );

    eprintln!("PRs by build status:");
    for (status, count) in summary::status_counts(prs) {
        eprintln!("  {status}: {count}");
    }

    eprintln!("\nPRs by repository:");
    for (repo, count) in summary::top_repositories(prs, TOP_REPOSITORIES) {
        eprintln!("  {repo}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("maven-prs").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_csv_in_tmp() {
        let request = parse(&[]).request(&Config::default());
        assert_eq!(request.format, ReportFormat::Csv);
        assert_eq!(request.output, Path::new("/tmp/maven_open_prs.csv"));
        assert_eq!(request.author, None);
        assert!(request.check_archived);
    }

    #[test]
    fn asciidoc_default_output() {
        let request = parse(&["--format", "asciidoc"]).request(&Config::default());
        assert_eq!(request.format, ReportFormat::AsciiDoc);
        assert_eq!(request.output, Path::new("/tmp/maven_open_prs.adoc"));
    }

    #[test]
    fn output_override() {
        let request = parse(&["-o", "/srv/prs.csv"]).request(&Config::default());
        assert_eq!(request.output, Path::new("/srv/prs.csv"));

        let request = parse(&["--output", "report.adoc", "--format", "asciidoc"])
            .request(&Config::default());
        assert_eq!(request.output, Path::new("report.adoc"));
    }

    #[test]
    fn dependabot_shortcut() {
        let request = parse(&["--dependabot"]).request(&Config::default());
        assert_eq!(request.author.as_deref(), Some("app/dependabot"));
    }

    #[test]
    fn explicit_author() {
        let request = parse(&["--author", "dependabot[bot]"]).request(&Config::default());
        assert_eq!(request.author.as_deref(), Some("dependabot[bot]"));
    }

    #[test]
    fn dependabot_overrides_author() {
        let request =
            parse(&["--dependabot", "--author", "alice"]).request(&Config::default());
        assert_eq!(request.author.as_deref(), Some("app/dependabot"));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["maven-prs", "--format", "json"]).is_err());
    }

    #[test]
    fn skip_archived_check() {
        let request = parse(&["--skip-archived-check"]).request(&Config::default());
        assert!(!request.check_archived);
    }

    #[test]
    fn yaml_flag_beats_config() {
        let config = Config {
            yaml_path: Some("/from/config.yml".into()),
            gh: None,
        };
        let request = parse(&["--yaml", "/from/flag.yml"]).request(&config);
        assert_eq!(request.yaml_path.as_deref(), Some(Path::new("/from/flag.yml")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
