//! The export pipeline: prune archived repositories, list open pull
//! requests one repository at a time, filter by author, write the report.

use std::fs;
use std::io;
use std::path::PathBuf;

use jiff::Zoned;
use tracing::{debug, info, warn};

use crate::archive;
use crate::gh::{GhError, RepositoryHost};
use crate::model::PullRequest;
use crate::report::{self, ReportFormat};

/// Errors that abort an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to list pull requests for {repository}: {source}")]
    Fetch {
        repository: String,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Config(String),
}

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ReportFormat,
    pub output: PathBuf,
    /// Keep only pull requests whose author login equals this exactly.
    pub author: Option<String>,
    /// YAML include file to prune archived repositories from.
    pub yaml_path: Option<PathBuf>,
    pub check_archived: bool,
}

/// Run the export over `repositories` and return the pull requests reported.
pub fn export(
    host: &impl RepositoryHost,
    repositories: Vec<String>,
    request: &ExportRequest,
) -> Result<Vec<PullRequest>, ExportError> {
    let repositories = if request.check_archived {
        archive::filter_archived(host, repositories, request.yaml_path.as_deref())
    } else {
        repositories
    };

    let mut prs = fetch_open_pull_requests(host, &repositories)?;

    if let Some(author) = &request.author {
        let total = prs.len();
        prs = filter_by_author(prs, author);
        info!(
            "Filtered to author '{author}': {} of {total} PRs",
            prs.len()
        );
    }

    let generated_at = Zoned::now().strftime("%a %b %d %H:%M:%S %Z %Y").to_string();
    let contents = report::render(
        request.format,
        &prs,
        request.author.as_deref(),
        &generated_at,
    );

    fs::write(&request.output, contents).map_err(|source| ExportError::Write {
        path: request.output.clone(),
        source,
    })?;

    Ok(prs)
}

/// List open pull requests of every repository, in order.
///
/// A repository whose listing fails (unknown repository, no access)
/// contributes nothing. A missing `gh` is reported once and ends the
/// listing. Output that is not the expected JSON aborts the run.
pub fn fetch_open_pull_requests(
    host: &impl RepositoryHost,
    repositories: &[String],
) -> Result<Vec<PullRequest>, ExportError> {
    let mut all = Vec::new();

    for repo in repositories {
        info!("Fetching PRs from {repo}...");
        let prs = match host.open_pull_requests(repo) {
            Ok(prs) => prs,
            Err(GhError::Json(source)) => {
                return Err(ExportError::Fetch {
                    repository: repo.clone(),
                    source,
                });
            }
            Err(GhError::NotInstalled(program)) => {
                warn!(
                    "'{}' not found; no pull requests can be listed.",
                    program.display()
                );
                break;
            }
            Err(e) => {
                // Indistinguishable here: the repository may not exist or may have no PRs.
                debug!("no pull requests for {repo}: {e}");
                Vec::new()
            }
        };

        if !prs.is_empty() {
            info!("  Found {} open PRs", prs.len());
            all.extend(prs);
        }
    }

    Ok(all)
}

/// Keep pull requests authored by exactly `author`.
pub fn filter_by_author(prs: Vec<PullRequest>, author: &str) -> Vec<PullRequest> {
    prs.into_iter().filter(|pr| pr.author == author).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;

    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::Cli;
    use crate::config::Config;
    use crate::gh;
    use crate::report::fixtures::pr;

    /// A host serving canned `gh` responses per repository.
    #[derive(Default)]
    struct FakeHost {
        listings: HashMap<&'static str, &'static str>,
        archived: Vec<&'static str>,
        /// Behave as if the `gh` program does not exist.
        missing: bool,
        listing_calls: Cell<usize>,
    }

    impl RepositoryHost for FakeHost {
        fn open_pull_requests(&self, repository: &str) -> gh::Result<Vec<PullRequest>> {
            self.listing_calls.set(self.listing_calls.get() + 1);
            if self.missing {
                return Err(GhError::NotInstalled("gh".into()));
            }
            match self.listings.get(repository) {
                Some(json) => Ok(gh::parse_pull_requests(repository, json)?),
                None => Err(io::Error::other("Could not resolve to a Repository").into()),
            }
        }

        fn archived(&self, repository: &str) -> gh::Result<bool> {
            Ok(self.archived.iter().any(|a| *a == repository))
        }
    }

    const DEPENDABOT_FAILURE: &str = r#"[{
        "number": 1412,
        "title": "Bump org.apache.maven.plugins:maven-plugins from 41 to 43",
        "author": {"login": "app/dependabot", "is_bot": true},
        "createdAt": "2024-09-10T04:12:33Z",
        "updatedAt": "2024-09-11T08:00:00Z",
        "url": "https://github.com/apache/maven-jxr/pull/1412",
        "isDraft": false,
        "labels": [{"name": "dependencies"}],
        "headRefOid": "deadbeef",
        "statusCheckRollup": [
          {"__typename": "CheckRun", "status": "COMPLETED", "conclusion": "FAILURE"}
        ]
    }]"#;

    const HUMAN_SUCCESS: &str = r#"[{
        "number": 88,
        "title": "Document the reporting API",
        "author": {"login": "alice"},
        "createdAt": "2024-08-01T00:00:00Z",
        "updatedAt": "2024-08-02T00:00:00Z",
        "url": "https://github.com/apache/maven-site/pull/88",
        "isDraft": true,
        "labels": [],
        "statusCheckRollup": [{"state": "SUCCESS"}]
    }]"#;

    fn request(dir: &Path, format: ReportFormat, author: Option<&str>) -> ExportRequest {
        ExportRequest {
            format,
            output: dir.join(format!("out.{}", format.extension())),
            yaml_path: None,
            author: author.map(String::from),
            check_archived: true,
        }
    }

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dependabot_csv_end_to_end() {
        let dir = TempDir::new().unwrap();
        let host = FakeHost {
            listings: HashMap::from([("maven-jxr", DEPENDABOT_FAILURE), ("maven-scm", "[]")]),
            ..Default::default()
        };
        let output = dir.path().join("prs.csv");
        let cli = Cli::try_parse_from([
            "maven-prs",
            "--dependabot",
            "--format",
            "csv",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        let request = cli.request(&Config::default());
        assert_eq!(request.output, output);

        let prs = export(&host, repos(&["maven-jxr", "maven-scm"]), &request).unwrap();
        assert_eq!(prs.len(), 1);

        let csv = fs::read_to_string(&request.output).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "maven-jxr,1412,Bump org.apache.maven.plugins:maven-plugins from 41 to 43,\
             app/dependabot,2024-09-10,2024-09-11,No,FAILURE,\
             https://github.com/apache/maven-jxr/pull/1412/checks,dependencies,\
             https://github.com/apache/maven-jxr/pull/1412"
        );
    }

    #[test]
    fn author_filter_is_literal() {
        let dir = TempDir::new().unwrap();
        let host = FakeHost {
            listings: HashMap::from([
                ("maven-jxr", DEPENDABOT_FAILURE),
                ("maven-site", HUMAN_SUCCESS),
            ]),
            ..Default::default()
        };

        let request = request(dir.path(), ReportFormat::Csv, Some("dependabot"));
        let prs = export(&host, repos(&["maven-jxr", "maven-site"]), &request).unwrap();
        assert!(prs.is_empty());

        let request = ExportRequest {
            author: None,
            ..request
        };
        let prs = export(&host, repos(&["maven-jxr", "maven-site"]), &request).unwrap();
        assert_eq!(prs.len(), 2);
    }

    #[test]
    fn archived_repositories_are_not_fetched() {
        let dir = TempDir::new().unwrap();
        let host = FakeHost {
            listings: HashMap::from([
                ("maven-jxr", DEPENDABOT_FAILURE),
                ("maven-site", HUMAN_SUCCESS),
            ]),
            archived: vec!["maven-jxr"],
            ..Default::default()
        };

        let request = request(dir.path(), ReportFormat::AsciiDoc, None);
        let prs = export(&host, repos(&["maven-jxr", "maven-site"]), &request).unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].repository, "maven-site");

        let skip = ExportRequest {
            check_archived: false,
            ..request
        };
        let prs = export(&host, repos(&["maven-jxr", "maven-site"]), &skip).unwrap();
        assert_eq!(prs.len(), 2);
    }

    #[test]
    fn failed_listing_contributes_nothing() {
        let host = FakeHost {
            listings: HashMap::from([("maven-site", HUMAN_SUCCESS)]),
            ..Default::default()
        };

        let prs = fetch_open_pull_requests(&host, &repos(&["maven-gone", "maven-site"])).unwrap();
        assert_eq!(prs.len(), 1);
    }

    #[test]
    fn missing_gh_stops_listing() {
        let host = FakeHost {
            listings: HashMap::from([("maven-site", HUMAN_SUCCESS)]),
            missing: true,
            ..Default::default()
        };

        let prs =
            fetch_open_pull_requests(&host, &repos(&["maven", "maven-site", "maven-jxr"])).unwrap();
        assert!(prs.is_empty());
        assert_eq!(host.listing_calls.get(), 1);
    }

    #[test]
    fn malformed_listing_aborts() {
        let host = FakeHost {
            listings: HashMap::from([("maven-site", "{not json")]),
            ..Default::default()
        };

        let err = fetch_open_pull_requests(&host, &repos(&["maven-site"])).unwrap_err();
        assert!(
            matches!(&err, ExportError::Fetch { repository, .. } if repository == "maven-site"),
            "{err}"
        );
    }

    #[test]
    fn asciidoc_export_writes_document() {
        let dir = TempDir::new().unwrap();
        let host = FakeHost {
            listings: HashMap::from([("maven-jxr", DEPENDABOT_FAILURE)]),
            ..Default::default()
        };

        let request = request(dir.path(), ReportFormat::AsciiDoc, Some("app/dependabot"));
        export(&host, repos(&["maven-jxr"]), &request).unwrap();

        let doc = fs::read_to_string(&request.output).unwrap();
        assert!(doc.starts_with("= Open Maven Dependabot PRs\n"));
        assert!(doc.contains("| https://github.com/apache/maven-jxr/pull/1412/checks[FAILURE]\n"));
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let host = FakeHost::default();
        let request = ExportRequest {
            output: dir.path().join("missing").join("out.csv"),
            ..request(dir.path(), ReportFormat::Csv, None)
        };

        let err = export(&host, Vec::new(), &request).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }), "{err}");
    }

    #[test]
    fn filter_by_author_matches_exactly() {
        let mut human = pr("maven", 2, "2024-01-01T00:00:00Z", None);
        human.author = "alice".into();
        let prs = vec![pr("maven", 1, "2024-01-01T00:00:00Z", None), human];

        let kept = filter_by_author(prs, "alice");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].number, 2);
    }
}
