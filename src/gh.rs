//! The repository host: open pull requests and archival flags via the `gh` CLI.
//!
//! `gh` must already be authenticated; this crate never handles credentials.
//! Every call is a single blocking subprocess with JSON on stdout.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use jiff::Timestamp;
use serde::Deserialize;

use crate::model::{CheckRunOutcome, OWNER, PullRequest};

/// Fields requested from `gh pr list`.
const PR_LIST_FIELDS: &str =
    "number,title,author,createdAt,updatedAt,url,isDraft,labels,headRefOid,statusCheckRollup";

/// Upper bound on pull requests listed per repository.
const PR_LIST_LIMIT: &str = "1000";

/// Errors from invoking `gh` or reading its output.
#[derive(Debug, thiserror::Error)]
pub enum GhError {
    #[error("`{}` not found; is the GitHub CLI installed?", .0.display())]
    NotInstalled(PathBuf),

    #[error("`gh {args}` failed ({status}): {stderr}")]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("I/O error running gh: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected JSON from gh: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, GhError>;

/// Where pull requests and repository metadata come from.
pub trait RepositoryHost {
    /// Open pull requests of `apache/<repository>`, tagged with the repository name.
    fn open_pull_requests(&self, repository: &str) -> Result<Vec<PullRequest>>;

    /// Whether `apache/<repository>` is archived.
    fn archived(&self, repository: &str) -> Result<bool>;
}

/// The `gh` command-line client.
#[derive(Debug, Clone)]
pub struct Gh {
    program: PathBuf,
}

impl Gh {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `gh` with the given args and return stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => GhError::NotInstalled(self.program.clone()),
                _ => GhError::Io(e),
            })?;

        if !output.status.success() {
            return Err(GhError::Failed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RepositoryHost for Gh {
    fn open_pull_requests(&self, repository: &str) -> Result<Vec<PullRequest>> {
        let slug = format!("{OWNER}/{repository}");
        let json = self.run(&[
            "pr",
            "list",
            "--repo",
            &slug,
            "--state",
            "open",
            "--json",
            PR_LIST_FIELDS,
            "--limit",
            PR_LIST_LIMIT,
        ])?;
        Ok(parse_pull_requests(repository, &json)?)
    }

    fn archived(&self, repository: &str) -> Result<bool> {
        let slug = format!("{OWNER}/{repository}");
        let json = self.run(&["repo", "view", &slug, "--json", "archived"])?;
        Ok(parse_archived(&json)?)
    }
}

// ── JSON shapes ──

/// JSON shape for one entry of `gh pr list --json`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPrListing {
    number: u64,
    title: String,
    author: GhActor,
    created_at: Timestamp,
    updated_at: Timestamp,
    url: String,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    labels: Vec<GhLabel>,
    status_check_rollup: Option<Vec<GhRollupEntry>>,
}

#[derive(Deserialize)]
struct GhActor {
    login: String,
}

#[derive(Deserialize)]
struct GhLabel {
    name: String,
}

/// One rollup entry: either a status context (`state`, `targetUrl`) or a
/// check run (`status` while running, `conclusion` once finished, `detailsUrl`).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhRollupEntry {
    state: Option<String>,
    conclusion: Option<String>,
    status: Option<String>,
    #[serde(alias = "detailsUrl")]
    target_url: Option<String>,
}

impl GhRollupEntry {
    /// First non-empty of `state`, `conclusion`, `status`.
    fn into_outcome(self) -> Option<CheckRunOutcome> {
        let target_url = self.target_url.filter(|u| !u.is_empty());
        [self.state, self.conclusion, self.status]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(|state| CheckRunOutcome { state, target_url })
    }
}

/// JSON shape for `gh repo view --json archived`.
#[derive(Deserialize)]
struct GhRepoView {
    #[serde(default)]
    archived: bool,
}

/// Parse `gh pr list` output, attaching the repository name to every record.
pub(crate) fn parse_pull_requests(
    repository: &str,
    json: &str,
) -> serde_json::Result<Vec<PullRequest>> {
    let listings: Vec<GhPrListing> = serde_json::from_str(json)?;

    Ok(listings
        .into_iter()
        .map(|p| PullRequest {
            repository: repository.to_string(),
            number: p.number,
            title: p.title,
            author: p.author.login,
            created_at: p.created_at,
            updated_at: p.updated_at,
            is_draft: p.is_draft,
            labels: p.labels.into_iter().map(|l| l.name).collect(),
            url: p.url,
            checks: p.status_check_rollup.map(|entries| {
                entries
                    .into_iter()
                    .filter_map(GhRollupEntry::into_outcome)
                    .collect()
            }),
        })
        .collect())
}

pub(crate) fn parse_archived(json: &str) -> serde_json::Result<bool> {
    let view: GhRepoView = serde_json::from_str(json)?;
    Ok(view.archived)
}
