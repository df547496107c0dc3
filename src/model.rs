//! Pull request records and the build status derived from them.
//!
//! Records are built at the parse boundary in [`crate::gh`] from `gh pr list`
//! output; everything downstream works with these types, never raw JSON.

use std::fmt;

use jiff::Timestamp;

/// Owner of every repository this tool reports on.
pub const OWNER: &str = "apache";

/// An open pull request in one of the tracked repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Repository name without the owner, e.g. `maven-site`.
    pub repository: String,
    pub number: u64,
    pub title: String,
    /// Author login as reported by `gh` (bots appear as `app/<name>`).
    pub author: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_draft: bool,
    pub labels: Vec<String>,
    pub url: String,
    /// Check-run outcomes on the head commit.
    /// `None` when the host reported no rollup at all.
    pub checks: Option<Vec<CheckRunOutcome>>,
}

impl PullRequest {
    /// The checks page for this pull request.
    pub fn checks_url(&self) -> String {
        format!(
            "https://github.com/{OWNER}/{}/pull/{}/checks",
            self.repository, self.number
        )
    }
}

/// The pull request listing page for a repository.
pub fn pulls_url(repository: &str) -> String {
    format!("https://github.com/{OWNER}/{repository}/pulls")
}

/// One reported check outcome: its raw state token and where it was reported.
///
/// Tokens are case-sensitive and open-ended (`SUCCESS`, `IN_PROGRESS`,
/// `NEUTRAL`, ...); classification happens in [`crate::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunOutcome {
    pub state: String,
    /// The check's own page. Reports link to the checks page instead.
    #[allow(dead_code)]
    pub target_url: Option<String>,
}

/// Aggregate build status of a pull request.
///
/// Variant order is precedence order: a failure outranks everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStatus {
    Failure,
    Pending,
    Success,
    Unknown,
}

impl BuildStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failure => "FAILURE",
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build status together with the page to inspect it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVerdict {
    pub status: BuildStatus,
    pub url: String,
}
