//! Archived repositories: detect them and prune them from the YAML include list.
//!
//! The YAML file lists one repository per line, e.g.
//!
//! ```text
//! includes:
//!   - github:repository::https://github.com/apache/maven-site
//! ```
//!
//! It is edited as text, line by line, so comments and formatting survive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};

use crate::gh::{GhError, RepositoryHost};
use crate::model::OWNER;

/// Errors that can occur while editing the YAML file.
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Drop archived repositories from `repositories` and from the YAML file.
///
/// Any doubt about a repository's status keeps it: a failed or malformed
/// query counts as not archived. Returns the repositories still active,
/// in their original order.
pub fn filter_archived(
    host: &impl RepositoryHost,
    repositories: Vec<String>,
    yaml_path: Option<&Path>,
) -> Vec<String> {
    let mut cli_missing = false;
    let (kept, archived) = partition_archived(repositories, |repo| {
        if cli_missing {
            return false;
        }
        match host.archived(repo) {
            Ok(archived) => archived,
            Err(GhError::NotInstalled(program)) => {
                warn!(
                    "'{}' not found; skipping archived checks.",
                    program.display()
                );
                cli_missing = true;
                false
            }
            Err(GhError::Json(_)) => {
                warn!(
                    "unexpected response when checking {OWNER}/{repo}; skipping archived check."
                );
                false
            }
            Err(e) => {
                warn!(
                    "unable to fetch repo metadata for {OWNER}/{repo} ({e}); skipping archived check."
                );
                false
            }
        }
    });

    if archived.is_empty() {
        return kept;
    }

    info!("Detected archived repositories: {}", archived.join(", "));
    for repo in &archived {
        let Some(path) = yaml_path else {
            info!("  Did not remove {repo} from YAML (no YAML file configured)");
            continue;
        };
        match remove_from_yaml(path, repo) {
            Ok(true) => info!("  Removed {repo} from YAML ({})", path.display()),
            Ok(false) => info!("  Did not remove {repo} from YAML (not present)"),
            Err(e) => warn!("{e}; skipping removal of {repo} from YAML."),
        }
    }

    kept
}

/// Split repositories into `(kept, archived)`, preserving order within each.
fn partition_archived(
    repositories: Vec<String>,
    mut is_archived: impl FnMut(&str) -> bool,
) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::new();
    let mut archived = Vec::new();
    for repo in repositories {
        if is_archived(&repo) {
            archived.push(repo);
        } else {
            kept.push(repo);
        }
    }
    (kept, archived)
}

/// Remove the include line for `repository` from the YAML file.
///
/// Returns whether anything was removed. A missing file removes nothing.
/// The file is only rewritten when a line matched; every other byte is kept.
pub fn remove_from_yaml(path: &Path, repository: &str) -> Result<bool, PruneError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(PruneError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let pattern = entry_pattern(repository)?;
    let mut removed = false;
    let kept: String = text
        .split_inclusive('\n')
        .filter(|line| {
            let matched = pattern.is_match(line.trim_end_matches(['\r', '\n']));
            removed |= matched;
            !matched
        })
        .collect();

    if removed {
        fs::write(path, kept).map_err(|source| PruneError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(removed)
}

/// Pattern for a YAML list item naming `repository`.
///
/// The name must end at `.git`, whitespace, `/`, a quote, a comment, or the
/// end of the line, so `maven` never matches `maven-site`.
fn entry_pattern(repository: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?i)^\s*-+\s*github:repository::https://github\.com/{}/{}(?:\.git)?(?:[\s/"'#].*)?$"#,
        regex::escape(OWNER),
        regex::escape(repository),
    ))
}
