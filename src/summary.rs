//! End-of-run tallies printed after the report is written.

use std::collections::BTreeMap;

use crate::model::{BuildStatus, PullRequest};
use crate::status::build_verdict;

/// Pull requests per build status, most common first.
///
/// Ties keep status precedence order (failure first).
pub fn status_counts(prs: &[PullRequest]) -> Vec<(BuildStatus, usize)> {
    let mut counts: BTreeMap<BuildStatus, usize> = BTreeMap::new();
    for pr in prs {
        *counts.entry(build_verdict(pr).status).or_default() += 1;
    }
    sorted_by_count(counts)
}

/// The `limit` repositories with the most pull requests.
///
/// Ties are broken by repository name.
pub fn top_repositories(prs: &[PullRequest], limit: usize) -> Vec<(&str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for pr in prs {
        *counts.entry(pr.repository.as_str()).or_default() += 1;
    }
    let mut top = sorted_by_count(counts);
    top.truncate(limit);
    top
}

fn sorted_by_count<K>(counts: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    // Stable sort, so equal counts stay in key order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}
