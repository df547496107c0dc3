//! AsciiDoc export: one table, a header row per repository, newest PRs first.

use std::collections::BTreeMap;

use crate::model::{PullRequest, pulls_url};
use crate::status::build_verdict;

/// Who the report covers, derived from the author filter.
enum Audience<'a> {
    Everyone,
    /// An automation account, by display name (e.g. `Dependabot`).
    Bot(String),
    Person(&'a str),
}

impl<'a> Audience<'a> {
    fn from_author(author: Option<&'a str>) -> Self {
        match author {
            None => Self::Everyone,
            Some(login) => match bot_name(login) {
                Some(name) => Self::Bot(capitalize(name)),
                None => Self::Person(login),
            },
        }
    }

    fn title(&self) -> String {
        match self {
            Self::Everyone => "Open Maven PRs".to_string(),
            Self::Bot(name) => format!("Open Maven {name} PRs"),
            Self::Person(login) => format!("Open Maven PRs by {login}"),
        }
    }

    fn qualifier(&self) -> String {
        match self {
            Self::Everyone => String::new(),
            Self::Bot(name) => format!(" from {name}"),
            Self::Person(login) => format!(" by {login}"),
        }
    }
}

/// The bot name in `app/<name>` or `<name>[bot]` logins.
fn bot_name(login: &str) -> Option<&str> {
    login
        .strip_prefix("app/")
        .or_else(|| login.strip_suffix("[bot]"))
        .filter(|name| !name.is_empty())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render pull requests as an AsciiDoc document with a single table.
///
/// Repositories appear in name order; within one, PRs are sorted by
/// creation time, newest first.
pub fn render_asciidoc(prs: &[PullRequest], author: Option<&str>, generated_at: &str) -> String {
    let audience = Audience::from_author(author);

    let mut by_repo: BTreeMap<&str, Vec<&PullRequest>> = BTreeMap::new();
    for pr in prs {
        by_repo.entry(pr.repository.as_str()).or_default().push(pr);
    }

    let mut lines = vec![
        format!("= {}", audience.title()),
        String::new(),
        format!(
            "The following Apache Maven projects have open Pull-Requests{} as of {generated_at}.",
            audience.qualifier()
        ),
        String::new(),
        r#"[cols="8,3,2,1", options="header"]"#.to_string(),
        "|===".to_string(),
        "| Title | Date | Build Status | Id".to_string(),
        String::new(),
    ];

    for (repo, mut repo_prs) in by_repo {
        repo_prs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        lines.push(format!("4+| *{}[{repo}]*", pulls_url(repo)));
        for pr in repo_prs {
            let verdict = build_verdict(pr);
            lines.push(format!("| {}", escape_cell(&pr.title)));
            lines.push(format!("| {}", pr.created_at));
            lines.push(format!("| {}[{}]", verdict.url, verdict.status));
            lines.push(format!("| {}[{}]", pr.url, pr.number));
        }
        lines.push(String::new());
    }

    lines.push("|===".to_string());

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

/// Keep a literal `|` from starting a new cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
