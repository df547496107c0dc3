//! CSV export: one row per pull request, sorted by repository then number.

use jiff::Timestamp;

use crate::model::PullRequest;
use crate::status::build_verdict;

const HEADER: [&str; 11] = [
    "Repository",
    "PR Number",
    "Title",
    "Author",
    "Created",
    "Updated",
    "Draft",
    "Build Status",
    "Build URL",
    "Labels",
    "PR URL",
];

/// Render pull requests as CSV, header row first.
pub fn render_csv(prs: &[PullRequest]) -> String {
    let mut sorted: Vec<&PullRequest> = prs.iter().collect();
    sorted.sort_by(|a, b| (&a.repository, a.number).cmp(&(&b.repository, b.number)));

    let mut out = String::new();
    write_record(&mut out, &HEADER);

    for pr in sorted {
        let verdict = build_verdict(pr);
        write_record(
            &mut out,
            &[
                pr.repository.clone(),
                pr.number.to_string(),
                pr.title.clone(),
                pr.author.clone(),
                date_part(pr.created_at),
                date_part(pr.updated_at),
                if pr.is_draft { "Yes" } else { "No" }.to_string(),
                verdict.status.to_string(),
                verdict.url,
                pr.labels.join(", "),
                pr.url.clone(),
            ],
        );
    }

    out
}

/// `YYYY-MM-DD` in UTC.
fn date_part(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d").to_string()
}

fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field.as_ref());
    }
    out.push_str("\r\n");
}

/// Quote a field only when it contains a delimiter, quote, or line break.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
