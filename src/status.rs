//! Reduce a pull request's check runs to one build status.

use crate::model::{BuildStatus, BuildVerdict, CheckRunOutcome, PullRequest};

const FAILURE_STATES: [&str; 3] = ["FAILURE", "FAILED", "ERROR"];
const PENDING_STATES: [&str; 4] = ["PENDING", "IN_PROGRESS", "WAITING", "QUEUED"];
const SUCCESS_STATES: [&str; 3] = ["SUCCESS", "SUCCESSFUL", "COMPLETED"];

/// Derive the build verdict for a pull request.
///
/// The URL always points at the pull request's checks page, whatever the status.
pub fn build_verdict(pr: &PullRequest) -> BuildVerdict {
    BuildVerdict {
        status: aggregate(pr.checks.as_deref()),
        url: pr.checks_url(),
    }
}

/// Aggregate check outcomes: failure beats pending beats success.
///
/// States outside the known sets are ignored. No recognised state at all,
/// or no checks, yields [`BuildStatus::Unknown`].
pub fn aggregate(checks: Option<&[CheckRunOutcome]>) -> BuildStatus {
    let Some(checks) = checks else {
        return BuildStatus::Unknown;
    };

    let mut failed = false;
    let mut pending = false;
    let mut succeeded = false;

    for check in checks {
        let state = check.state.as_str();
        if FAILURE_STATES.contains(&state) {
            failed = true;
        } else if PENDING_STATES.contains(&state) {
            pending = true;
        } else if SUCCESS_STATES.contains(&state) {
            succeeded = true;
        }
    }

    if failed {
        BuildStatus::Failure
    } else if pending {
        BuildStatus::Pending
    } else if succeeded {
        BuildStatus::Success
    } else {
        BuildStatus::Unknown
    }
}
