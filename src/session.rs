//! Running a whole patch against one document, outcome by outcome.

use serde::Serialize;
use tracing::{debug, warn};

use crate::applying::apply_hunk;
use crate::locating::locate;
use crate::model::{Document, FailurePolicy, Patch, SessionConfig};

/// What happened to one hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HunkOutcome {
    Applied { hunk: usize, start: usize, len: usize },
    Skipped { hunk: usize, reason: String },
}

/// Per-hunk outcomes plus the overall verdict for one patch run.
#[derive(Debug, Default, Serialize)]
pub struct SessionReport {
    pub total: usize,
    pub outcomes: Vec<HunkOutcome>,
    /// Set when the strict policy stopped the run early.
    pub aborted: bool,
}

impl SessionReport {
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, HunkOutcome::Applied { .. }))
            .count()
    }

    fn skip_reasons(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                HunkOutcome::Skipped { reason, .. } => Some(reason.as_str()),
                HunkOutcome::Applied { .. } => None,
            })
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        !self.aborted && self.applied() == self.total
    }

    /// One human-readable line, e.g. `7 of 9 hunks applied; 2 skipped: ...`.
    pub fn summary(&self) -> String {
        let applied = self.applied();
        let reasons = self.skip_reasons();
        if self.aborted {
            let reason = reasons.last().copied().unwrap_or("unknown");
            return format!(
                "aborted after {applied} of {} hunks: {reason}",
                self.total
            );
        }
        if reasons.is_empty() {
            format!("{applied} of {} hunks applied", self.total)
        } else {
            format!(
                "{applied} of {} hunks applied; {} skipped: {}",
                self.total,
                reasons.len(),
                reasons.join("; ")
            )
        }
    }
}

/// Run every hunk of a patch, in order, against one document.
///
/// Later hunks see the text produced by earlier ones. Under the lenient
/// policy a hunk that fails to locate is recorded and skipped; under the
/// strict policy it stops the run, keeping the edits made so far.
pub fn run_patch(
    mut doc: Document,
    patch: &Patch,
    config: SessionConfig,
) -> (Document, SessionReport) {
    let mut report = SessionReport {
        total: patch.hunks.len(),
        ..SessionReport::default()
    };

    for (idx, hunk) in patch.hunks.iter().enumerate() {
        match locate(&doc, hunk, config.mode) {
            Ok(span) => {
                debug!(hunk = idx, start = span.start, len = span.len, "hunk located");
                doc = apply_hunk(&doc, hunk, span);
                report.outcomes.push(HunkOutcome::Applied {
                    hunk: idx,
                    start: span.start,
                    len: span.len,
                });
            }
            Err(err) => {
                warn!(hunk = idx, %err, "hunk skipped");
                report.outcomes.push(HunkOutcome::Skipped {
                    hunk: idx,
                    reason: err.to_string(),
                });
                if config.policy == FailurePolicy::Strict {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    (doc, report)
}
