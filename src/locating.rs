//! Finding where a hunk lands inside a possibly-drifted document.

use crate::model::{Document, Hunk, MatchMode, MatchSpan};
use crate::text::{match_key, preview};

/// Why a hunk could not be placed in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The declared anchor text matched no document line.
    AnchorNotFound { anchor: String },
    /// No candidate position verified against the full context/removal run.
    RunNotFound { first: String },
    /// A start was found but the span would run past the end of the document.
    SpanOutOfBounds {
        start: usize,
        len: usize,
        doc_len: usize,
    },
    /// Pure insertion without an anchor: nothing to match on.
    Unanchored,
}

impl std::fmt::Display for LocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateError::AnchorNotFound { anchor } => {
                write!(f, "anchor text not found: {}", preview(anchor))
            }
            LocateError::RunNotFound { first } => {
                write!(
                    f,
                    "no document line matches the removal run starting with: {}",
                    preview(first)
                )
            }
            LocateError::SpanOutOfBounds {
                start,
                len,
                doc_len,
            } => {
                write!(
                    f,
                    "matched at line {start} but {len} lines do not fit a document of {doc_len} lines"
                )
            }
            LocateError::Unanchored => {
                write!(f, "pure insertion carries no anchor and no lines to match")
            }
        }
    }
}

impl std::error::Error for LocateError {}

/// Find the document region a hunk occupies.
///
/// Anchored hunks land right after the first line containing the anchor text.
/// Unanchored hunks land by their context/removal run: in `FullRun` mode a
/// candidate wins only when every line of the run verifies at consecutive
/// offsets, earliest candidate first. `FirstLineOnly` trusts the first
/// removal line alone.
pub fn locate(doc: &Document, hunk: &Hunk, mode: MatchMode) -> Result<MatchSpan, LocateError> {
    let len = hunk.span_len();

    if hunk.has_anchor() {
        return locate_by_anchor(doc, &hunk.anchor, len);
    }

    let run = hunk.match_run();
    if run.is_empty() {
        return Err(LocateError::Unanchored);
    }

    match mode {
        MatchMode::FullRun => locate_by_run(doc, &run),
        MatchMode::FirstLineOnly => {
            let seed = hunk.first_remove().unwrap_or(run[0]);
            locate_by_seed(doc, seed, len)
        }
    }
}

/// The span starts at the line immediately after the first anchor match.
fn locate_by_anchor(doc: &[String], anchor: &str, len: usize) -> Result<MatchSpan, LocateError> {
    let hit = doc
        .iter()
        .position(|line| line.contains(anchor))
        .ok_or_else(|| LocateError::AnchorNotFound {
            anchor: anchor.to_string(),
        })?;
    let span = MatchSpan {
        start: hit + 1,
        len,
    };
    check_bounds(span, doc.len())
}

/// Candidates seed on the run's first entry; only a candidate whose entire
/// run matches at consecutive offsets is accepted. Multiple full matches are
/// expected with boilerplate text; the earliest wins, deterministically.
fn locate_by_run(doc: &[String], run: &[&str]) -> Result<MatchSpan, LocateError> {
    if doc.len() >= run.len() {
        'outer: for start in 0..=doc.len() - run.len() {
            for (k, want) in run.iter().enumerate() {
                if match_key(&doc[start + k]) != match_key(want) {
                    continue 'outer;
                }
            }
            return Ok(MatchSpan {
                start,
                len: run.len(),
            });
        }
    }
    Err(LocateError::RunNotFound {
        first: run[0].to_string(),
    })
}

/// Legacy placement: first line whose key equals the seed, no verification
/// of the rest of the run.
fn locate_by_seed(doc: &[String], seed: &str, len: usize) -> Result<MatchSpan, LocateError> {
    let hit = doc
        .iter()
        .position(|line| match_key(line) == match_key(seed))
        .ok_or_else(|| LocateError::RunNotFound {
            first: seed.to_string(),
        })?;
    check_bounds(MatchSpan { start: hit, len }, doc.len())
}

fn check_bounds(span: MatchSpan, doc_len: usize) -> Result<MatchSpan, LocateError> {
    if span.start + span.len <= doc_len {
        Ok(span)
    } else {
        Err(LocateError::SpanOutOfBounds {
            start: span.start,
            len: span.len,
            doc_len,
        })
    }
}
