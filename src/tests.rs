#![cfg(test)]

use std::fs;

use crate::filesystem::apply_patch_file;
use crate::model::{FailurePolicy, MatchMode, SessionConfig};
use crate::parsing::parse_patch;
use crate::session::{HunkOutcome, SessionReport, run_patch};
use crate::text::split_keeping_terminators;

fn apply(text: &str, diff: &str, config: SessionConfig) -> (String, SessionReport) {
    let patch = parse_patch(diff).expect("parse");
    let doc = split_keeping_terminators(text);
    let (doc, report) = run_patch(doc, &patch, config);
    (doc.concat(), report)
}

fn apply_default(text: &str, diff: &str) -> (String, SessionReport) {
    apply(text, diff, SessionConfig::default())
}

#[test]
fn empty_patch_is_a_parse_error() {
    let err = parse_patch("just prose\n--- a/file\n+++ b/file\n").unwrap_err();
    assert_eq!(err.to_string(), "no hunks found in patch text");
}

#[test]
fn anchor_based_insertion() {
    let (out, report) = apply_default("def foo():\n    pass\n", "@@ def foo():\n+    # inserted\n");
    assert_eq!(out, "def foo():\n    # inserted\n    pass\n");
    assert!(report.is_clean());
}

#[test]
fn content_run_replace() {
    let (out, report) = apply_default(
        "def foo():\n    return 1\n",
        "@@\n-    return 1\n+    return 2\n",
    );
    assert_eq!(out, "def foo():\n    return 2\n");
    assert!(report.is_clean());
}

#[test]
fn context_lines_pin_the_span() {
    let (out, _) = apply_default("A\nB\nC\n", "@@\n A\n-B\n+BB\n C\n");
    assert_eq!(out, "A\nBB\nC\n");
}

#[test]
fn full_run_disambiguation_beats_first_line_echo() {
    // "x = 1" occurs twice; only the second occurrence is followed by the
    // second removed line. Full-run verification picks it.
    let text = "x = 1\ny = 9\nx = 1\ny = 2\n";
    let diff = "@@\n-x = 1\n-y = 2\n+swapped\n";

    let (out, report) = apply_default(text, diff);
    assert_eq!(out, "x = 1\ny = 9\nswapped\n");
    assert!(report.is_clean());

    // The legacy engine trusts the first echo and rewrites the wrong region.
    let legacy = SessionConfig {
        mode: MatchMode::FirstLineOnly,
        ..SessionConfig::default()
    };
    let (out, _) = apply(text, diff, legacy);
    assert_eq!(out, "swapped\nx = 1\ny = 2\n");
}

#[test]
fn sequential_dependency_between_hunks() {
    // Hunk 2 anchors on text hunk 1 introduced; order is load-bearing.
    let (out, report) = apply_default("alpha\nomega\n", "@@ alpha\n+MARK\n@@ MARK\n+beta\n");
    assert_eq!(out, "alpha\nMARK\nbeta\nomega\n");
    assert_eq!(report.applied(), 2);
}

#[test]
fn lenient_skip_keeps_other_hunks() {
    let diff = "@@\n-missing line\n+replacement\n@@\n-two\n+2\n";
    let (out, report) = apply_default("one\ntwo\nthree\n", diff);
    assert_eq!(out, "one\n2\nthree\n");
    assert_eq!(report.total, 2);
    assert_eq!(report.applied(), 1);
    assert!(!report.aborted);
    assert!(matches!(report.outcomes[0], HunkOutcome::Skipped { hunk: 0, .. }));
    assert!(report.summary().starts_with("1 of 2 hunks applied; 1 skipped"));
}

#[test]
fn strict_aborts_but_keeps_prior_edits() {
    let strict = SessionConfig {
        policy: FailurePolicy::Strict,
        ..SessionConfig::default()
    };
    let diff = "@@\n-two\n+2\n@@\n-missing line\n+replacement\n@@\n-three\n+3\n";
    let (out, report) = apply("one\ntwo\nthree\n", diff, strict);
    assert_eq!(out, "one\n2\nthree\n");
    assert!(report.aborted);
    assert_eq!(report.outcomes.len(), 2);
    assert!(report.summary().starts_with("aborted after 1 of 3 hunks"));
}

#[test]
fn round_trip_inversion_restores_the_document() {
    let original = "def foo():\n    return 1\n    done\n";
    let forward = "@@\n def foo():\n-    return 1\n+    return 2\n";
    let inverse = "@@\n def foo():\n-    return 2\n+    return 1\n";

    let (patched, _) = apply_default(original, forward);
    assert_eq!(patched, "def foo():\n    return 2\n    done\n");
    let (restored, _) = apply_default(&patched, inverse);
    assert_eq!(restored, original);
}

#[test]
fn contributed_lines_gain_a_terminator() {
    // The document's last line has no newline; its replacement gets one.
    let (out, _) = apply_default("a\nb", "@@\n-b\n+c\n");
    assert_eq!(out, "a\nc\n");
}

#[test]
fn crlf_patch_applies_to_lf_document() {
    let (out, report) = apply_default("hello\nworld\n", "@@\r\n-hello\r\n+hi\r\n");
    assert_eq!(out, "hi\nworld\n");
    assert!(report.is_clean());
}

#[test]
fn parser_ignores_headers_and_prose() {
    let patch = parse_patch(
        "Here is the fix:\n--- a/code.py\n+++ b/code.py\n@@ def main()\n--- a/code.py\n+    pass\nstray prose\n",
    )
    .unwrap();
    assert_eq!(patch.hunks.len(), 1);
    assert_eq!(patch.hunks[0].anchor, "def main()");
    assert_eq!(patch.hunks[0].ops.len(), 1);
}

#[test]
fn parser_trims_anchor_whitespace_and_colons() {
    let patch = parse_patch("@@  def foo():  \n+    pass\n").unwrap();
    assert_eq!(patch.hunks[0].anchor, "def foo()");

    let bare = parse_patch("@@\n+    pass\n").unwrap();
    assert!(!bare.hunks[0].has_anchor());
}

#[test]
fn unanchored_pure_insert_is_recorded_not_dropped() {
    let (out, report) = apply_default("a\n", "@@\n+floating\n");
    assert_eq!(out, "a\n");
    assert_eq!(report.applied(), 0);
    match &report.outcomes[0] {
        HunkOutcome::Skipped { reason, .. } => assert!(reason.contains("anchor")),
        other => panic!("expected skip, got {other:?}"),
    }
}

#[test]
fn report_serializes_for_structured_callers() {
    let (_, report) = apply_default("one\ntwo\n", "@@\n-two\n+2\n@@\n-gone\n");
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["outcomes"][0]["status"], "applied");
    assert_eq!(value["outcomes"][1]["status"], "skipped");
}

// =============================================================================
// File boundary
// =============================================================================

#[test]
fn patch_file_overwrites_target_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("code.py");
    let patch = dir.path().join("fix.diff");
    fs::write(&target, "def foo():\n    return 1\n").unwrap();
    fs::write(&patch, "@@\n-    return 1\n+    return 2\n").unwrap();

    let outcome = apply_patch_file(&target, &patch, None, SessionConfig::default()).unwrap();
    assert_eq!(outcome.out_path, target);
    assert!(outcome.report.is_clean());
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "def foo():\n    return 2\n"
    );
}

#[test]
fn out_path_leaves_the_target_intact() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("code.py");
    let patch = dir.path().join("fix.diff");
    let out = dir.path().join("patched.py");
    fs::write(&target, "hello\n").unwrap();
    fs::write(&patch, "@@\n-hello\n+hi\n").unwrap();

    let outcome =
        apply_patch_file(&target, &patch, Some(out.as_path()), SessionConfig::default()).unwrap();
    assert_eq!(outcome.out_path, out);
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");
    assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
}

#[test]
fn zero_hunks_leaves_the_target_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("code.py");
    let patch = dir.path().join("empty.diff");
    fs::write(&target, "original\n").unwrap();
    fs::write(&patch, "no delimiters here\n").unwrap();

    let err = apply_patch_file(&target, &patch, None, SessionConfig::default()).unwrap_err();
    assert!(err.to_string().contains("no hunks"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "original\n");
}

#[test]
fn strict_abort_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("code.py");
    let patch = dir.path().join("fix.diff");
    fs::write(&target, "one\ntwo\n").unwrap();
    fs::write(&patch, "@@\n-two\n+2\n@@\n-missing\n+x\n").unwrap();

    let strict = SessionConfig {
        policy: FailurePolicy::Strict,
        ..SessionConfig::default()
    };
    let err = apply_patch_file(&target, &patch, None, strict).unwrap_err();
    assert!(err.to_string().starts_with("aborted after"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "one\ntwo\n");
}
