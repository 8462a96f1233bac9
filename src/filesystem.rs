//! File-boundary glue around the pure engine: read both inputs once, run the
//! session, write the result once.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use tracing::debug;

use crate::model::SessionConfig;
use crate::parsing::parse_patch;
use crate::session::{SessionReport, run_patch};
use crate::text::split_keeping_terminators;

/// Outcome of one end-to-end run, as handed back to callers.
#[derive(Debug, Serialize)]
pub struct PatchOutcome {
    pub out_path: PathBuf,
    pub report: SessionReport,
}

/// Read the target and patch files, apply every hunk, write the result.
///
/// The result goes to `out` when given, otherwise back over the target. A
/// parse failure or a strict-mode abort writes nothing, so the target stays
/// byte-for-byte unchanged on those paths.
pub fn apply_patch_file(
    target: &Path,
    patch: &Path,
    out: Option<&Path>,
    config: SessionConfig,
) -> Result<PatchOutcome> {
    let original = fs::read_to_string(target)
        .wrap_err_with(|| format!("reading target {}", target.display()))?;
    let diff = fs::read_to_string(patch)
        .wrap_err_with(|| format!("reading patch {}", patch.display()))?;

    let parsed = parse_patch(&diff)?;
    let doc = split_keeping_terminators(&original);
    let (doc, report) = run_patch(doc, &parsed, config);

    if report.aborted {
        return Err(eyre!("{}", report.summary()));
    }

    let out_path = out.unwrap_or(target);
    debug!(path = %out_path.display(), lines = doc.len(), "writing result");
    fs::write(out_path, doc.concat())
        .wrap_err_with(|| format!("writing result to {}", out_path.display()))?;

    Ok(PatchOutcome {
        out_path: out_path.to_path_buf(),
        report,
    })
}
