//! Contextual patch application for drifted documents.
//!
//! Hunks are delimited by `@@` markers carrying free-form anchor text
//! instead of line-number ranges, so a patch keeps applying after the target
//! has drifted. Each hunk is relocated by its anchor or by verifying its
//! full context/removal run inside the current document, then spliced in;
//! later hunks run against the result of earlier ones.
//!
//! ```rust,ignore
//! use mend::{SessionConfig, parse_patch, run_patch, split_keeping_terminators};
//!
//! let patch = parse_patch(diff_text)?;
//! let doc = split_keeping_terminators(&file_content);
//! let (doc, report) = run_patch(doc, &patch, SessionConfig::default());
//! println!("{}", report.summary());
//! let new_content = doc.concat();
//! ```

pub mod applying;
pub mod filesystem;
pub mod locating;
pub mod model;
pub mod parsing;
pub mod session;
pub mod text;

pub use applying::apply_hunk;
pub use filesystem::{PatchOutcome, apply_patch_file};
pub use locating::{LocateError, locate};
pub use model::{
    Document, FailurePolicy, Hunk, HunkOp, MatchMode, MatchSpan, OpKind, Patch, SessionConfig,
};
pub use parsing::{ParseError, parse_patch};
pub use session::{HunkOutcome, SessionReport, run_patch};
pub use text::split_keeping_terminators;

#[cfg(test)]
mod tests;
